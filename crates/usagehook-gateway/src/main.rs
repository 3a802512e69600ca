//! usagehook gateway binary.
//!
//! Reads `WEBHOOK_*` configuration, installs logging, serves
//! `POST /user-model-metrics` and drains in-flight requests on SIGINT/SIGTERM.

use usagehook_core::error::{Result, UsageHookError};
use usagehook_gateway::{app_state::AppState, config, obs, router};

#[tokio::main]
async fn main() {
    let cfg = match config::load() {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("config load failed: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = obs::logging::init(&cfg.log) {
        eprintln!("{e}");
        std::process::exit(1);
    }

    if let Err(e) = run(cfg).await {
        tracing::error!(error = %e, "usagehook-gateway failed");
        std::process::exit(1);
    }
    tracing::info!("Done.");
}

async fn run(cfg: config::GatewayConfig) -> Result<()> {
    let listen = cfg.listen_addr();
    let state = AppState::new(cfg);
    let app = router::build_router(state);

    let listener = tokio::net::TcpListener::bind(&listen)
        .await
        .map_err(|e| UsageHookError::Internal(format!("failed to bind {listen}: {e}")))?;
    tracing::info!("Webhook listening at http://{listen}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| UsageHookError::Internal(format!("server failed: {e}")))?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!(signal = "SIGINT", "Received"),
        _ = terminate => tracing::info!(signal = "SIGTERM", "Received"),
    }
    tracing::info!("Shutdown server");
}
