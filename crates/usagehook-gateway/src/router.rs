//! Axum router wiring.
//!
//! - `POST /user-model-metrics` : usage ingestion
//! - `GET  /healthz`            : liveness

use axum::{
    routing::{get, post},
    Router,
};

use crate::{app_state::AppState, ops, transport};

/// Ingestion endpoint path.
pub const INGEST_PATH: &str = "/user-model-metrics";

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(INGEST_PATH, post(transport::ingest::ingest))
        .route("/healthz", get(ops::healthz))
        .with_state(state)
}
