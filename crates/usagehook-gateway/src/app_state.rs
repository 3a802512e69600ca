//! Shared application state for the usagehook gateway.
//!
//! Everything in here is built once at startup and read-only afterwards;
//! handlers share it through cheap `Arc` clones.

use std::sync::Arc;

use usagehook_core::{auth::Authenticator, partition::PathDeriver};

use crate::clock::{Clock, SystemClock};
use crate::config::GatewayConfig;
use crate::storage::RecordWriter;

#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
    clock: Arc<dyn Clock>,
}

struct AppStateInner {
    cfg: GatewayConfig,
    auth: Authenticator,
    writer: RecordWriter,
}

impl AppState {
    pub fn new(cfg: GatewayConfig) -> Self {
        Self::with_clock(cfg, Arc::new(SystemClock))
    }

    /// Build state with an explicit receipt-time source.
    pub fn with_clock(cfg: GatewayConfig, clock: Arc<dyn Clock>) -> Self {
        let auth = Authenticator::new(cfg.auth.api_key.clone());
        if !auth.is_enabled() {
            tracing::warn!("no API key configured, authentication is disabled");
        }

        let writer = RecordWriter::new(PathDeriver::new(&cfg.storage.data_path));

        Self {
            inner: Arc::new(AppStateInner { cfg, auth, writer }),
            clock,
        }
    }

    pub fn auth(&self) -> &Authenticator {
        &self.inner.auth
    }

    pub fn writer(&self) -> &RecordWriter {
        &self.inner.writer
    }

    pub fn max_payload_bytes(&self) -> usize {
        self.inner.cfg.limits.max_payload_bytes
    }

    pub fn clock(&self) -> Arc<dyn Clock> {
        Arc::clone(&self.clock)
    }
}
