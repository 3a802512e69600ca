//! `tracing` subscriber installation.
//!
//! `RUST_LOG` wins when set; otherwise the configured level applies to every
//! target. Output goes to stdout with file and line of the call site, either
//! as text or as one JSON object per line.

use tracing_subscriber::{fmt, EnvFilter};
use usagehook_core::error::{Result, UsageHookError};

use crate::config::{LogFormat, LogSection};

fn filter(cfg: &LogSection) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cfg.level.as_str()))
}

/// Install the global subscriber. Fails if one is already installed.
pub fn init(cfg: &LogSection) -> Result<()> {
    let builder = fmt()
        .with_env_filter(filter(cfg))
        .with_file(true)
        .with_line_number(true);

    let res = match cfg.format {
        LogFormat::Text => builder.try_init(),
        LogFormat::Json => builder.json().try_init(),
    };
    res.map_err(|e| UsageHookError::Internal(format!("logging init failed: {e}")))
}
