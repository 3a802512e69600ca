//! Gateway config loader (strict parsing + environment overrides).
//!
//! Resolution order: built-in defaults, then the YAML file named by
//! `WEBHOOK_CONFIG` (if any), then the `WEBHOOK_*` variables. The result is
//! validated once and never reloaded.

pub mod env;
pub mod schema;

use std::fs;

use usagehook_core::error::{Result, UsageHookError};

pub use schema::{
    AuthSection, GatewayConfig, LimitsSection, LogFormat, LogLevel, LogSection, ServerSection,
    StorageSection,
};

/// Variable naming an optional YAML config file.
pub const CONFIG_FILE_VAR: &str = "WEBHOOK_CONFIG";

/// Load from the process environment.
pub fn load() -> Result<GatewayConfig> {
    load_with(|key| std::env::var(key).ok())
}

/// Load using `lookup` in place of the process environment.
pub fn load_with<F>(lookup: F) -> Result<GatewayConfig>
where
    F: Fn(&str) -> Option<String>,
{
    let mut cfg = match lookup(CONFIG_FILE_VAR) {
        Some(path) if !path.trim().is_empty() => parse_str(&read_file(path.trim())?)?,
        _ => GatewayConfig::default(),
    };
    env::apply_overrides(&mut cfg, &lookup);
    cfg.validate()?;
    Ok(cfg)
}

pub fn load_from_str(s: &str) -> Result<GatewayConfig> {
    let cfg = parse_str(s)?;
    cfg.validate()?;
    Ok(cfg)
}

fn read_file(path: &str) -> Result<String> {
    fs::read_to_string(path)
        .map_err(|e| UsageHookError::Config(format!("read config {path} failed: {e}")))
}

fn parse_str(s: &str) -> Result<GatewayConfig> {
    serde_yaml::from_str(s).map_err(|e| UsageHookError::Config(format!("invalid yaml: {e}")))
}
