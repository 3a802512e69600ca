//! `WEBHOOK_*` environment overrides.
//!
//! Values are trimmed. Unparsable port or level values fall back to what is
//! already configured instead of failing startup.

use super::schema::{GatewayConfig, LogFormat, LogLevel};

pub const HOST_VAR: &str = "WEBHOOK_HOST";
pub const PORT_VAR: &str = "WEBHOOK_PORT";
pub const DATA_PATH_VAR: &str = "WEBHOOK_DATA_PATH";
pub const API_KEY_VAR: &str = "WEBHOOK_API_KEY";
pub const LOG_LEVEL_VAR: &str = "WEBHOOK_LOG_LEVEL";
pub const LOG_FORMAT_VAR: &str = "WEBHOOK_LOG_FORMAT";

pub fn apply_overrides<F>(cfg: &mut GatewayConfig, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(host) = lookup(HOST_VAR) {
        cfg.server.host = host.trim().to_string();
    }

    // zero and garbage are ignored
    if let Some(port) = lookup(PORT_VAR).and_then(|p| p.trim().parse::<u16>().ok()) {
        if port != 0 {
            cfg.server.port = port;
        }
    }

    if let Some(path) = lookup(DATA_PATH_VAR) {
        cfg.storage.data_path = path.trim().to_string();
    }

    if let Some(key) = lookup(API_KEY_VAR) {
        cfg.auth.api_key = key.trim().to_string();
    }

    if let Some(level) = lookup(LOG_LEVEL_VAR) {
        cfg.log.level = LogLevel::parse(&level).unwrap_or_default();
    }

    if let Some(format) = lookup(LOG_FORMAT_VAR) {
        cfg.log.format = if format.trim().eq_ignore_ascii_case("json") {
            LogFormat::Json
        } else {
            LogFormat::Text
        };
    }
}
