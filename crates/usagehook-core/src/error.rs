//! Shared error type across usagehook crates.

use thiserror::Error;

use crate::auth::AuthRejection;

/// Client-facing error codes (stable API).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientCode {
    /// Missing, malformed or wrong bearer token.
    Unauthorized,
    /// Body could not be read or decoded.
    BadRequest,
    /// Server-side failure (storage, startup).
    Internal,
}

impl ClientCode {
    /// String representation used in logs and tests.
    pub fn as_str(self) -> &'static str {
        match self {
            ClientCode::Unauthorized => "UNAUTHORIZED",
            ClientCode::BadRequest => "BAD_REQUEST",
            ClientCode::Internal => "INTERNAL",
        }
    }

    /// HTTP status code carried by responses with this code.
    pub fn http_status(self) -> u16 {
        match self {
            ClientCode::Unauthorized => 401,
            ClientCode::BadRequest => 400,
            ClientCode::Internal => 500,
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, UsageHookError>;

/// Unified error type used by core and gateway.
#[derive(Debug, Error)]
pub enum UsageHookError {
    #[error("{0}")]
    Unauthorized(AuthRejection),
    #[error("failed to read payload: {0}")]
    PayloadRead(String),
    #[error("failed to parse payload: {0}")]
    MalformedPayload(String),
    #[error("storage: {0}")]
    Storage(String),
    #[error("config: {0}")]
    Config(String),
    #[error("internal: {0}")]
    Internal(String),
}

impl UsageHookError {
    /// Map internal error to a stable client-facing code.
    pub fn client_code(&self) -> ClientCode {
        match self {
            UsageHookError::Unauthorized(_) => ClientCode::Unauthorized,
            UsageHookError::PayloadRead(_) | UsageHookError::MalformedPayload(_) => {
                ClientCode::BadRequest
            }
            UsageHookError::Storage(_) | UsageHookError::Config(_) | UsageHookError::Internal(_) => {
                ClientCode::Internal
            }
        }
    }

    /// Plain-text body returned to the caller.
    ///
    /// Storage and internal details stay in the logs.
    pub fn client_message(&self) -> String {
        match self {
            UsageHookError::Unauthorized(reason) => reason.message().to_string(),
            UsageHookError::PayloadRead(_) => "Failed to read payload".to_string(),
            UsageHookError::MalformedPayload(diag) => format!("Failed to parse payload: {diag}"),
            UsageHookError::Storage(_) => "Failed to store payload".to_string(),
            UsageHookError::Config(_) | UsageHookError::Internal(_) => {
                "Internal server error".to_string()
            }
        }
    }
}
