//! Static bearer-token authentication.
//!
//! An empty secret disables authentication entirely: every request is let
//! through. Operators opt into that explicitly by leaving the key unset.
//!
//! The comparison is plain string equality.
// TODO: constant-time comparison to close the timing side channel on the key.

use std::fmt;

use crate::error::{Result, UsageHookError};

/// Why a request was turned away.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthRejection {
    /// No `Authorization` header (or an empty one).
    MissingHeader,
    /// Header present but not `Bearer <token>`.
    MalformedHeader,
    /// Token does not match the configured secret.
    InvalidKey,
}

impl AuthRejection {
    /// Short reason used in log fields.
    pub fn reason(self) -> &'static str {
        match self {
            AuthRejection::MissingHeader => "missing header",
            AuthRejection::MalformedHeader => "malformed header",
            AuthRejection::InvalidKey => "invalid key",
        }
    }

    /// Human-readable body sent with the 401. Never mentions the expected key.
    pub fn message(self) -> &'static str {
        match self {
            AuthRejection::MissingHeader => "Unauthorized: Missing Authorization header",
            AuthRejection::MalformedHeader => "Unauthorized: Invalid Authorization header format",
            AuthRejection::InvalidKey => "Unauthorized: Invalid API key",
        }
    }
}

impl fmt::Display for AuthRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Verifies `Authorization` headers against a shared secret.
#[derive(Clone, Default)]
pub struct Authenticator {
    api_key: Option<String>,
}

impl fmt::Debug for Authenticator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Authenticator")
            .field("enabled", &self.is_enabled())
            .finish()
    }
}

impl Authenticator {
    /// Build from the configured secret. An empty secret disables checks.
    pub fn new(api_key: impl Into<String>) -> Self {
        let api_key = api_key.into();
        Self {
            api_key: (!api_key.is_empty()).then_some(api_key),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.api_key.is_some()
    }

    /// Check the raw `Authorization` header value, if one was sent.
    pub fn verify<H: AsRef<[u8]>>(&self, header: Option<H>) -> Result<()> {
        let Some(expected) = self.api_key.as_deref() else {
            return Ok(());
        };

        let raw: Option<&[u8]> = header.as_ref().map(|h| h.as_ref());
        let raw = match raw {
            None | Some([]) => return Err(reject(AuthRejection::MissingHeader)),
            Some(raw) => raw,
        };

        let value = std::str::from_utf8(raw).map_err(|_| reject(AuthRejection::MalformedHeader))?;

        // format: "<scheme> <token>", scheme compared case-insensitively
        let (scheme, token) = value
            .split_once(' ')
            .ok_or_else(|| reject(AuthRejection::MalformedHeader))?;
        if !scheme.eq_ignore_ascii_case("bearer") {
            return Err(reject(AuthRejection::MalformedHeader));
        }

        if token.trim() != expected {
            return Err(reject(AuthRejection::InvalidKey));
        }
        Ok(())
    }
}

fn reject(reason: AuthRejection) -> UsageHookError {
    UsageHookError::Unauthorized(reason)
}
