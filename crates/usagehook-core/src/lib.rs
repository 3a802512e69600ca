//! usagehook core: runtime-free building blocks of the ingestion path.
//!
//! This crate owns the event record, bearer-token authentication, bounded
//! payload decoding, and the week-partitioned storage path derivation. It has
//! no transport, runtime or filesystem dependencies so the same rules can be
//! exercised directly from tests and reused by other front ends.
//!
//! Request bodies come straight from the network, so clippy rejects
//! `unwrap`, `expect` and `panic!` anywhere in this crate. A bad body turns
//! into a `UsageHookError` and fails its own request, never the process.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod auth;
pub mod error;
pub mod partition;
pub mod payload;
pub mod record;

/// Shared result type.
pub use error::{Result, UsageHookError};
