//! usagehook: single dependency for embedding the receiver.
//!
//! `core` holds the pure ingestion rules (token check, payload decoding,
//! storage paths); `gateway` holds the axum service that runs them.

pub use usagehook_core as core;
pub use usagehook_gateway as gateway;
