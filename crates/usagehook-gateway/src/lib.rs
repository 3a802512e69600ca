//! usagehook gateway library entry.
//!
//! Wires configuration, authentication, the bounded payload reader, and the
//! week-partitioned record writer into an axum service. It is consumed by the
//! binary (`main.rs`) and by integration tests.

pub mod app_state;
pub mod clock;
pub mod config;
pub mod obs;
pub mod ops;
pub mod router;
pub mod storage;
pub mod transport;
