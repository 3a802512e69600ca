//! Transport layer (HTTP ingestion).
//!
//! Exposes the ingest handler, the bounded body reader it uses, and the
//! plain-text error response mapping.

pub mod codec;
pub mod ingest;
pub mod response;
