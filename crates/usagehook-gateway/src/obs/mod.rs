//! Observability: log subscriber setup.

pub mod logging;
