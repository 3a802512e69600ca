//! Record persistence (one JSON file per event).

pub mod writer;

pub use writer::{RecordWriter, StoreError};
