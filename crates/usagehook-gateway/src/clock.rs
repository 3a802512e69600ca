//! Receipt-time source.

use chrono::{DateTime, Utc};

/// Supplies the server receipt time stamped on every record.
pub trait Clock: Send + Sync + 'static {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock in UTC.
///
/// Path uniqueness relies on this clock ticking in nanoseconds, which holds on
/// Linux. Where the system clock is coarser (macOS reports microseconds),
/// events arriving within one tick derive the same path and the later write
/// replaces the earlier one.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
