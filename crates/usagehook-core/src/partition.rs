//! Week-partitioned storage paths.
//!
//! Layout: `<root>/UserModelMetrics/<isoYear>-<isoWeek>/<rfc3339-nanos>.json`.
//! The file stem carries nanosecond precision, which is what keeps two events
//! from ever landing on the same file.

use std::path::PathBuf;

use chrono::{DateTime, Datelike, SecondsFormat, Utc};

/// Directory under the data root holding all usage records.
pub const METRICS_DIR: &str = "UserModelMetrics";

/// ISO-8601 week partition name, e.g. `2025-1`. The week is not padded.
pub fn week_partition(ts: &DateTime<Utc>) -> String {
    let week = ts.iso_week();
    format!("{}-{}", week.year(), week.week())
}

/// File name for a record captured at `ts`.
pub fn record_file_name(ts: &DateTime<Utc>) -> String {
    format!("{}.json", ts.to_rfc3339_opts(SecondsFormat::Nanos, true))
}

/// Maps capture timestamps to record paths under a fixed data root. No I/O.
#[derive(Debug, Clone)]
pub struct PathDeriver {
    root: PathBuf,
}

impl PathDeriver {
    pub fn new(data_root: impl Into<PathBuf>) -> Self {
        Self {
            root: data_root.into(),
        }
    }

    pub fn derive(&self, ts: &DateTime<Utc>) -> PathBuf {
        self.root
            .join(METRICS_DIR)
            .join(week_partition(ts))
            .join(record_file_name(ts))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDate, TimeZone};

    fn utc(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 8, 30, 0).unwrap()
    }

    #[test]
    fn year_end_rolls_into_next_iso_year() {
        // Tuesday
        assert_eq!(week_partition(&utc(2024, 12, 31)), "2025-1");
        assert_eq!(week_partition(&utc(2024, 12, 29)), "2024-52");
    }

    #[test]
    fn year_start_can_belong_to_previous_iso_year() {
        // Friday 2021-01-01 sits in week 53 of 2020
        assert_eq!(week_partition(&utc(2021, 1, 1)), "2020-53");
        assert_eq!(week_partition(&utc(2021, 1, 4)), "2021-1");
    }

    #[test]
    fn single_digit_weeks_are_not_padded() {
        let ts = NaiveDate::from_ymd_opt(2025, 2, 3)
            .unwrap()
            .and_hms_milli_opt(10, 0, 0, 120)
            .unwrap()
            .and_utc();
        assert_eq!(week_partition(&ts), "2025-6");
        assert_eq!(week_partition(&utc(2025, 3, 10)), "2025-11");
    }

    #[test]
    fn file_name_has_nine_fraction_digits() {
        let ts = NaiveDate::from_ymd_opt(2024, 3, 5)
            .unwrap()
            .and_hms_nano_opt(7, 8, 9, 120)
            .unwrap()
            .and_utc();
        assert_eq!(record_file_name(&ts), "2024-03-05T07:08:09.000000120Z.json");
    }

    #[test]
    fn derive_is_rooted_and_partitioned() {
        let d = PathDeriver::new("/srv/data");
        let p = d.derive(&utc(2024, 12, 31));
        assert_eq!(
            p,
            PathBuf::from("/srv/data/UserModelMetrics/2025-1/2024-12-31T08:30:00.000000000Z.json")
        );
    }

    #[test]
    fn distinct_timestamps_give_distinct_paths() {
        let d = PathDeriver::new("data");
        let base = utc(2024, 6, 1);
        let mut seen = std::collections::HashSet::new();
        for n in 0..1000 {
            assert!(seen.insert(d.derive(&(base + Duration::nanoseconds(n)))));
        }
    }
}
