//! Writes event records to their week-partitioned path.
//!
//! Blocking std::fs I/O; callers on the runtime go through `spawn_blocking`.
//! No rename, no fsync. A file already sitting at the derived path is
//! overwritten, which only happens if two events share a nanosecond.

use std::fs::{DirBuilder, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;
use usagehook_core::{partition::PathDeriver, record::EventRecord, UsageHookError};

#[cfg(unix)]
const DIR_MODE: u32 = 0o777;
#[cfg(unix)]
const FILE_MODE: u32 = 0o644;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("serialize record failed: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("create directory {} failed: {source}", .path.display())]
    CreateDir { path: PathBuf, source: io::Error },
    #[error("write {} failed: {source}", .path.display())]
    Write { path: PathBuf, source: io::Error },
}

impl From<StoreError> for UsageHookError {
    fn from(e: StoreError) -> Self {
        UsageHookError::Storage(e.to_string())
    }
}

#[derive(Debug, Clone)]
pub struct RecordWriter {
    deriver: PathDeriver,
}

impl RecordWriter {
    pub fn new(deriver: PathDeriver) -> Self {
        Self { deriver }
    }

    /// Serialize and store `record`, returning the path written.
    pub fn write(&self, record: &EventRecord) -> Result<PathBuf, StoreError> {
        let buf = serde_json::to_vec(record)?;
        let path = self.deriver.derive(&record.captured_at());

        if let Some(dir) = path.parent() {
            create_dir_all(dir).map_err(|source| StoreError::CreateDir {
                path: dir.to_path_buf(),
                source,
            })?;
        }

        write_new(&path, &buf).map_err(|source| StoreError::Write {
            path: path.clone(),
            source,
        })?;

        tracing::info!(path = %path.display(), bytes = buf.len(), "wrote user model metrics");
        Ok(path)
    }
}

/// Recursive and race-tolerant: an existing directory is success.
fn create_dir_all(dir: &Path) -> io::Result<()> {
    let mut builder = DirBuilder::new();
    builder.recursive(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(DIR_MODE);
    }
    builder.create(dir)
}

fn write_new(path: &Path, buf: &[u8]) -> io::Result<()> {
    let mut opts = OpenOptions::new();
    opts.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        opts.mode(FILE_MODE);
    }
    let mut file = opts.open(path)?;
    file.write_all(buf)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::{Duration, TimeZone, Utc};
    use usagehook_core::record::UsagePayload;

    use super::*;

    fn record(model: &str, at: chrono::DateTime<Utc>) -> EventRecord {
        let payload = UsagePayload {
            model: model.into(),
            ..Default::default()
        };
        EventRecord::stamp(payload, at)
    }

    #[test]
    fn writes_under_week_partition() {
        let dir = tempfile::tempdir().unwrap();
        let writer = RecordWriter::new(PathDeriver::new(dir.path()));
        let at = Utc.with_ymd_and_hms(2024, 12, 31, 23, 59, 59).unwrap();

        let path = writer.write(&record("llama3", at)).unwrap();

        assert!(path.starts_with(dir.path().join("UserModelMetrics").join("2025-1")));
        let stored: serde_json::Value =
            serde_json::from_slice(&std::fs::read(&path).unwrap()).unwrap();
        assert_eq!(stored["model"], "llama3");
        assert_eq!(stored["created_at"], "2024-12-31T23:59:59Z");
    }

    #[cfg(unix)]
    #[test]
    fn file_is_not_executable() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let writer = RecordWriter::new(PathDeriver::new(dir.path()));
        let path = writer.write(&record("m", Utc::now())).unwrap();
        let mode = std::fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o111, 0);
    }

    #[test]
    fn concurrent_writes_share_partition_dir() {
        let dir = tempfile::tempdir().unwrap();
        let writer = Arc::new(RecordWriter::new(PathDeriver::new(dir.path())));
        let base = Utc.with_ymd_and_hms(2025, 3, 10, 12, 0, 0).unwrap();

        let handles: Vec<_> = (0..16)
            .map(|i| {
                let writer = Arc::clone(&writer);
                std::thread::spawn(move || writer.write(&record("m", base + Duration::nanoseconds(i))))
            })
            .collect();
        for h in handles {
            h.join().unwrap().unwrap();
        }

        let week = dir.path().join("UserModelMetrics").join("2025-11");
        assert_eq!(std::fs::read_dir(week).unwrap().count(), 16);
    }

    #[test]
    fn blocked_directory_reports_create_dir() {
        let dir = tempfile::tempdir().unwrap();
        // a regular file where the metrics directory should go
        std::fs::write(dir.path().join("UserModelMetrics"), b"").unwrap();
        let writer = RecordWriter::new(PathDeriver::new(dir.path()));

        let err = writer.write(&record("m", Utc::now())).unwrap_err();
        assert!(matches!(err, StoreError::CreateDir { .. }), "{err}");
        let err: UsageHookError = err.into();
        assert_eq!(err.client_code().http_status(), 500);
    }
}
