//! RecordingSink - keeps snapshots in memory instead of writing a file.

use std::io;
use std::path::PathBuf;

use crate::domain::JobRecord;
use crate::ports::SnapshotSink;
use crate::snapshot::SnapshotError;

/// In-memory sink.
///
/// Every successful write is kept in order. `failing` makes every write fail
/// with the given error kind, for exercising the error path.
#[derive(Debug, Default)]
pub struct RecordingSink {
    snapshots: Vec<JobRecord>,
    fail_with: Option<io::ErrorKind>,
    attempts: usize,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing(kind: io::ErrorKind) -> Self {
        Self {
            fail_with: Some(kind),
            ..Self::default()
        }
    }

    pub fn snapshots(&self) -> &[JobRecord] {
        &self.snapshots
    }

    /// Calls to `write`, successful or not.
    pub fn attempts(&self) -> usize {
        self.attempts
    }

    pub fn take(&mut self) -> Vec<JobRecord> {
        std::mem::take(&mut self.snapshots)
    }
}

impl SnapshotSink for RecordingSink {
    fn write(&mut self, record: &JobRecord) -> Result<(), SnapshotError> {
        self.attempts += 1;
        if let Some(kind) = self.fail_with {
            return Err(SnapshotError::Open {
                path: PathBuf::from("<recording>"),
                source: io::Error::from(kind),
            });
        }
        self.snapshots.push(record.clone());
        Ok(())
    }
}
