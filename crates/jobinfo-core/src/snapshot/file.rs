use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use tracing::debug;

use super::{SnapshotError, render};
use crate::config::JobInfoConfig;
use crate::domain::JobRecord;
use crate::ports::{SnapshotSink, SystemUserDirectory, UserDirectory};

/// Writes snapshots to a single file, truncating it on every write.
///
/// There is no write-then-rename step, so a reader racing a write can see a
/// partial document.
#[derive(Debug, Clone)]
pub struct FileSnapshotWriter<U = SystemUserDirectory> {
    path: PathBuf,
    users: U,
}

impl FileSnapshotWriter<SystemUserDirectory> {
    pub fn from_config(config: &JobInfoConfig) -> Self {
        Self::new(config.data_file(), SystemUserDirectory)
    }
}

impl<U: UserDirectory> FileSnapshotWriter<U> {
    pub fn new(path: impl Into<PathBuf>, users: U) -> Self {
        Self {
            path: path.into(),
            users,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl<U: UserDirectory> SnapshotSink for FileSnapshotWriter<U> {
    fn write(&mut self, record: &JobRecord) -> Result<(), SnapshotError> {
        let user = self.users.user_name(record.user_id);
        let doc = render(record, user.as_deref());

        let file = File::create(&self.path).map_err(|source| SnapshotError::Open {
            path: self.path.clone(),
            source,
        })?;

        let mut out = BufWriter::new(file);
        out.write_all(doc.as_bytes())
            .and_then(|()| out.flush())
            .map_err(|source| SnapshotError::Write {
                path: self.path.clone(),
                source,
            })?;

        debug!(job_id = %record.job_id, path = %self.path.display(), "snapshot written");
        Ok(())
    }
}
