//! Snapshot - the flat `KEY=value` job document consumed by the sampler.
//!
//! # Format
//! One key per line, in this order:
//! `JOB_ID, JOB_STEP_ID, JOB_STATUS, JOB_APP_ID, JOB_USER_ID, JOB_START,
//! JOB_END, JOB_EXIT, JOB_NNODES, JOB_LOCAL_TASK_COUNT, JOB_NCPUS, JOB_NAME,
//! JOB_USER, JOB_PIDS`.
//! Text values (`JOB_NAME`, `JOB_USER`, `JOB_PIDS`) are double-quoted.

mod file;
mod render;

pub use file::FileSnapshotWriter;
pub use render::{ANONYMOUS_USER, SNAPSHOT_KEYS, render};

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    #[error("cannot open snapshot file {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed writing snapshot file {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl SnapshotError {
    pub fn io_error(&self) -> &std::io::Error {
        match self {
            SnapshotError::Open { source, .. } | SnapshotError::Write { source, .. } => source,
        }
    }

    /// Raw OS error code, when the failure came from the OS.
    pub fn os_code(&self) -> Option<i32> {
        self.io_error().raw_os_error()
    }
}
