//! Job status and exit status decoding.

use serde::{Deserialize, Serialize};

/// Job status as seen by this node.
///
/// State transitions:
/// - Started -> Exited (exactly once, irreversible)
///
/// The numeric codes are written as `JOB_STATUS` in the snapshot and are part
/// of the external contract. Do not renumber.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    /// Job created on this node; tasks may still be initializing.
    Started,

    /// The job's tasks have exited. Terminal.
    Exited,
}

impl JobStatus {
    pub const STARTED_CODE: u32 = 1;
    pub const EXITED_CODE: u32 = 2;

    /// Stable external code for the snapshot file.
    pub fn code(self) -> u32 {
        match self {
            JobStatus::Started => Self::STARTED_CODE,
            JobStatus::Exited => Self::EXITED_CODE,
        }
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, JobStatus::Exited)
    }
}

/// Exit status decoding for the host's wait(2)-style status word.
pub struct ExitStatus;

impl ExitStatus {
    /// Extract the process exit code (bits 8..16). Signal information in the
    /// low bits is discarded, so a signal-terminated task yields 0.
    pub fn from_wait_status(raw: i32) -> u32 {
        ((raw >> 8) & 0xff) as u32
    }
}
