//! HostEvent port - what the host runtime hands us on each callback.
//!
//! The host (a job launcher's per-node agent) calls in with a handle from
//! which individual items are fetched one at a time. Every fetch can fail on
//! its own; a failed fetch never invalidates the others.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Execution context the callback was invoked in.
///
/// Only `Remote` (the per-node step daemon) sees task-level events. The
/// others either run before tasks exist or live in a different address space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExecContext {
    /// Loaded by the submitting launcher (the "local" part of a parallel job).
    Local,
    /// Loaded by the per-node step daemon.
    Remote,
    /// Loaded by an allocation utility.
    Allocator,
    /// Loaded by the node daemon itself; persists across jobs.
    Slurmd,
    /// Loaded for prolog/epilog scripts; no state shared with other contexts.
    JobScript,
}

impl ExecContext {
    pub fn is_node_local(self) -> bool {
        matches!(self, ExecContext::Remote)
    }
}

/// Numeric items a host event can supply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HostItem {
    JobId,
    JobStepId,
    JobUid,
    JobNodeCount,
    JobLocalTaskCount,
    JobCpuCount,
    JobAppId,
    TaskPid,
    /// Raw wait(2)-style status word.
    TaskExitStatus,
}

impl fmt::Display for HostItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            HostItem::JobId => "job_id",
            HostItem::JobStepId => "job_step_id",
            HostItem::JobUid => "job_uid",
            HostItem::JobNodeCount => "job_node_count",
            HostItem::JobLocalTaskCount => "job_local_task_count",
            HostItem::JobCpuCount => "job_cpu_count",
            HostItem::JobAppId => "job_app_id",
            HostItem::TaskPid => "task_pid",
            HostItem::TaskExitStatus => "task_exit_status",
        };
        f.write_str(name)
    }
}

/// Job environment variable holding the job name.
pub const JOB_NAME_ENV: &str = "SLURM_JOB_NAME";

#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum ItemError {
    #[error("host did not supply {0}")]
    Unavailable(HostItem),

    #[error("{item} value {value} is out of range")]
    OutOfRange { item: HostItem, value: i64 },

    #[error("environment variable {0} not set for job")]
    EnvMissing(String),
}

/// HostEvent is one callback invocation's view of the host.
pub trait HostEvent {
    fn context(&self) -> ExecContext;

    fn item(&self, item: HostItem) -> Result<i64, ItemError>;

    fn env(&self, name: &str) -> Result<String, ItemError>;

    /// Fetch an item as `u32`, treating values that don't fit as failures.
    fn item_u32(&self, item: HostItem) -> Result<u32, ItemError> {
        let value = self.item(item)?;
        u32::try_from(value).map_err(|_| ItemError::OutOfRange { item, value })
    }

    /// Fetch an item as `i32` (pids, raw wait status).
    fn item_i32(&self, item: HostItem) -> Result<i32, ItemError> {
        let value = self.item(item)?;
        i32::try_from(value).map_err(|_| ItemError::OutOfRange { item, value })
    }
}
