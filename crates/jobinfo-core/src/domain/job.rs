//! Job record and population tracking.

use std::collections::TryReserveError;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ids::JobId;
use super::state::JobStatus;

/// Job record: everything this node knows about one job.
///
/// Design:
/// - Single source of truth for the job's snapshot fields.
/// - State transitions via methods (not direct field access).
/// - Owns its pid list and name; dropping the record releases both.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobRecord {
    pub job_id: JobId,
    pub app_id: u32,
    pub step_id: u32,
    pub user_id: u32,
    pub node_count: u32,
    pub cpu_count: u32,

    /// Tasks the host announced for this node.
    pub local_task_count: u32,

    /// Task-init events observed so far.
    pub init_count: u32,

    /// Task pids in task-init arrival order.
    pub task_pids: Vec<i32>,

    pub status: JobStatus,
    pub exit_status: u32,

    pub started_at: DateTime<Utc>,

    /// Set only once the job has exited.
    pub ended_at: Option<DateTime<Utc>>,

    pub name: Option<String>,
}

/// Metadata carried by a job-create event.
///
/// Each field is `None` when the host could not supply it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JobMetadata {
    pub app_id: Option<u32>,
    pub step_id: Option<u32>,
    pub user_id: Option<u32>,
    pub node_count: Option<u32>,
    pub local_task_count: Option<u32>,
    pub cpu_count: Option<u32>,
    pub name: Option<String>,
}

/// Where the record stands after one task-init.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Population {
    /// More task-init events are expected.
    Pending { remaining: u32 },

    /// This task-init made the count reach the expected local task count.
    Complete,

    /// More task-init events than announced tasks.
    OverCount { excess: u32 },
}

impl JobRecord {
    pub fn new(job_id: JobId, now: DateTime<Utc>) -> Self {
        Self {
            job_id,
            app_id: 0,
            step_id: 0,
            user_id: 0,
            node_count: 0,
            cpu_count: 0,
            local_task_count: 0,
            init_count: 0,
            task_pids: Vec::new(),
            status: JobStatus::Started,
            exit_status: 0,
            started_at: now,
            ended_at: None,
            name: None,
        }
    }

    /// Apply create-event metadata.
    ///
    /// Fields the host failed to supply keep their current value (zero/absent
    /// for a fresh record). Accumulated pids and `init_count` are preserved so
    /// a repeated create does not lose task progress.
    pub fn populate(&mut self, meta: JobMetadata, now: DateTime<Utc>) {
        let JobMetadata {
            app_id,
            step_id,
            user_id,
            node_count,
            local_task_count,
            cpu_count,
            name,
        } = meta;

        if let Some(v) = app_id {
            self.app_id = v;
        }
        if let Some(v) = step_id {
            self.step_id = v;
        }
        if let Some(v) = user_id {
            self.user_id = v;
        }
        if let Some(v) = node_count {
            self.node_count = v;
        }
        if let Some(v) = local_task_count {
            self.local_task_count = v;
        }
        if let Some(v) = cpu_count {
            self.cpu_count = v;
        }
        if name.is_some() {
            self.name = name;
        }
        self.started_at = now;
    }

    /// Record one task-init.
    ///
    /// The pid slot is reserved before anything is mutated, so an allocation
    /// failure leaves the record untouched.
    pub fn record_task_init(&mut self, pid: i32) -> Result<Population, TryReserveError> {
        self.task_pids.try_reserve(1)?;
        self.task_pids.push(pid);
        self.init_count = self.init_count.saturating_add(1);
        Ok(self.population())
    }

    pub fn population(&self) -> Population {
        use std::cmp::Ordering;

        match self.init_count.cmp(&self.local_task_count) {
            Ordering::Less => Population::Pending {
                remaining: self.local_task_count - self.init_count,
            },
            Ordering::Equal => Population::Complete,
            Ordering::Greater => Population::OverCount {
                excess: self.init_count - self.local_task_count,
            },
        }
    }

    pub fn has_pid(&self, pid: i32) -> bool {
        self.task_pids.contains(&pid)
    }

    /// Mark the job as exited. Returns `false` if it already was.
    pub fn mark_exited(&mut self, exit_status: u32, now: DateTime<Utc>) -> bool {
        if self.status.is_terminal() {
            return false;
        }
        self.status = JobStatus::Exited;
        self.exit_status = exit_status;
        self.ended_at = Some(now);
        true
    }
}
