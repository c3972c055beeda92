//! ScriptedEvent - a host event built from plain data.
//!
//! Used by tests and by the replay tool, where events are read from JSON:
//!
//! ```json
//! {"context": "remote", "items": {"job_id": 42, "task_pid": 111},
//!  "env": {"SLURM_JOB_NAME": "sim"}}
//! ```
//!
//! Items that are not listed are reported as unavailable, which is how a
//! failed host fetch is simulated.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::ports::{ExecContext, HostEvent, HostItem, ItemError};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptedEvent {
    #[serde(default = "remote")]
    pub context: ExecContext,

    #[serde(default)]
    pub items: ScriptedItems,

    #[serde(default)]
    pub env: BTreeMap<String, String>,
}

fn remote() -> ExecContext {
    ExecContext::Remote
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScriptedItems {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_step_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_uid: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_node_count: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_local_task_count: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_cpu_count: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_app_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task_pid: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task_exit_status: Option<i64>,
}

impl ScriptedItems {
    fn slot(&mut self, item: HostItem) -> &mut Option<i64> {
        match item {
            HostItem::JobId => &mut self.job_id,
            HostItem::JobStepId => &mut self.job_step_id,
            HostItem::JobUid => &mut self.job_uid,
            HostItem::JobNodeCount => &mut self.job_node_count,
            HostItem::JobLocalTaskCount => &mut self.job_local_task_count,
            HostItem::JobCpuCount => &mut self.job_cpu_count,
            HostItem::JobAppId => &mut self.job_app_id,
            HostItem::TaskPid => &mut self.task_pid,
            HostItem::TaskExitStatus => &mut self.task_exit_status,
        }
    }

    pub fn get(&self, item: HostItem) -> Option<i64> {
        match item {
            HostItem::JobId => self.job_id,
            HostItem::JobStepId => self.job_step_id,
            HostItem::JobUid => self.job_uid,
            HostItem::JobNodeCount => self.job_node_count,
            HostItem::JobLocalTaskCount => self.job_local_task_count,
            HostItem::JobCpuCount => self.job_cpu_count,
            HostItem::JobAppId => self.job_app_id,
            HostItem::TaskPid => self.task_pid,
            HostItem::TaskExitStatus => self.task_exit_status,
        }
    }
}

impl ScriptedEvent {
    pub fn new(context: ExecContext) -> Self {
        Self {
            context,
            items: ScriptedItems::default(),
            env: BTreeMap::new(),
        }
    }

    pub fn remote() -> Self {
        Self::new(ExecContext::Remote)
    }

    pub fn with(mut self, item: HostItem, value: i64) -> Self {
        *self.items.slot(item) = Some(value);
        self
    }

    pub fn without(mut self, item: HostItem) -> Self {
        *self.items.slot(item) = None;
        self
    }

    pub fn with_env(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.insert(name.into(), value.into());
        self
    }
}

impl Default for ScriptedEvent {
    fn default() -> Self {
        Self::remote()
    }
}

impl HostEvent for ScriptedEvent {
    fn context(&self) -> ExecContext {
        self.context
    }

    fn item(&self, item: HostItem) -> Result<i64, ItemError> {
        self.items.get(item).ok_or(ItemError::Unavailable(item))
    }

    fn env(&self, name: &str) -> Result<String, ItemError> {
        self.env
            .get(name)
            .cloned()
            .ok_or_else(|| ItemError::EnvMissing(name.to_string()))
    }
}
