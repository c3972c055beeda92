use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryCounts {
    pub tracked: usize,
    pub populated: usize,
    pub tracked_tasks: usize,
}

/// Per-controller event tallies, reported by the replay tool.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControllerStats {
    pub events: u64,
    pub ignored: u64,
    pub snapshots_written: u64,
    pub snapshot_failures: u64,
    pub jobs_exited: u64,
    /// Task-inits carrying a pid the job had already recorded.
    pub duplicate_task_pids: u64,
}
