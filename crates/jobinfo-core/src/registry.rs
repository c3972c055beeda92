//! JobRegistry - the keyed collection of live job records.
//!
//! # Design
//! - Exclusive owner of every `JobRecord`; handing a record out of `remove`
//!   or `drain` transfers ownership to the caller.
//! - Ordered by job id (`BTreeMap`), so teardown releases jobs
//!   deterministically.
//! - Callers look up before inserting; `insert` refuses duplicate keys rather
//!   than replacing a live record.

use std::collections::{BTreeMap, btree_map};

use crate::domain::{JobId, JobRecord};
use crate::observability::RegistryCounts;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("job {0} is already tracked")]
    AlreadyTracked(JobId),

    #[error("job {0} is not tracked")]
    NotTracked(JobId),
}

#[derive(Debug, Default)]
pub struct JobRegistry {
    jobs: BTreeMap<JobId, JobRecord>,
}

impl JobRegistry {
    pub fn new() -> Self {
        Self {
            jobs: BTreeMap::new(),
        }
    }

    pub fn find(&self, job_id: JobId) -> Option<&JobRecord> {
        self.jobs.get(&job_id)
    }

    pub fn find_mut(&mut self, job_id: JobId) -> Option<&mut JobRecord> {
        self.jobs.get_mut(&job_id)
    }

    /// Insert a record under its own job id and return a handle to it.
    pub fn insert(&mut self, record: JobRecord) -> Result<&mut JobRecord, RegistryError> {
        match self.jobs.entry(record.job_id) {
            btree_map::Entry::Occupied(_) => Err(RegistryError::AlreadyTracked(record.job_id)),
            btree_map::Entry::Vacant(slot) => Ok(slot.insert(record)),
        }
    }

    /// Unlink a record and hand it back to the caller.
    pub fn remove(&mut self, job_id: JobId) -> Result<JobRecord, RegistryError> {
        self.jobs
            .remove(&job_id)
            .ok_or(RegistryError::NotTracked(job_id))
    }

    /// Remove every record in ascending job-id order.
    ///
    /// The registry is empty once this returns, even if the iterator is
    /// dropped before being exhausted.
    pub fn drain(&mut self) -> btree_map::IntoValues<JobId, JobRecord> {
        std::mem::take(&mut self.jobs).into_values()
    }

    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }

    pub fn job_ids(&self) -> Vec<JobId> {
        self.jobs.keys().copied().collect()
    }

    pub fn counts(&self) -> RegistryCounts {
        let mut counts = RegistryCounts::default();
        for record in self.jobs.values() {
            counts.tracked += 1;
            counts.tracked_tasks += record.task_pids.len();
            if record.init_count >= record.local_task_count {
                counts.populated += 1;
            }
        }
        counts
    }
}
