//! LifecycleController - the callback-driven job state machine.
//!
//! # Callbacks
//! - `job_create`: create (or re-populate) the job's record
//! - `task_init` / `task_init_privileged`: record one task; snapshot on
//!   population-complete
//! - `task_exit`: final snapshot, then retire the record
//!
//! Every entry point returns `HostStatus::Success`. Internal failures are
//! logged, never surfaced, because failing the host call can abort the job.
//!
//! Only node-local (`Remote`) invocations do anything. The other contexts
//! have no task information and running there would duplicate state.

use tracing::{debug, info, warn};

use crate::domain::{
    ExitStatus, JobId, JobInfoError, JobMetadata, JobRecord, JobStatus, Population,
};
use crate::observability::ControllerStats;
use crate::ports::{
    Clock, ExecContext, HostEvent, HostItem, JOB_NAME_ENV, SnapshotSink, SystemClock,
};
use crate::registry::JobRegistry;

/// What the host sees. Deliberately has no failure variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostStatus {
    Success,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    /// Invoked outside the per-node step context.
    NotNodeLocal(ExecContext),

    /// Create event with a zero (or unreadable) node count.
    NoAllocation,

    /// No record for this job: its create was missed or it already exited.
    UnknownJob(JobId),
}

/// Result of a snapshot attempt made while handling an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapshotWrite {
    NotDue,
    Written,
    Failed,
}

/// What one event did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Ignored(IgnoreReason),
    Created(JobId),
    Repopulated(JobId),
    TaskRecorded {
        job_id: JobId,
        population: Population,
        snapshot: SnapshotWrite,
    },
    Exited {
        job_id: JobId,
        exit_status: u32,
        snapshot: SnapshotWrite,
    },
}

pub struct LifecycleController<S, C = SystemClock> {
    registry: JobRegistry,
    sink: S,
    clock: C,
    stats: ControllerStats,
}

impl<S: SnapshotSink, C: Clock> LifecycleController<S, C> {
    /// Set up with an empty registry.
    pub fn new(sink: S, clock: C) -> Self {
        Self {
            registry: JobRegistry::new(),
            sink,
            clock,
            stats: ControllerStats::default(),
        }
    }

    // ------------------------------------------------------------------
    // Host entry points
    // ------------------------------------------------------------------

    pub fn job_create(&mut self, event: &dyn HostEvent) -> HostStatus {
        let result = self.handle_job_create(event);
        self.finish("job_create", result)
    }

    pub fn task_init(&mut self, event: &dyn HostEvent) -> HostStatus {
        let result = self.handle_task_init(event);
        self.finish("task_init", result)
    }

    /// Same handling as `task_init`.
    ///
    /// If the host delivers both for one task, the task is counted twice.
    /// A repeated pid is logged so that shows up in the field.
    pub fn task_init_privileged(&mut self, event: &dyn HostEvent) -> HostStatus {
        let result = self.handle_task_init(event);
        self.finish("task_init_privileged", result)
    }

    pub fn task_exit(&mut self, event: &dyn HostEvent) -> HostStatus {
        let result = self.handle_task_exit(event);
        self.finish("task_exit", result)
    }

    /// Teardown: release every record still tracked (jobs whose exit was
    /// never observed). Returns how many were released.
    pub fn shutdown(&mut self) -> usize {
        let mut released = 0;
        for record in self.registry.drain() {
            info!(
                job_id = %record.job_id,
                init_count = record.init_count,
                local_task_count = record.local_task_count,
                "releasing job that never exited"
            );
            released += 1;
        }
        released
    }

    // ------------------------------------------------------------------
    // Event handling
    // ------------------------------------------------------------------

    pub fn handle_job_create(&mut self, event: &dyn HostEvent) -> Result<Outcome, JobInfoError> {
        if let Some(ignored) = not_node_local(event) {
            return Ok(ignored);
        }

        let node_count = fetch_u32(event, HostItem::JobNodeCount);
        if node_count.unwrap_or(0) == 0 {
            return Ok(Outcome::Ignored(IgnoreReason::NoAllocation));
        }

        let job_id = fetch_job_id(event)?;
        let meta = JobMetadata {
            app_id: fetch_optional_u32(event, HostItem::JobAppId),
            step_id: fetch_u32(event, HostItem::JobStepId),
            user_id: fetch_u32(event, HostItem::JobUid),
            node_count,
            local_task_count: fetch_u32(event, HostItem::JobLocalTaskCount),
            cpu_count: fetch_u32(event, HostItem::JobCpuCount),
            name: fetch_job_name(event),
        };
        let now = self.clock.now();

        // A repeated create reuses the live record instead of replacing it.
        if let Some(record) = self.registry.find_mut(job_id) {
            record.populate(meta, now);
            info!(%job_id, "job re-populated by repeated create");
            return Ok(Outcome::Repopulated(job_id));
        }

        let mut record = JobRecord::new(job_id, now);
        record.populate(meta, now);
        let record = self.registry.insert(record)?;
        info!(
            %job_id,
            step_id = record.step_id,
            node_count = record.node_count,
            local_task_count = record.local_task_count,
            "job created"
        );
        Ok(Outcome::Created(job_id))
    }

    pub fn handle_task_init(&mut self, event: &dyn HostEvent) -> Result<Outcome, JobInfoError> {
        if let Some(ignored) = not_node_local(event) {
            return Ok(ignored);
        }

        let job_id = fetch_job_id(event)?;
        let Some(record) = self.registry.find_mut(job_id) else {
            return Ok(Outcome::Ignored(IgnoreReason::UnknownJob(job_id)));
        };

        if let Some(step_id) = fetch_u32(event, HostItem::JobStepId) {
            record.step_id = step_id;
        }
        // An unreadable pid is recorded as 0 but never counts as a duplicate.
        let pid = fetch_i32(event, HostItem::TaskPid);
        if let Some(pid) = pid
            && record.has_pid(pid)
        {
            self.stats.duplicate_task_pids += 1;
            warn!(%job_id, pid, "task pid already recorded, task-init delivered twice?");
        }

        let population = record.record_task_init(pid.unwrap_or(0))?;
        let snapshot = match population {
            Population::Complete => {
                info!(%job_id, tasks = record.init_count, "job population complete");
                emit(&mut self.sink, &mut self.stats, record)
            }
            Population::OverCount { excess } => {
                warn!(
                    %job_id,
                    excess,
                    local_task_count = record.local_task_count,
                    "more task-init events than local tasks"
                );
                SnapshotWrite::NotDue
            }
            Population::Pending { .. } => SnapshotWrite::NotDue,
        };

        Ok(Outcome::TaskRecorded {
            job_id,
            population,
            snapshot,
        })
    }

    pub fn handle_task_exit(&mut self, event: &dyn HostEvent) -> Result<Outcome, JobInfoError> {
        if let Some(ignored) = not_node_local(event) {
            return Ok(ignored);
        }

        let job_id = fetch_job_id(event)?;
        let now = self.clock.now();
        let Some(record) = self.registry.find_mut(job_id) else {
            return Ok(Outcome::Ignored(IgnoreReason::UnknownJob(job_id)));
        };

        let raw = fetch_i32(event, HostItem::TaskExitStatus).unwrap_or(0);
        let exit_status = ExitStatus::from_wait_status(raw);
        record.mark_exited(exit_status, now);
        debug_assert_eq!(record.status, JobStatus::Exited);

        let snapshot = emit(&mut self.sink, &mut self.stats, record);

        let record = self.registry.remove(job_id)?;
        self.stats.jobs_exited += 1;
        info!(
            %job_id,
            exit_status,
            tasks = record.task_pids.len(),
            "job exited"
        );

        Ok(Outcome::Exited {
            job_id,
            exit_status,
            snapshot,
        })
    }

    fn finish(
        &mut self,
        callback: &'static str,
        result: Result<Outcome, JobInfoError>,
    ) -> HostStatus {
        self.stats.events += 1;
        match result {
            Ok(Outcome::Ignored(reason)) => {
                self.stats.ignored += 1;
                debug!(callback, ?reason, "event ignored");
            }
            Ok(outcome) => debug!(callback, ?outcome, "event handled"),
            Err(err) => warn!(callback, error = %err, "event abandoned"),
        }
        HostStatus::Success
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    pub fn registry(&self) -> &JobRegistry {
        &self.registry
    }

    pub fn stats(&self) -> &ControllerStats {
        &self.stats
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }
}

/// Write a snapshot; failures are counted and logged, never propagated.
fn emit<S: SnapshotSink>(
    sink: &mut S,
    stats: &mut ControllerStats,
    record: &JobRecord,
) -> SnapshotWrite {
    match sink.write(record) {
        Ok(()) => {
            stats.snapshots_written += 1;
            SnapshotWrite::Written
        }
        Err(err) => {
            stats.snapshot_failures += 1;
            warn!(
                job_id = %record.job_id,
                error = %err,
                os_code = err.os_code(),
                "snapshot write failed"
            );
            SnapshotWrite::Failed
        }
    }
}

fn not_node_local(event: &dyn HostEvent) -> Option<Outcome> {
    let context = event.context();
    (!context.is_node_local()).then_some(Outcome::Ignored(IgnoreReason::NotNodeLocal(context)))
}

fn fetch_job_id(event: &dyn HostEvent) -> Result<JobId, JobInfoError> {
    event
        .item_u32(HostItem::JobId)
        .map(JobId::new)
        .map_err(JobInfoError::MissingJobId)
}

fn fetch_u32(event: &dyn HostEvent, item: HostItem) -> Option<u32> {
    event
        .item_u32(item)
        .inspect_err(|err| warn!(%item, error = %err, "field unavailable, using default"))
        .ok()
}

fn fetch_i32(event: &dyn HostEvent, item: HostItem) -> Option<i32> {
    event
        .item_i32(item)
        .inspect_err(|err| warn!(%item, error = %err, "field unavailable, using default"))
        .ok()
}

/// Items routinely missing on some hosts; logged quietly.
fn fetch_optional_u32(event: &dyn HostEvent, item: HostItem) -> Option<u32> {
    event
        .item_u32(item)
        .inspect_err(|err| debug!(%item, error = %err, "optional field unavailable"))
        .ok()
}

fn fetch_job_name(event: &dyn HostEvent) -> Option<String> {
    event
        .env(JOB_NAME_ENV)
        .inspect_err(|err| debug!(error = %err, "job name unavailable"))
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::impls::{RecordingSink, ScriptedEvent};
    use crate::ports::FixedClock;
    use chrono::{Duration, TimeZone, Utc};
    use rstest::rstest;

    fn controller() -> LifecycleController<RecordingSink, FixedClock> {
        let clock = FixedClock::new(Utc.timestamp_opt(1_000, 0).unwrap());
        LifecycleController::new(RecordingSink::new(), clock)
    }

    fn create(job: i64, local_tasks: i64) -> ScriptedEvent {
        ScriptedEvent::remote()
            .with(HostItem::JobId, job)
            .with(HostItem::JobStepId, 0)
            .with(HostItem::JobUid, 1000)
            .with(HostItem::JobNodeCount, 2)
            .with(HostItem::JobLocalTaskCount, local_tasks)
            .with(HostItem::JobCpuCount, 4)
            .with_env(JOB_NAME_ENV, "sim")
    }

    fn task(job: i64, pid: i64) -> ScriptedEvent {
        ScriptedEvent::remote()
            .with(HostItem::JobId, job)
            .with(HostItem::JobStepId, 0)
            .with(HostItem::TaskPid, pid)
    }

    fn exit(job: i64, raw_status: i64) -> ScriptedEvent {
        ScriptedEvent::remote()
            .with(HostItem::JobId, job)
            .with(HostItem::TaskExitStatus, raw_status)
    }

    #[test]
    fn create_tracks_a_new_job() {
        let mut ctl = controller();
        let outcome = ctl.handle_job_create(&create(42, 2)).unwrap();

        assert_eq!(outcome, Outcome::Created(JobId::new(42)));
        let record = ctl.registry().find(JobId::new(42)).unwrap();
        assert_eq!(record.node_count, 2);
        assert_eq!(record.local_task_count, 2);
        assert_eq!(record.cpu_count, 4);
        assert_eq!(record.user_id, 1000);
        assert_eq!(record.name.as_deref(), Some("sim"));
        assert_eq!(record.status, JobStatus::Started);
        assert_eq!(record.started_at.timestamp(), 1_000);
    }

    #[test]
    fn create_with_zero_nodes_is_ignored() {
        let mut ctl = controller();
        let event = create(42, 2).with(HostItem::JobNodeCount, 0);

        let outcome = ctl.handle_job_create(&event).unwrap();
        assert_eq!(outcome, Outcome::Ignored(IgnoreReason::NoAllocation));
        assert!(ctl.registry().is_empty());
    }

    #[test]
    fn create_with_zero_nodes_leaves_existing_record_alone() {
        let mut ctl = controller();
        ctl.handle_job_create(&create(42, 2)).unwrap();

        let event = create(42, 9).with(HostItem::JobNodeCount, 0);
        ctl.handle_job_create(&event).unwrap();

        assert_eq!(ctl.registry().len(), 1);
        assert_eq!(ctl.registry().find(JobId::new(42)).unwrap().local_task_count, 2);
    }

    #[test]
    fn repeated_create_reuses_the_record() {
        let mut ctl = controller();
        ctl.handle_job_create(&create(42, 2)).unwrap();
        ctl.handle_task_init(&task(42, 111)).unwrap();

        let outcome = ctl
            .handle_job_create(&create(42, 2).with(HostItem::JobCpuCount, 8))
            .unwrap();

        assert_eq!(outcome, Outcome::Repopulated(JobId::new(42)));
        assert_eq!(ctl.registry().len(), 1);
        let record = ctl.registry().find(JobId::new(42)).unwrap();
        assert_eq!(record.cpu_count, 8);
        assert_eq!(record.task_pids, vec![111]);
    }

    #[rstest]
    #[case::missing(None)]
    #[case::negative(Some(-1))]
    #[case::too_large(Some(i64::from(u32::MAX) + 1))]
    fn create_without_usable_node_count_is_ignored(#[case] node_count: Option<i64>) {
        let mut ctl = controller();
        let event = match node_count {
            Some(value) => create(42, 2).with(HostItem::JobNodeCount, value),
            None => create(42, 2).without(HostItem::JobNodeCount),
        };

        let outcome = ctl.handle_job_create(&event).unwrap();
        assert_eq!(outcome, Outcome::Ignored(IgnoreReason::NoAllocation));
        assert!(ctl.registry().is_empty());
        assert_eq!(ctl.job_create(&event), HostStatus::Success);
    }

    #[test]
    fn missing_optional_fields_fall_back_to_defaults() {
        let mut ctl = controller();
        let event = ScriptedEvent::remote()
            .with(HostItem::JobId, 5)
            .with(HostItem::JobNodeCount, 1);

        ctl.handle_job_create(&event).unwrap();

        let record = ctl.registry().find(JobId::new(5)).unwrap();
        assert_eq!(record.cpu_count, 0);
        assert_eq!(record.local_task_count, 0);
        assert_eq!(record.app_id, 0);
        assert!(record.name.is_none());
    }

    #[test]
    fn out_of_range_field_is_treated_as_missing() {
        let mut ctl = controller();
        let event = create(5, 1).with(HostItem::JobCpuCount, -1);

        ctl.handle_job_create(&event).unwrap();
        assert_eq!(ctl.registry().find(JobId::new(5)).unwrap().cpu_count, 0);
    }

    #[test]
    fn missing_job_id_abandons_the_event() {
        let mut ctl = controller();
        let event = create(5, 1).without(HostItem::JobId);

        let err = ctl.handle_job_create(&event).unwrap_err();
        assert!(matches!(err, JobInfoError::MissingJobId(_)));
        assert!(ctl.registry().is_empty());
        assert_eq!(ctl.job_create(&event), HostStatus::Success);
    }

    #[rstest]
    #[case::local(ExecContext::Local)]
    #[case::allocator(ExecContext::Allocator)]
    #[case::slurmd(ExecContext::Slurmd)]
    #[case::job_script(ExecContext::JobScript)]
    fn non_remote_contexts_do_nothing(#[case] context: ExecContext) {
        let mut ctl = controller();
        let mut event = create(42, 1);
        event.context = context;

        assert_eq!(ctl.job_create(&event), HostStatus::Success);
        assert!(ctl.registry().is_empty());

        ctl.handle_job_create(&create(42, 1)).unwrap();
        let mut init = task(42, 111);
        init.context = context;
        let mut fin = exit(42, 0);
        fin.context = context;

        assert_eq!(
            ctl.handle_task_init(&init).unwrap(),
            Outcome::Ignored(IgnoreReason::NotNodeLocal(context))
        );
        assert_eq!(
            ctl.handle_task_exit(&fin).unwrap(),
            Outcome::Ignored(IgnoreReason::NotNodeLocal(context))
        );
        assert_eq!(ctl.registry().find(JobId::new(42)).unwrap().init_count, 0);
        assert_eq!(ctl.sink().attempts(), 0);
    }

    #[test]
    fn population_complete_writes_exactly_once() {
        let mut ctl = controller();
        ctl.handle_job_create(&create(42, 3)).unwrap();

        let first = ctl.handle_task_init(&task(42, 111)).unwrap();
        let second = ctl.handle_task_init(&task(42, 112)).unwrap();
        assert!(matches!(
            first,
            Outcome::TaskRecorded { snapshot: SnapshotWrite::NotDue, .. }
        ));
        assert!(matches!(
            second,
            Outcome::TaskRecorded { snapshot: SnapshotWrite::NotDue, .. }
        ));
        assert_eq!(ctl.sink().attempts(), 0);

        let third = ctl.handle_task_init(&task(42, 113)).unwrap();
        assert_eq!(
            third,
            Outcome::TaskRecorded {
                job_id: JobId::new(42),
                population: Population::Complete,
                snapshot: SnapshotWrite::Written,
            }
        );

        let snapshot = &ctl.sink().snapshots()[0];
        assert_eq!(snapshot.init_count, 3);
        assert_eq!(snapshot.task_pids, vec![111, 112, 113]);
        assert_eq!(snapshot.status, JobStatus::Started);

        let extra = ctl.handle_task_init(&task(42, 114)).unwrap();
        assert!(matches!(
            extra,
            Outcome::TaskRecorded {
                population: Population::OverCount { excess: 1 },
                snapshot: SnapshotWrite::NotDue,
                ..
            }
        ));
        assert_eq!(ctl.sink().attempts(), 1);
    }

    #[test]
    fn task_init_refreshes_step_id() {
        let mut ctl = controller();
        ctl.handle_job_create(&create(42, 2)).unwrap();
        ctl.handle_task_init(&task(42, 111).with(HostItem::JobStepId, 3))
            .unwrap();

        assert_eq!(ctl.registry().find(JobId::new(42)).unwrap().step_id, 3);
    }

    #[test]
    fn task_init_without_pid_still_counts() {
        let mut ctl = controller();
        ctl.handle_job_create(&create(42, 1)).unwrap();

        let outcome = ctl
            .handle_task_init(&task(42, 0).without(HostItem::TaskPid))
            .unwrap();

        assert!(matches!(
            outcome,
            Outcome::TaskRecorded { population: Population::Complete, .. }
        ));
        assert_eq!(ctl.sink().snapshots()[0].task_pids, vec![0]);
    }

    #[test]
    fn pidless_task_inits_are_not_duplicates() {
        let mut ctl = controller();
        ctl.handle_job_create(&create(42, 2)).unwrap();

        ctl.handle_task_init(&task(42, 0).without(HostItem::TaskPid))
            .unwrap();
        let second = ctl
            .handle_task_init(&task(42, 0).without(HostItem::TaskPid))
            .unwrap();

        assert!(matches!(
            second,
            Outcome::TaskRecorded { population: Population::Complete, .. }
        ));
        assert_eq!(ctl.stats().duplicate_task_pids, 0);
        assert_eq!(ctl.sink().snapshots()[0].task_pids, vec![0, 0]);
    }

    #[test]
    fn privileged_init_counts_like_task_init() {
        let mut ctl = controller();
        ctl.handle_job_create(&create(42, 2)).unwrap();

        ctl.task_init(&task(42, 111));
        ctl.task_init_privileged(&task(42, 111));

        let record = ctl.registry().find(JobId::new(42)).unwrap();
        assert_eq!(record.init_count, 2);
        assert_eq!(ctl.sink().attempts(), 1);
        assert_eq!(ctl.stats().duplicate_task_pids, 1);
    }

    #[test]
    fn unknown_job_events_are_no_ops() {
        let mut ctl = controller();
        ctl.handle_job_create(&create(1, 1)).unwrap();

        assert_eq!(
            ctl.handle_task_init(&task(99, 5)).unwrap(),
            Outcome::Ignored(IgnoreReason::UnknownJob(JobId::new(99)))
        );
        assert_eq!(
            ctl.handle_task_exit(&exit(99, 0)).unwrap(),
            Outcome::Ignored(IgnoreReason::UnknownJob(JobId::new(99)))
        );
        assert_eq!(ctl.registry().job_ids(), vec![JobId::new(1)]);
        assert_eq!(ctl.sink().attempts(), 0);
    }

    #[test]
    fn exit_writes_final_snapshot_and_retires() {
        let mut ctl = controller();
        let clock = ctl.clock().clone();
        ctl.handle_job_create(&create(42, 4)).unwrap();
        ctl.handle_task_init(&task(42, 111)).unwrap();

        clock.advance(Duration::seconds(60));
        let outcome = ctl.handle_task_exit(&exit(42, 0x0300)).unwrap();

        assert_eq!(
            outcome,
            Outcome::Exited {
                job_id: JobId::new(42),
                exit_status: 3,
                snapshot: SnapshotWrite::Written,
            }
        );
        assert!(ctl.registry().is_empty());

        let snapshot = &ctl.sink().snapshots()[0];
        assert_eq!(snapshot.status, JobStatus::Exited);
        assert_eq!(snapshot.exit_status, 3);
        assert_eq!(snapshot.started_at.timestamp(), 1_000);
        assert_eq!(snapshot.ended_at.map(|t| t.timestamp()), Some(1_060));
        assert_eq!(ctl.sink().attempts(), 1);
    }

    #[test]
    fn second_exit_for_same_job_is_dropped() {
        let mut ctl = controller();
        ctl.handle_job_create(&create(42, 1)).unwrap();
        ctl.handle_task_exit(&exit(42, 0)).unwrap();

        let outcome = ctl.handle_task_exit(&exit(42, 0)).unwrap();
        assert_eq!(outcome, Outcome::Ignored(IgnoreReason::UnknownJob(JobId::new(42))));
        assert_eq!(ctl.sink().attempts(), 1);
    }

    #[test]
    fn failing_sink_does_not_disturb_registry() {
        let clock = FixedClock::new(Utc.timestamp_opt(1_000, 0).unwrap());
        let sink = RecordingSink::failing(std::io::ErrorKind::PermissionDenied);
        let mut ctl = LifecycleController::new(sink, clock);

        ctl.task_init(&task(42, 1));
        ctl.job_create(&create(42, 1));
        ctl.task_init(&task(42, 111));
        let record = ctl.registry().find(JobId::new(42)).unwrap();
        assert_eq!(record.init_count, 1);

        assert_eq!(ctl.task_exit(&exit(42, 0)), HostStatus::Success);
        assert!(ctl.registry().is_empty());

        let stats = ctl.stats();
        assert_eq!(stats.events, 4);
        assert_eq!(stats.ignored, 1);
        assert_eq!(stats.snapshot_failures, 2);
        assert_eq!(stats.snapshots_written, 0);
        assert_eq!(stats.jobs_exited, 1);
    }

    #[test]
    fn shutdown_releases_never_exited_jobs() {
        let mut ctl = controller();
        ctl.job_create(&create(7, 2));
        ctl.job_create(&create(3, 2));

        assert_eq!(ctl.shutdown(), 2);
        assert!(ctl.registry().is_empty());
        assert_eq!(ctl.shutdown(), 0);
    }

    #[test]
    fn job_ids_are_reusable_after_exit() {
        let mut ctl = controller();
        ctl.job_create(&create(42, 1));
        ctl.task_exit(&exit(42, 0));

        let outcome = ctl.handle_job_create(&create(42, 1)).unwrap();
        assert_eq!(outcome, Outcome::Created(JobId::new(42)));
        assert_eq!(ctl.registry().find(JobId::new(42)).unwrap().init_count, 0);
    }
}
