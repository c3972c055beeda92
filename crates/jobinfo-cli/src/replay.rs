//! replay - drive a controller from a JSON-lines script of host callbacks.
//!
//! One callback per line:
//! ```json
//! {"callback": "job_create", "items": {"job_id": 42, "job_node_count": 1}}
//! {"callback": "task_init", "items": {"job_id": 42, "task_pid": 111}}
//! {"callback": "task_exit", "items": {"job_id": 42, "task_exit_status": 0}}
//! ```
//! Blank lines and lines starting with `#` are skipped.

use std::io::BufRead;

use anyhow::{Context, Result};
use jobinfo_core::LifecycleController;
use jobinfo_core::impls::ScriptedEvent;
use jobinfo_core::observability::{ControllerStats, RegistryCounts};
use jobinfo_core::ports::{Clock, SnapshotSink};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Callback {
    JobCreate,
    TaskInit,
    TaskInitPrivileged,
    TaskExit,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ScriptLine {
    pub callback: Callback,
    #[serde(flatten)]
    pub event: ScriptedEvent,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ReplaySummary {
    pub callbacks: u64,
    pub stats: ControllerStats,
    /// Registry state just before teardown.
    pub pending: RegistryCounts,
    pub released_at_shutdown: usize,
}

pub fn parse_line(line: &str) -> Result<Option<ScriptLine>> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return Ok(None);
    }
    let parsed = serde_json::from_str(trimmed)?;
    Ok(Some(parsed))
}

pub fn dispatch<S: SnapshotSink, C: Clock>(
    controller: &mut LifecycleController<S, C>,
    line: &ScriptLine,
) {
    let event = &line.event;
    match line.callback {
        Callback::JobCreate => controller.job_create(event),
        Callback::TaskInit => controller.task_init(event),
        Callback::TaskInitPrivileged => controller.task_init_privileged(event),
        Callback::TaskExit => controller.task_exit(event),
    };
}

/// Replay every line, then tear the controller down.
///
/// `after_each` runs after every callback, e.g. to print snapshots as they
/// are produced.
pub fn run<S, C, R, F>(
    controller: &mut LifecycleController<S, C>,
    input: R,
    mut after_each: F,
) -> Result<ReplaySummary>
where
    S: SnapshotSink,
    C: Clock,
    R: BufRead,
    F: FnMut(&mut LifecycleController<S, C>),
{
    let mut summary = ReplaySummary::default();

    for (index, line) in input.lines().enumerate() {
        let lineno = index + 1;
        let line = line.with_context(|| format!("reading script line {lineno}"))?;
        let parsed = parse_line(&line).with_context(|| format!("parsing script line {lineno}"))?;
        let Some(parsed) = parsed else {
            continue;
        };

        dispatch(controller, &parsed);
        summary.callbacks += 1;
        after_each(controller);
    }

    summary.pending = controller.registry().counts();
    summary.released_at_shutdown = controller.shutdown();
    summary.stats = controller.stats().clone();
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use jobinfo_core::impls::RecordingSink;
    use jobinfo_core::ports::FixedClock;

    const SCRIPT: &str = r#"
# two-task job, then a job that never exits
{"callback": "job_create", "items": {"job_id": 42, "job_node_count": 2, "job_local_task_count": 2, "job_uid": 1000}, "env": {"SLURM_JOB_NAME": "sim"}}
{"callback": "task_init", "items": {"job_id": 42, "task_pid": 111}}
{"callback": "task_init_privileged", "items": {"job_id": 42, "task_pid": 112}}
{"callback": "job_create", "context": "slurmd", "items": {"job_id": 43, "job_node_count": 1}}
{"callback": "task_exit", "items": {"job_id": 42, "task_exit_status": 256}}

{"callback": "job_create", "items": {"job_id": 44, "job_node_count": 1, "job_local_task_count": 1}}
"#;

    fn controller() -> LifecycleController<RecordingSink, FixedClock> {
        LifecycleController::new(
            RecordingSink::new(),
            FixedClock::new(Utc.timestamp_opt(100, 0).unwrap()),
        )
    }

    #[test]
    fn replays_script_and_summarizes() {
        let mut ctl = controller();
        let mut seen = Vec::new();

        let summary = run(&mut ctl, SCRIPT.as_bytes(), |c| {
            seen.push(c.sink().snapshots().len());
        })
        .unwrap();

        assert_eq!(summary.callbacks, 6);
        assert_eq!(seen, vec![0, 0, 1, 1, 2, 2]);
        assert_eq!(summary.stats.ignored, 1);
        assert_eq!(summary.stats.snapshots_written, 2);
        assert_eq!(summary.stats.jobs_exited, 1);
        assert_eq!(summary.pending.tracked, 1);
        assert_eq!(summary.released_at_shutdown, 1);

        let last = &ctl.sink().snapshots()[1];
        assert_eq!(last.exit_status, 1);
        assert_eq!(last.name.as_deref(), Some("sim"));
    }

    #[test]
    fn bad_line_reports_its_number() {
        let mut ctl = controller();
        let script = "{\"callback\": \"job_create\"}\n{\"callback\": \"explode\"}\n";

        let err = run(&mut ctl, script.as_bytes(), |_| {}).unwrap_err();
        assert!(err.to_string().contains("line 2"));
    }

    #[test]
    fn comments_and_blank_lines_are_skipped() {
        assert!(parse_line("   ").unwrap().is_none());
        assert!(parse_line("# note").unwrap().is_none());

        let line = parse_line(r#"{"callback": "task_exit"}"#).unwrap().unwrap();
        assert_eq!(line.callback, Callback::TaskExit);
    }
}
