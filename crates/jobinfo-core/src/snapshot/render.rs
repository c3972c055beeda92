use std::fmt::Write as _;

use crate::domain::JobRecord;

/// User name written when the uid does not resolve.
pub const ANONYMOUS_USER: &str = "anonymous";

/// Keys in the order they are written.
pub const SNAPSHOT_KEYS: [&str; 14] = [
    "JOB_ID",
    "JOB_STEP_ID",
    "JOB_STATUS",
    "JOB_APP_ID",
    "JOB_USER_ID",
    "JOB_START",
    "JOB_END",
    "JOB_EXIT",
    "JOB_NNODES",
    "JOB_LOCAL_TASK_COUNT",
    "JOB_NCPUS",
    "JOB_NAME",
    "JOB_USER",
    "JOB_PIDS",
];

/// Render the snapshot document for `record`.
///
/// `user_name` is the resolved owner; `None` writes the anonymous
/// placeholder. Timestamps are Unix seconds, and an unset end time is `0`.
pub fn render(record: &JobRecord, user_name: Option<&str>) -> String {
    let end = record.ended_at.map_or(0, |t| t.timestamp());
    let pids = record
        .task_pids
        .iter()
        .map(i32::to_string)
        .collect::<Vec<_>>()
        .join(",");

    let mut out = String::with_capacity(320);
    // Writing into a String cannot fail.
    let _ = writeln!(out, "JOB_ID={}", record.job_id);
    let _ = writeln!(out, "JOB_STEP_ID={}", record.step_id);
    let _ = writeln!(out, "JOB_STATUS={}", record.status.code());
    let _ = writeln!(out, "JOB_APP_ID={}", record.app_id);
    let _ = writeln!(out, "JOB_USER_ID={}", record.user_id);
    let _ = writeln!(out, "JOB_START={}", record.started_at.timestamp());
    let _ = writeln!(out, "JOB_END={end}");
    let _ = writeln!(out, "JOB_EXIT={}", record.exit_status);
    let _ = writeln!(out, "JOB_NNODES={}", record.node_count);
    let _ = writeln!(out, "JOB_LOCAL_TASK_COUNT={}", record.local_task_count);
    let _ = writeln!(out, "JOB_NCPUS={}", record.cpu_count);
    let _ = writeln!(out, "JOB_NAME={}", quoted(record.name.as_deref().unwrap_or("")));
    let _ = writeln!(out, "JOB_USER={}", quoted(user_name.unwrap_or(ANONYMOUS_USER)));
    let _ = writeln!(out, "JOB_PIDS=\"{pids}\"");
    out
}

/// Double-quote a text value so it stays on one line.
///
/// Backslash, double quote, newline and carriage return are escaped with a
/// backslash; other control characters become `?`.
fn quoted(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            c if c.is_control() => out.push('?'),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}
