use std::fs;

use crate::error::Result;
use crate::model::{ProcState, ThreadInfo};

use super::{classify_pid_error, numeric_name, ProcRoot};

/// Enumerate the threads of a process from `/proc/<pid>/task/`.
///
/// A thread whose `comm` file is already unreadable has exited during the
/// walk and is skipped; a readable thread whose `status` cannot be parsed
/// keeps state Unknown.
pub fn enumerate_threads(root: &ProcRoot, pid: u32) -> Result<Vec<ThreadInfo>> {
    let dir = root.pid_file(pid, "task");
    let entries = fs::read_dir(&dir).map_err(|e| classify_pid_error(e, pid, &dir))?;

    let mut threads = Vec::new();
    for entry in entries {
        let entry = match entry {
            Ok(e) => e,
            Err(_) => continue,
        };
        let Some(tid) = numeric_name(&entry.file_name()) else {
            continue;
        };

        let name = match fs::read_to_string(root.task_file(pid, tid, "comm")) {
            Ok(s) => s.trim_end_matches('\n').to_string(),
            Err(_) => continue,
        };
        let state = read_thread_state(root, pid, tid);

        threads.push(ThreadInfo { tid, name, state });
    }

    Ok(threads)
}

/// Pull the `State:` line out of a thread's status file.
fn read_thread_state(root: &ProcRoot, pid: u32, tid: u32) -> ProcState {
    let Ok(content) = fs::read_to_string(root.task_file(pid, tid, "status")) else {
        return ProcState::Unknown;
    };
    for line in content.lines() {
        if let Some(rest) = line.strip_prefix("State:") {
            if let Some(code) = rest.trim().chars().next() {
                return ProcState::from_code(code);
            }
        }
    }
    ProcState::Unknown
}
