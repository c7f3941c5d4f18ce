use std::fs;

use crate::error::Result;
use crate::model::{ProcState, ProcessStatus};

use super::{classify_pid_error, ProcRoot};

/// Read and parse `/proc/<pid>/status`.
///
/// Unrecognized lines are ignored. Zombies and kernel threads carry no
/// `Vm*` lines; their memory fields stay zero, which is not an error.
pub fn read_status(root: &ProcRoot, pid: u32) -> Result<ProcessStatus> {
    let path = root.pid_file(pid, "status");
    let content = fs::read_to_string(&path).map_err(|e| classify_pid_error(e, pid, &path))?;

    let mut info = ProcessStatus {
        pid,
        ..Default::default()
    };
    for line in content.lines() {
        parse_status_line(line, &mut info);
    }
    Ok(info)
}

/// Match one `Key:\tvalue` line against the fields we keep.
fn parse_status_line(line: &str, info: &mut ProcessStatus) {
    let Some((key, value)) = line.split_once(':') else {
        return;
    };
    let value = value.trim();

    match key {
        "Name" => info.name = value.to_string(),
        "State" => {
            if let Some(code) = value.chars().next() {
                info.state = Some(ProcState::from_code(code));
            }
        }
        // Uid/Gid lines carry four ids; only real and effective are kept.
        "Uid" => {
            if let Some((real, effective)) = parse_id_pair(value) {
                info.uid_real = real;
                info.uid_effective = effective;
            }
        }
        "Gid" => {
            if let Some((real, effective)) = parse_id_pair(value) {
                info.gid_real = real;
                info.gid_effective = effective;
            }
        }
        "VmSize" => info.vm_size_kb = parse_kb(value),
        "VmRSS" => info.vm_rss_kb = parse_kb(value),
        "VmPeak" => info.vm_peak_kb = parse_kb(value),
        "Threads" => info.threads = value.parse().unwrap_or(0),
        _ => {}
    }
}

fn parse_id_pair(value: &str) -> Option<(u32, u32)> {
    let mut fields = value.split_whitespace();
    let real = fields.next()?.parse().ok()?;
    let effective = fields.next()?.parse().ok()?;
    Some((real, effective))
}

/// Parse the numeric part of a `"<n> kB"` memory value.
fn parse_kb(value: &str) -> u64 {
    value
        .split_whitespace()
        .next()
        .and_then(|n| n.parse().ok())
        .unwrap_or(0)
}
