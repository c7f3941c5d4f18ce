use std::fs;

use crate::error::Result;
use crate::model::FdEntry;
use crate::net::codec::parse_socket_inode;

use super::{classify_pid_error, numeric_name, ProcRoot};

/// Enumerate the open descriptors of a process from `/proc/<pid>/fd/`.
///
/// Each numeric entry is a symlink; the target is resolved once, without
/// following further redirection, and matched against the `socket:[N]`
/// form. The directory is live state: a descriptor that closes between
/// listing and readlink is skipped, while failure to open the directory
/// itself aborts the enumeration.
///
/// Result order is the directory enumeration order, which is neither
/// numeric nor stable across calls.
pub fn enumerate_fds(root: &ProcRoot, pid: u32) -> Result<Vec<FdEntry>> {
    let dir = root.pid_file(pid, "fd");
    let entries = fs::read_dir(&dir).map_err(|e| classify_pid_error(e, pid, &dir))?;

    let mut fds = Vec::new();
    for entry in entries {
        let entry = match entry {
            Ok(e) => e,
            Err(_) => continue,
        };
        let Some(fd) = numeric_name(&entry.file_name()) else {
            continue;
        };

        // Closed between readdir and readlink; skip just this entry.
        let target = match fs::read_link(entry.path()) {
            Ok(t) => t,
            Err(_) => continue,
        };
        let target = target.to_string_lossy().into_owned();
        let socket_inode = parse_socket_inode(&target);

        fds.push(FdEntry {
            fd,
            target,
            socket_inode,
        });
    }

    Ok(fds)
}
