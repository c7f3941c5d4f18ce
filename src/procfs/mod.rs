use std::ffi::OsStr;
use std::io;
use std::path::{Path, PathBuf};

use nix::unistd::{access, AccessFlags};

use crate::error::PscopeError;
use crate::model::Protocol;

mod fd;
mod status;
mod task;

pub use fd::enumerate_fds;
pub use status::read_status;
pub use task::enumerate_threads;

/// Root of the proc pseudo-filesystem.
///
/// Defaults to `/proc`. Every collector resolves its paths through this, so
/// tests can point the whole crate at a synthetic directory tree.
#[derive(Debug, Clone)]
pub struct ProcRoot {
    base: PathBuf,
}

impl Default for ProcRoot {
    fn default() -> Self {
        ProcRoot {
            base: PathBuf::from("/proc"),
        }
    }
}

impl ProcRoot {
    #[allow(dead_code)]
    pub fn new(base: impl Into<PathBuf>) -> Self {
        ProcRoot { base: base.into() }
    }

    /// Path to `<root>/<pid>`.
    pub fn pid_dir(&self, pid: u32) -> PathBuf {
        self.base.join(pid.to_string())
    }

    /// Path to `<root>/<pid>/<name>`, e.g. `/proc/1234/status`.
    pub fn pid_file(&self, pid: u32, name: &str) -> PathBuf {
        self.pid_dir(pid).join(name)
    }

    /// Path to `<root>/<pid>/task/<tid>/<name>`.
    pub fn task_file(&self, pid: u32, tid: u32, name: &str) -> PathBuf {
        self.pid_dir(pid)
            .join("task")
            .join(tid.to_string())
            .join(name)
    }

    /// Path to the host-wide connection table for a protocol.
    pub fn net_table(&self, protocol: Protocol) -> PathBuf {
        let name = match protocol {
            Protocol::Tcp => "tcp",
            Protocol::Udp => "udp",
        };
        self.base.join("net").join(name)
    }

    /// Probe whether `<root>/<pid>` exists and is reachable.
    ///
    /// The process may still exit between this check and any later read;
    /// the per-read error paths handle that.
    pub fn pid_exists(&self, pid: u32) -> bool {
        access(&self.pid_dir(pid), AccessFlags::F_OK).is_ok()
    }
}

/// Classify an open/read failure on a per-process file into the crate
/// taxonomy. An absent file means the process is gone, not an environment
/// problem.
pub(crate) fn classify_pid_error(err: io::Error, pid: u32, path: &Path) -> PscopeError {
    match err.kind() {
        io::ErrorKind::NotFound => PscopeError::ProcessNotFound(pid),
        io::ErrorKind::PermissionDenied => PscopeError::PermissionDenied(pid),
        io::ErrorKind::OutOfMemory => PscopeError::ResourceExhausted(path.to_path_buf()),
        _ => PscopeError::Io(err),
    }
}

/// Parse a directory entry name that must be a plain base-10 number
/// (descriptor number or TID). Anything else is a navigation or
/// kernel-special entry and is ignored.
pub(crate) fn numeric_name(name: &OsStr) -> Option<u32> {
    let s = name.to_str()?;
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pid_file_path() {
        let root = ProcRoot::new("/proc");
        assert_eq!(
            root.pid_file(1234, "status"),
            PathBuf::from("/proc/1234/status")
        );
    }

    #[test]
    fn test_task_file_path() {
        let root = ProcRoot::new("/proc");
        assert_eq!(
            root.task_file(1234, 1240, "comm"),
            PathBuf::from("/proc/1234/task/1240/comm")
        );
    }

    #[test]
    fn test_net_table_paths() {
        let root = ProcRoot::new("/proc");
        assert_eq!(root.net_table(Protocol::Tcp), PathBuf::from("/proc/net/tcp"));
        assert_eq!(root.net_table(Protocol::Udp), PathBuf::from("/proc/net/udp"));
    }

    #[test]
    fn test_pid_exists_under_empty_root() {
        let dir = tempfile::tempdir().unwrap();
        let root = ProcRoot::new(dir.path());
        assert!(!root.pid_exists(1));
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_pid_exists_for_self() {
        let root = ProcRoot::default();
        assert!(root.pid_exists(std::process::id()));
    }

    #[test]
    fn test_numeric_name() {
        assert_eq!(numeric_name(OsStr::new("0")), Some(0));
        assert_eq!(numeric_name(OsStr::new("42")), Some(42));
        assert_eq!(numeric_name(OsStr::new("")), None);
        assert_eq!(numeric_name(OsStr::new("4a")), None);
        assert_eq!(numeric_name(OsStr::new("-1")), None);
        assert_eq!(numeric_name(OsStr::new("fdinfo")), None);
    }
}
