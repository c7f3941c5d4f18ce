/// One open file descriptor of a process.
///
/// Captured transiently from `/proc/<pid>/fd/`; the underlying descriptor
/// may close at any time after the snapshot.
#[derive(Debug, Clone)]
pub struct FdEntry {
    /// Descriptor number (unique within the process).
    pub fd: u32,
    /// Resolved symlink target: a path, `socket:[N]`, `pipe:[N]`,
    /// `anon_inode:[tag]`, or a path suffixed `" (deleted)"`.
    pub target: String,
    /// Socket inode when `target` is exactly `socket:[<digits>]`.
    pub socket_inode: Option<u64>,
}

impl FdEntry {
    pub fn is_socket(&self) -> bool {
        self.socket_inode.is_some()
    }
}
