use crate::error::Result;
use crate::model::{ConnectionRecord, Protocol, SocketInfo, TcpState};
use crate::procfs::{self, ProcRoot};

use super::table::read_connection_table;

/// Attribute the host's live IPv4 connections to one process.
///
/// The descriptor snapshot is taken strictly before the table reads; the
/// process and the host tables are both live state, so the two observations
/// are best-effort, not mutually consistent.
///
/// A process with sockets but a missing/unreadable table fails as a whole:
/// returning the TCP half while UDP parsing failed would read as "no UDP
/// connections", which is a lie.
pub fn find_process_sockets(root: &ProcRoot, pid: u32) -> Result<Vec<SocketInfo>> {
    let fds = procfs::enumerate_fds(root, pid)?;

    let inodes: Vec<u64> = fds.iter().filter_map(|e| e.socket_inode).collect();
    if inodes.is_empty() {
        // No socket descriptors, nothing to correlate; the tables are not
        // opened at all.
        return Ok(Vec::new());
    }

    let tcp = read_connection_table(&root.net_table(Protocol::Tcp), Protocol::Tcp, &inodes)?;
    let udp = read_connection_table(&root.net_table(Protocol::Udp), Protocol::Udp, &inodes)?;

    let mut sockets = Vec::with_capacity(tcp.len() + udp.len());
    sockets.extend(tcp.into_iter().map(into_socket_info));
    sockets.extend(udp.into_iter().map(into_socket_info));
    Ok(sockets)
}

fn into_socket_info(record: ConnectionRecord) -> SocketInfo {
    SocketInfo {
        protocol: record.protocol,
        local_addr: record.local_addr,
        local_port: record.local_port,
        remote_addr: record.remote_addr,
        remote_port: record.remote_port,
        state: TcpState::from_code(record.state),
        inode: record.inode,
    }
}
