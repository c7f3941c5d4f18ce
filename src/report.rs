use crate::cli::CliArgs;
use crate::error::Result;
use crate::model::{FdEntry, ProcessStatus, SocketInfo, ThreadInfo};
use crate::net::codec::format_endpoint;

/// Formats the inspection report on stdout.
pub struct Report {
    /// `-v` flag: print the per-entry tables, not just counts.
    pub verbose: bool,
    /// `-N` flag: skip login-name resolution.
    pub numeric: bool,
}

impl Report {
    pub fn from_cli(args: &CliArgs) -> Self {
        Report {
            verbose: args.verbose,
            numeric: args.numeric,
        }
    }

    /// Identity block: name, state, ownership, memory, thread count.
    /// Memory values are in KB; zeros indicate a zombie or kernel thread.
    pub fn print_status(&self, info: &ProcessStatus) {
        println!("{:<10} {} (PID {})", "Process:", info.name, info.pid);
        println!("{:<10} {}", "State:", info.state());
        println!("{:<10} {}", "User:", self.user_display(info.uid_real));
        println!(
            "{:<10} {} (real), {} (effective)",
            "UID:", info.uid_real, info.uid_effective
        );
        println!(
            "{:<10} {} (real), {} (effective)",
            "GID:", info.gid_real, info.gid_effective
        );
        println!(
            "Memory:    VmSize: {} KB, VmRSS: {} KB, VmPeak: {} KB",
            info.vm_size_kb, info.vm_rss_kb, info.vm_peak_kb
        );
        println!("Threads:   {}", info.threads);
    }

    pub fn print_fds(&self, fds: Result<Vec<FdEntry>>) {
        let fds = match fds {
            Ok(fds) => fds,
            Err(e) => {
                println!("\nFile Descriptors: unable to read ({e})");
                return;
            }
        };

        println!("\nFile Descriptors: {} open", fds.len());
        if self.verbose && !fds.is_empty() {
            println!("\n  FD    Type      Target");
            println!("  ----  --------  ----------------------------------------");
            for fd in &fds {
                println!("{}", fd_line(fd));
            }
        }
    }

    pub fn print_threads(&self, threads: Result<Vec<ThreadInfo>>) {
        let threads = match threads {
            Ok(threads) => threads,
            Err(e) => {
                println!("\nThreads: unable to enumerate ({e})");
                return;
            }
        };

        println!("\nThread Details:");
        println!("  TID     State       Name");
        println!("  ------  ----------  ----------------");
        for thread in &threads {
            println!("{}", thread_line(thread));
        }
    }

    pub fn print_connections(&self, sockets: Result<Vec<SocketInfo>>) {
        let sockets = match sockets {
            Ok(sockets) => sockets,
            Err(e) => {
                println!("\nNetwork Connections: unable to determine ({e})");
                return;
            }
        };

        println!("\nNetwork Connections: {} open", sockets.len());
        if self.verbose && !sockets.is_empty() {
            println!("\n  Proto  Local Address          Remote Address         State        Inode");
            println!("  -----  ---------------------  ---------------------  -----------  --------");
            for socket in &sockets {
                println!("{}", connection_line(socket));
            }
        }
    }

    /// Login name for a UID, or the number itself under `-N` or when the
    /// uid has no passwd entry.
    fn user_display(&self, uid: u32) -> String {
        if !self.numeric {
            if let Some(user) = users::get_user_by_uid(uid) {
                return user.name().to_string_lossy().into_owned();
            }
        }
        uid.to_string()
    }
}

// ---------------------------------------------------------------------------
// Line helpers
// ---------------------------------------------------------------------------

fn fd_line(fd: &FdEntry) -> String {
    let kind = if fd.is_socket() { "socket" } else { "file" };
    format!("  {:<4}  {:<8}  {}", fd.fd, kind, fd.target)
}

fn thread_line(thread: &ThreadInfo) -> String {
    format!(
        "  {:<6}  {:<10}  {}",
        thread.tid,
        thread.state.to_string(),
        thread.name
    )
}

fn connection_line(socket: &SocketInfo) -> String {
    format!(
        "  {:<5}  {:<21}  {:<21}  {:<11}  {}",
        socket.protocol.to_string(),
        format_endpoint(socket.local_addr, socket.local_port),
        format_endpoint(socket.remote_addr, socket.remote_port),
        socket.state.to_string(),
        socket.inode
    )
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ProcState, Protocol, TcpState};
    use std::net::Ipv4Addr;

    #[test]
    fn test_fd_line_socket_vs_file() {
        let sock = FdEntry {
            fd: 3,
            target: "socket:[12345]".into(),
            socket_inode: Some(12345),
        };
        let file = FdEntry {
            fd: 0,
            target: "/dev/null".into(),
            socket_inode: None,
        };
        assert_eq!(fd_line(&sock), "  3     socket    socket:[12345]");
        assert_eq!(fd_line(&file), "  0     file      /dev/null");
    }

    #[test]
    fn test_thread_line() {
        let thread = ThreadInfo {
            tid: 1234,
            name: "worker".into(),
            state: ProcState::Running,
        };
        assert_eq!(thread_line(&thread), "  1234    Running     worker");
    }

    #[test]
    fn test_connection_line() {
        let socket = SocketInfo {
            protocol: Protocol::Tcp,
            local_addr: Ipv4Addr::new(127, 0, 0, 1),
            local_port: 8080,
            remote_addr: Ipv4Addr::UNSPECIFIED,
            remote_port: 0,
            state: TcpState::Listen,
            inode: 111,
        };
        assert_eq!(
            connection_line(&socket),
            "  TCP    127.0.0.1:8080         0.0.0.0:0              LISTEN       111"
        );
    }

    #[test]
    fn test_numeric_user_display() {
        let report = Report {
            verbose: false,
            numeric: true,
        };
        assert_eq!(report.user_display(0), "0");
    }

    #[test]
    fn test_unresolvable_uid_falls_back_to_number() {
        let report = Report {
            verbose: false,
            numeric: false,
        };
        // No passwd entry plausibly exists for this uid.
        assert_eq!(report.user_display(4_000_000_000), "4000000000");
    }
}
