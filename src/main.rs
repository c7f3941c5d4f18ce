mod cli;
mod error;
mod model;
mod net;
mod procfs;
mod report;

use clap::Parser;

use cli::{parse_pid, CliArgs};
use error::PscopeError;
use procfs::ProcRoot;
use report::Report;

// Exit codes: 0 success, 1 invalid arguments, 2 process not found,
// 3 permission denied or environment failure.
fn main() {
    let args = CliArgs::parse();

    let Some(pid) = parse_pid(&args.pid) else {
        eprintln!("pscope: invalid PID: {}", args.pid);
        std::process::exit(1);
    };

    let root = ProcRoot::default();
    if !root.pid_exists(pid) {
        eprintln!("pscope: cannot read process {pid}: no such process");
        std::process::exit(2);
    }

    let report = Report::from_cli(&args);

    if args.network_only {
        report.print_connections(net::find_process_sockets(&root, pid));
        return;
    }

    // Identity failure is fatal: there is no process to report on. The
    // existence probe above can race with the process exiting.
    let status = match procfs::read_status(&root, pid) {
        Ok(status) => status,
        Err(e) => {
            eprintln!("pscope: cannot read process {pid}: {e}");
            let code = match e {
                PscopeError::ProcessNotFound(_) => 2,
                _ => 3,
            };
            std::process::exit(code);
        }
    };

    report.print_status(&status);
    report.print_fds(procfs::enumerate_fds(&root, pid));
    if report.verbose {
        report.print_threads(procfs::enumerate_threads(&root, pid));
    }
    report.print_connections(net::find_process_sockets(&root, pid));
}
