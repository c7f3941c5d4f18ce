use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "pscope",
    version,
    about = "Inspect a Linux process via the /proc filesystem"
)]
pub struct CliArgs {
    /// Show detailed descriptor, thread, and connection tables
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,

    /// Show network connections only
    #[arg(short = 'n', long = "network")]
    pub network_only: bool,

    /// List UID/GID numbers without login-name resolution
    #[arg(short = 'N', long = "numeric")]
    pub numeric: bool,

    /// PID of the process to inspect
    #[arg(value_name = "PID")]
    pub pid: String,
}

/// Validate a PID string: base-10 digits only, positive, in range.
///
/// Rejects signs, whitespace, empty input, zero, and values that overflow
/// a `u32`. The kernel never hands out PID 0 to userspace.
pub fn parse_pid(s: &str) -> Option<u32> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    match s.parse::<u32>() {
        Ok(0) | Err(_) => None,
        Ok(pid) => Some(pid),
    }
}
