use std::fmt;

/// Process scheduler states from the `State:` line of `/proc/<pid>/status`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcState {
    Running,
    Sleeping,
    DiskSleep,
    Zombie,
    Stopped,
    Idle,
    Unknown,
}

impl ProcState {
    /// Map the single-character state code (`R`, `S`, `D`, `Z`, `T`, `I`).
    pub fn from_code(c: char) -> Self {
        match c {
            'R' => ProcState::Running,
            'S' => ProcState::Sleeping,
            'D' => ProcState::DiskSleep,
            'Z' => ProcState::Zombie,
            'T' => ProcState::Stopped,
            'I' => ProcState::Idle,
            _ => ProcState::Unknown,
        }
    }
}

impl fmt::Display for ProcState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProcState::Running => write!(f, "Running"),
            ProcState::Sleeping => write!(f, "Sleeping"),
            ProcState::DiskSleep => write!(f, "Disk Sleep"),
            ProcState::Zombie => write!(f, "Zombie"),
            ProcState::Stopped => write!(f, "Stopped"),
            ProcState::Idle => write!(f, "Idle"),
            ProcState::Unknown => write!(f, "Unknown"),
        }
    }
}

/// Identity fields parsed from `/proc/<pid>/status`.
///
/// Zombies and kernel threads have no `Vm*` lines; those fields stay zero.
#[derive(Debug, Clone, Default)]
pub struct ProcessStatus {
    pub pid: u32,
    pub name: String,
    pub state: Option<ProcState>,
    pub uid_real: u32,
    pub uid_effective: u32,
    pub gid_real: u32,
    pub gid_effective: u32,
    pub vm_size_kb: u64,
    pub vm_rss_kb: u64,
    pub vm_peak_kb: u64,
    pub threads: u32,
}

impl ProcessStatus {
    pub fn state(&self) -> ProcState {
        self.state.unwrap_or(ProcState::Unknown)
    }
}

/// One thread of a process, from `/proc/<pid>/task/<tid>/`.
#[derive(Debug, Clone)]
pub struct ThreadInfo {
    pub tid: u32,
    pub name: String,
    pub state: ProcState,
}
