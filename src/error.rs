use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PscopeError {
    #[error("no such process: PID {0}")]
    ProcessNotFound(u32),
    #[error("permission denied: PID {0}")]
    PermissionDenied(u32),
    #[error("cannot open {}: {}", .path.display(), .source)]
    Unavailable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("out of memory reading {}", .0.display())]
    ResourceExhausted(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, PscopeError>;
