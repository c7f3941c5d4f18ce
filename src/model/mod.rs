mod fd;
mod net;
mod process;

pub use fd::FdEntry;
pub use net::{ConnectionRecord, Protocol, SocketInfo, TcpState};
pub use process::{ProcState, ProcessStatus, ThreadInfo};
