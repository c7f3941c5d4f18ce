pub mod codec;
mod correlate;
mod table;

pub use correlate::find_process_sockets;
