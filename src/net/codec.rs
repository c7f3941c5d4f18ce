//! Pure conversion helpers for the /proc/net tables: endpoint-token
//! decoding, endpoint rendering, descriptor-target classification, and
//! state-code labels. No I/O and no state.

use std::net::Ipv4Addr;

use thiserror::Error;

use crate::model::TcpState;

/// A token that does not match the fixed `<8-hex>:<4-hex>` layout.
///
/// Never escalated past a single table line; the reader skips the line.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum CodecError {
    #[error("expected <8-hex-addr>:<4-hex-port>, got {0:?}")]
    TokenShape(String),
    #[error("non-hex digit in {0:?}")]
    BadHex(String),
}

/// Decode an endpoint token such as `"0100007F:1F90"`.
///
/// The kernel prints the 32-bit address as a native-endian integer whose
/// underlying bytes are the network-order octets, so reassembly must go
/// through the host's byte order rather than an unconditional swap. The
/// port prints big-endian, which plain hex parsing already yields as the
/// host-native value.
pub fn decode_endpoint(token: &str) -> Result<(Ipv4Addr, u16), CodecError> {
    let Some((addr_hex, port_hex)) = token.split_once(':') else {
        return Err(CodecError::TokenShape(token.to_string()));
    };
    if addr_hex.len() != 8 || port_hex.len() != 4 {
        return Err(CodecError::TokenShape(token.to_string()));
    }

    let raw = u32::from_str_radix(addr_hex, 16)
        .map_err(|_| CodecError::BadHex(token.to_string()))?;
    let port = u16::from_str_radix(port_hex, 16)
        .map_err(|_| CodecError::BadHex(token.to_string()))?;

    Ok((Ipv4Addr::from(raw.to_ne_bytes()), port))
}

/// Render an endpoint as `"a.b.c.d:port"`.
pub fn format_endpoint(addr: Ipv4Addr, port: u16) -> String {
    format!("{addr}:{port}")
}

/// Extract the inode from a descriptor target of the exact form
/// `socket:[<decimal-digits>]`. Every other target shape (paths, pipes,
/// anon inodes, deleted files) is not a socket.
pub fn parse_socket_inode(target: &str) -> Option<u64> {
    let digits = target.strip_prefix("socket:[")?.strip_suffix(']')?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

impl TcpState {
    /// Map the `st` column byte to a connection state.
    ///
    /// The kernel defines eleven values; anything else (including the
    /// placeholder states on UDP rows of future kernels) is carried as
    /// `Unknown` rather than rejected.
    pub fn from_code(code: u8) -> Self {
        match code {
            0x01 => TcpState::Established,
            0x02 => TcpState::SynSent,
            0x03 => TcpState::SynRecv,
            0x04 => TcpState::FinWait1,
            0x05 => TcpState::FinWait2,
            0x06 => TcpState::TimeWait,
            0x07 => TcpState::Close,
            0x08 => TcpState::CloseWait,
            0x09 => TcpState::LastAck,
            0x0A => TcpState::Listen,
            0x0B => TcpState::Closing,
            other => TcpState::Unknown(other),
        }
    }
}
