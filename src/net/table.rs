use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::error::{PscopeError, Result};
use crate::model::{ConnectionRecord, Protocol};

use super::codec::decode_endpoint;

/// Columns required before a row is considered well-formed: slot, local,
/// remote, state, tx/rx queues, timer, retransmits, uid, timeout, inode.
const MIN_COLUMNS: usize = 10;

const COL_LOCAL: usize = 1;
const COL_REMOTE: usize = 2;
const COL_STATE: usize = 3;
const COL_INODE: usize = 9;

/// Read one protocol connection table, keeping only rows whose inode is in
/// `inodes`.
///
/// The first line is a column header and is discarded. The table is
/// host-global live state: truncated or undecodable rows belong to
/// unrelated sockets mid-update and are skipped, never fatal. An empty
/// inode set returns an empty result without opening the file at all.
/// Failing to open the table is an environment error (`Unavailable`), not
/// a per-process one.
pub fn read_connection_table(
    path: &Path,
    protocol: Protocol,
    inodes: &[u64],
) -> Result<Vec<ConnectionRecord>> {
    if inodes.is_empty() {
        return Ok(Vec::new());
    }

    let file = File::open(path).map_err(|e| PscopeError::Unavailable {
        path: path.to_path_buf(),
        source: e,
    })?;
    let reader = BufReader::new(file);

    let mut records = Vec::new();
    for line in reader.lines().skip(1).flatten() {
        if let Some(record) = parse_table_line(&line, protocol, inodes) {
            records.push(record);
        }
    }
    Ok(records)
}

/// Parse a single table row, returning `None` for rows that are malformed
/// or belong to other processes.
fn parse_table_line(line: &str, protocol: Protocol, inodes: &[u64]) -> Option<ConnectionRecord> {
    let cols: Vec<&str> = line.split_whitespace().collect();
    if cols.len() < MIN_COLUMNS {
        return None;
    }

    // Membership first: most rows on the host belong to other processes,
    // so they are dropped before any address decoding. The inode set is
    // small (one process's sockets), so a linear scan beats building a set.
    let inode: u64 = cols[COL_INODE].parse().ok()?;
    if !inodes.contains(&inode) {
        return None;
    }

    let (local_addr, local_port) = decode_endpoint(cols[COL_LOCAL]).ok()?;
    let (remote_addr, remote_port) = decode_endpoint(cols[COL_REMOTE]).ok()?;
    let state = u8::from_str_radix(cols[COL_STATE], 16).ok()?;

    Some(ConnectionRecord {
        protocol,
        local_addr,
        local_port,
        remote_addr,
        remote_port,
        state,
        inode,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::net::Ipv4Addr;

    const HEADER: &str = "  sl  local_address rem_address   st tx_queue rx_queue tr tm->when retrnsmt   uid  timeout inode";

    fn table_file(rows: &[&str]) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "{HEADER}").unwrap();
        for row in rows {
            writeln!(file, "{row}").unwrap();
        }
        file
    }

    fn row(slot: u32, local: &str, remote: &str, st: &str, inode: u64) -> String {
        format!(
            "   {slot}: {local} {remote} {st} 00000000:00000000 00:00000000 00000000  1000        0 {inode} 1 0000000000000000 100 0 0 10 0"
        )
    }

    #[test]
    fn test_filters_by_inode_preserving_order() {
        let file = table_file(&[
            &row(0, "0100007F:1F90", "00000000:0000", "0A", 111),
            &row(1, "0100007F:0016", "0100007F:D431", "01", 222),
            &row(2, "00000000:0050", "00000000:0000", "0A", 333),
            &row(3, "0100007F:1A0B", "0100007F:0016", "01", 444),
        ]);

        let records =
            read_connection_table(file.path(), Protocol::Tcp, &[444, 111]).unwrap();
        assert_eq!(records.len(), 2);
        // File order among survivors, not inode-set order.
        assert_eq!(records[0].inode, 111);
        assert_eq!(records[0].local_port, 8080);
        assert_eq!(records[0].state, 0x0A);
        assert_eq!(records[1].inode, 444);
        assert_eq!(records[1].remote_port, 22);
    }

    #[cfg(target_endian = "little")]
    #[test]
    fn test_decodes_addresses() {
        let file = table_file(&[&row(0, "0100007F:1F90", "00000000:0000", "0A", 5)]);

        let records = read_connection_table(file.path(), Protocol::Tcp, &[5]).unwrap();
        assert_eq!(records[0].local_addr, Ipv4Addr::new(127, 0, 0, 1));
        assert_eq!(records[0].remote_addr, Ipv4Addr::UNSPECIFIED);
    }

    #[test]
    fn test_short_line_skipped_not_fatal() {
        let file = table_file(&[
            "   0: 0100007F:1F90 00000000:0000 0A",
            &row(1, "0100007F:0016", "00000000:0000", "0A", 77),
        ]);

        let records = read_connection_table(file.path(), Protocol::Tcp, &[77]).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].inode, 77);
    }

    #[test]
    fn test_undecodable_address_skipped() {
        let file = table_file(&[
            &row(0, "ZZZZZZZZ:1F90", "00000000:0000", "0A", 88),
            &row(1, "0100007F:0016", "00000000:0000", "01", 99),
        ]);

        let records = read_connection_table(file.path(), Protocol::Tcp, &[88, 99]).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].inode, 99);
    }

    #[test]
    fn test_empty_inode_set_skips_open() {
        // The path does not exist; an attempted open would fail.
        let missing = Path::new("/nonexistent/net/tcp");
        let records = read_connection_table(missing, Protocol::Tcp, &[]).unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn test_missing_table_is_unavailable() {
        let missing = Path::new("/nonexistent/net/tcp");
        match read_connection_table(missing, Protocol::Tcp, &[1]) {
            Err(PscopeError::Unavailable { path, .. }) => {
                assert_eq!(path, missing.to_path_buf());
            }
            other => panic!("expected Unavailable, got {:?}", other),
        }
    }

    #[test]
    fn test_header_only_table_is_empty() {
        let file = table_file(&[]);
        let records = read_connection_table(file.path(), Protocol::Udp, &[1]).unwrap();
        assert!(records.is_empty());
    }
}
