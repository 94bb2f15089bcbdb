use crate::system::snapshot::UserSession;

pub const UTMP_PATH: &str = "/var/run/utmp";

pub const RECORD_SIZE: usize = 384;
pub const USER_PROCESS: i16 = 7;

const TYPE_OFFSET: usize = 0;
const LINE_OFFSET: usize = 8;
const LINE_LEN: usize = 32;
const USER_OFFSET: usize = 44;
const USER_LEN: usize = 32;
const HOST_OFFSET: usize = 76;
const HOST_LEN: usize = 256;

/// `USER_PROCESS` records in table order. A trailing partial record is ignored.
pub fn parse_sessions(table: &[u8]) -> Vec<UserSession> {
    table
        .chunks_exact(RECORD_SIZE)
        .filter(|record| record_type(record) == USER_PROCESS)
        .map(|record| UserSession {
            user: c_field(record, USER_OFFSET, USER_LEN),
            line: c_field(record, LINE_OFFSET, LINE_LEN),
            host: c_field(record, HOST_OFFSET, HOST_LEN),
        })
        .collect()
}

fn record_type(record: &[u8]) -> i16 {
    i16::from_ne_bytes([record[TYPE_OFFSET], record[TYPE_OFFSET + 1]])
}

fn c_field(record: &[u8], offset: usize, len: usize) -> String {
    let raw = &record[offset..offset + len];
    let end = raw.iter().position(|&b| b == 0).unwrap_or(len);
    String::from_utf8_lossy(&raw[..end]).into_owned()
}

#[cfg(test)]
pub(crate) fn encode_record(kind: i16, user: &str, line: &str, host: &str) -> Vec<u8> {
    let mut record = vec![0u8; RECORD_SIZE];
    record[TYPE_OFFSET..TYPE_OFFSET + 2].copy_from_slice(&kind.to_ne_bytes());
    record[LINE_OFFSET..LINE_OFFSET + line.len()].copy_from_slice(line.as_bytes());
    record[USER_OFFSET..USER_OFFSET + user.len()].copy_from_slice(user.as_bytes());
    record[HOST_OFFSET..HOST_OFFSET + host.len()].copy_from_slice(host.as_bytes());
    record
}
