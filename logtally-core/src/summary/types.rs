use chrono::{DateTime, FixedOffset};
use smallvec::SmallVec;

/// Marker nginx writes for a field it did not log.
pub const ABSENT: &str = "-";

/// One parsed access log line.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub hostname: String,
    pub remote_addr: String,
    pub remote_user: String,
    pub timestamp: DateTime<FixedOffset>,
    pub request_method: String,
    pub request_uri: String,
    pub protocol: String,
    pub status: u16,
    pub bytes_sent: u64,
    pub referer: String,
    pub user_agent: String,
    pub cache_status: String,
    pub server: String,
    pub request_time_ms: u64,
    /// One entry per upstream attempt; empty when the line has none or `-`.
    pub upstream_status: SmallVec<[u16; 2]>,
}

impl Record {
    /// Request path without the query string.
    pub fn path(&self) -> &str {
        match self.request_uri.split_once('?') {
            Some((path, _)) => path,
            None => &self.request_uri,
        }
    }
}
