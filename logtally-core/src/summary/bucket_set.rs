use crate::summary::accumulator::StatAccumulator;
use crate::summary::classify::{BucketKey, CacheClass, StatusClass};
use crate::summary::top_n::TopNCounter;
use crate::summary::types::Record;
use std::borrow::Cow;

const DIMENSIONS: usize = 8;
const FIXED_BUCKETS: usize = 13;

/// Categorical fields ranked in top-N tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dimension {
    Hostname,
    RemoteAddr,
    RemoteUser,
    RequestType,
    Protocol,
    Status,
    Cache,
    Server,
}

impl Dimension {
    pub const ALL: [Dimension; DIMENSIONS] = [
        Self::Hostname,
        Self::RemoteAddr,
        Self::RemoteUser,
        Self::RequestType,
        Self::Protocol,
        Self::Status,
        Self::Cache,
        Self::Server,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Hostname => "hostname",
            Self::RemoteAddr => "remote_addr",
            Self::RemoteUser => "remote_user",
            Self::RequestType => "request_type",
            Self::Protocol => "protocol",
            Self::Status => "status",
            Self::Cache => "cache",
            Self::Server => "server",
        }
    }

    /// The record's label for this dimension. Absent markers are labels too.
    pub fn label(self, record: &Record) -> Cow<'_, str> {
        match self {
            Self::Hostname => Cow::Borrowed(record.hostname.as_str()),
            Self::RemoteAddr => Cow::Borrowed(record.remote_addr.as_str()),
            Self::RemoteUser => Cow::Borrowed(record.remote_user.as_str()),
            Self::RequestType => Cow::Borrowed(record.request_method.as_str()),
            Self::Protocol => Cow::Borrowed(record.protocol.as_str()),
            Self::Status => Cow::Owned(record.status.to_string()),
            Self::Cache => Cow::Borrowed(record.cache_status.as_str()),
            Self::Server => Cow::Borrowed(record.server.as_str()),
        }
    }

    fn slot(self) -> usize {
        self as usize
    }
}

/// All accumulators of one run: a fixed set of buckets, one bucket per
/// configured status code, and one counter per dimension.
#[derive(Debug, Clone)]
pub struct BucketSet {
    fixed: [StatAccumulator; FIXED_BUCKETS],
    codes: Vec<(u16, StatAccumulator)>,
    counters: [TopNCounter; DIMENSIONS],
}

impl BucketSet {
    pub fn new(status_codes: &[u16]) -> Self {
        let mut codes: Vec<(u16, StatAccumulator)> = Vec::with_capacity(status_codes.len());
        for &code in status_codes {
            if !codes.iter().any(|(c, _)| *c == code) {
                codes.push((code, StatAccumulator::new()));
            }
        }

        Self {
            fixed: [StatAccumulator::new(); FIXED_BUCKETS],
            codes,
            counters: Default::default(),
        }
    }

    pub fn bucket(&self, key: BucketKey) -> Option<&StatAccumulator> {
        match key {
            BucketKey::Code(code) => self.codes.iter().find(|(c, _)| *c == code).map(|(_, a)| a),
            fixed => fixed_slot(fixed).map(|slot| &self.fixed[slot]),
        }
    }

    /// Like [`BucketSet::bucket`], with unconfigured code buckets reading as empty.
    pub fn stats(&self, key: BucketKey) -> StatAccumulator {
        self.bucket(key).copied().unwrap_or_default()
    }

    pub fn bucket_mut(&mut self, key: BucketKey) -> Option<&mut StatAccumulator> {
        match key {
            BucketKey::Code(code) => self
                .codes
                .iter_mut()
                .find(|(c, _)| *c == code)
                .map(|(_, a)| a),
            fixed => fixed_slot(fixed).map(|slot| &mut self.fixed[slot]),
        }
    }

    pub fn counter(&self, dimension: Dimension) -> &TopNCounter {
        &self.counters[dimension.slot()]
    }

    pub fn counter_mut(&mut self, dimension: Dimension) -> &mut TopNCounter {
        &mut self.counters[dimension.slot()]
    }

    /// Configured status codes, in configuration order.
    pub fn status_codes(&self) -> impl Iterator<Item = u16> + '_ {
        self.codes.iter().map(|(code, _)| *code)
    }

    /// Merge a partial set built from later input. Code buckets not
    /// configured in `self` are ignored.
    pub fn merge(&mut self, other: &BucketSet) {
        for (mine, theirs) in self.fixed.iter_mut().zip(other.fixed.iter()) {
            mine.merge(theirs);
        }

        for (code, theirs) in &other.codes {
            if let Some(mine) = self.bucket_mut(BucketKey::Code(*code)) {
                mine.merge(theirs);
            }
        }

        for (mine, theirs) in self.counters.iter_mut().zip(other.counters.iter()) {
            mine.merge(theirs);
        }
    }
}

fn fixed_slot(key: BucketKey) -> Option<usize> {
    let slot = match key {
        BucketKey::Total => 0,
        BucketKey::Cache(CacheClass::None) => 1,
        BucketKey::Cache(CacheClass::Hit) => 2,
        BucketKey::Cache(CacheClass::Miss) => 3,
        BucketKey::Cache(CacheClass::Other) => 4,
        BucketKey::Status(StatusClass::Success) => 5,
        BucketKey::Status(StatusClass::Redirection) => 6,
        BucketKey::Status(StatusClass::ClientError) => 7,
        BucketKey::Status(StatusClass::ServerError) => 8,
        BucketKey::Internal => 9,
        BucketKey::DynamicCached => 10,
        BucketKey::DynamicUncached => 11,
        BucketKey::Static => 12,
        BucketKey::Code(_) => return None,
    };
    Some(slot)
}
