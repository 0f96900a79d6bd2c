use crate::summary::bucket_set::{BucketSet, Dimension};
use crate::summary::classify::Classifier;
use crate::summary::parse::{ParseError, parse_line};
use crate::summary::types::Record;
use chrono::{DateTime, FixedOffset};
use std::sync::Arc;

/// Counters describing the pass itself rather than the traffic.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunStats {
    pub lines: u64,
    pub parsed: u64,
    pub skipped: u64,
    pub blank: u64,
    pub first_timestamp: Option<DateTime<FixedOffset>>,
    pub last_timestamp: Option<DateTime<FixedOffset>>,
}

impl RunStats {
    fn merge(&mut self, other: &RunStats) {
        self.lines += other.lines;
        self.parsed += other.parsed;
        self.skipped += other.skipped;
        self.blank += other.blank;
        self.first_timestamp = self.first_timestamp.or(other.first_timestamp);
        self.last_timestamp = other.last_timestamp.or(self.last_timestamp);
    }
}

/// Folds records into a [`BucketSet`] in input order.
pub struct Aggregator {
    classifier: Arc<Classifier>,
    buckets: BucketSet,
    stats: RunStats,
}

impl Aggregator {
    pub fn new(classifier: Arc<Classifier>) -> Self {
        let buckets = BucketSet::new(classifier.status_codes());
        Self {
            classifier,
            buckets,
            stats: RunStats::default(),
        }
    }

    /// Fold one record into every bucket it belongs to and rank its labels.
    /// Top-N tables only track the overall traffic.
    pub fn process(&mut self, record: &Record) {
        let keys = self.classifier.classify(record);

        // Resolve every slot before touching any, so a record never lands
        // in only some of its buckets.
        let missing = keys.iter().find(|key| self.buckets.bucket(**key).is_none());
        if let Some(key) = missing {
            tracing::error!(bucket = %key, "record classified into an unknown bucket, dropping it");
            return;
        }

        for key in &keys {
            if let Some(bucket) = self.buckets.bucket_mut(*key) {
                bucket.fold(record.request_time_ms, record.bytes_sent);
            }
        }

        for dimension in Dimension::ALL {
            let label = dimension.label(record);
            self.buckets.counter_mut(dimension).observe(&label);
        }

        self.stats.parsed += 1;
        self.stats.first_timestamp.get_or_insert(record.timestamp);
        self.stats.last_timestamp = Some(record.timestamp);
    }

    /// Parse and fold one raw line. A line that fails to parse is counted
    /// as skipped and leaves every bucket untouched.
    pub fn process_line(&mut self, line: &[u8]) -> Result<(), ParseError> {
        self.stats.lines += 1;

        let Ok(line) = std::str::from_utf8(line) else {
            self.stats.skipped += 1;
            return Err(ParseError::InvalidUtf8);
        };

        if line.trim().is_empty() {
            self.stats.blank += 1;
            return Ok(());
        }

        match parse_line(line) {
            Ok(record) => {
                self.process(&record);
                Ok(())
            }
            Err(e) => {
                self.stats.skipped += 1;
                Err(e)
            }
        }
    }

    /// Absorb an aggregator that processed the input directly following
    /// this one's.
    pub fn merge(&mut self, other: Aggregator) {
        self.buckets.merge(&other.buckets);
        self.stats.merge(&other.stats);
    }

    pub fn buckets(&self) -> &BucketSet {
        &self.buckets
    }

    pub fn stats(&self) -> &RunStats {
        &self.stats
    }

    pub fn into_parts(self) -> (BucketSet, RunStats) {
        (self.buckets, self.stats)
    }
}
