//! Access Log Summary Pipeline
//!
//! This module turns an nginx access log into one summary document.
//!
//! Every line is parsed into a [`Record`]. The record is then sorted into all
//! the buckets it belongs to (overall traffic, cache status, status class,
//! specific status codes, internal origin, static vs dynamic content), and
//! each bucket keeps running totals: how many requests, the fastest and
//! slowest, the summed latency and bytes. Alongside, a few fields (hostname,
//! client address, user, method, protocol, status, cache status, server) are
//! counted so the most frequent values can be listed.
//!
//! Lines that do not parse are skipped and counted, they never touch a bucket.
//!
//! Once the whole input has been read, the buckets are rendered in one of two
//! dialects: the legacy eight-section layout, or the extended layout with
//! byte totals and top-N tables.
//!
//! The overall data processing architecture is:
//!
//! LogSource
//! parse_line
//! Record
//! Classifier
//! Aggregator
//! BucketSet
//! Reporter
//! Report
//!

mod accumulator;
mod aggregate;
mod bucket_set;
mod classify;
pub mod constants;
mod parse;
mod report;
mod run;
mod top_n;
mod types;

#[cfg(test)]
mod tests;

pub use accumulator::StatAccumulator;
pub use aggregate::{Aggregator, RunStats};
pub use bucket_set::{BucketSet, Dimension};
pub use classify::{
    BucketKey, BucketKeys, CacheClass, Classifier, ContentClass, NetworkOrigin, OriginPredicate,
    StatusClass,
};
pub use parse::{ParseError, parse_line};
pub use report::{Dialect, Report, Reporter, Section, StatsSection};
pub use run::{LogSource, RunOptions, Summary, aggregate_reader, summarize};
pub use top_n::TopNCounter;
pub use types::{ABSENT, Record};
