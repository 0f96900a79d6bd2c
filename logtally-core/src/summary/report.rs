use crate::summary::accumulator::StatAccumulator;
use crate::summary::bucket_set::{BucketSet, Dimension};
use crate::summary::classify::{BucketKey, CacheClass, StatusClass};
use serde::ser::{SerializeMap, SerializeStruct, Serializer};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Section and field naming of the output document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    /// The older eight-section layout without byte totals or top-N tables.
    Legacy,
    #[default]
    Extended,
}

impl FromStr for Dialect {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "legacy" => Ok(Self::Legacy),
            "extended" => Ok(Self::Extended),
            _ => Err(format!("unknown dialect '{s}' (expected 'legacy' or 'extended')")),
        }
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Dialect::Legacy => f.write_str("legacy"),
            Dialect::Extended => f.write_str("extended"),
        }
    }
}

/// Statistics of one bucket as printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatsSection {
    pub dialect: Dialect,
    pub count: u64,
    pub min: u64,
    pub max: u64,
    pub avg: u64,
    pub sum: u64,
    pub bytes: u64,
}

impl StatsSection {
    fn new(dialect: Dialect, acc: &StatAccumulator) -> Self {
        Self {
            dialect,
            count: acc.count(),
            min: acc.min(),
            max: acc.max(),
            avg: acc.avg(),
            sum: acc.sum(),
            bytes: acc.bytes(),
        }
    }
}

impl Serialize for StatsSection {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.dialect {
            Dialect::Legacy => {
                let mut s = serializer.serialize_struct("StatsSection", 5)?;
                s.serialize_field("num_requests", &self.count)?;
                s.serialize_field("min", &self.min)?;
                s.serialize_field("max", &self.max)?;
                s.serialize_field("avg", &self.avg)?;
                s.serialize_field("sum", &self.sum)?;
                s.end()
            }
            Dialect::Extended => {
                let mut s = serializer.serialize_struct("StatsSection", 6)?;
                s.serialize_field("count", &self.count)?;
                s.serialize_field("min", &self.min)?;
                s.serialize_field("max", &self.max)?;
                s.serialize_field("avg", &self.avg)?;
                s.serialize_field("sum", &self.sum)?;
                s.serialize_field("bytes", &self.bytes)?;
                s.end()
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Section {
    Stats(StatsSection),
    /// Label to count, highest count first.
    Top(Vec<(String, u64)>),
}

impl Serialize for Section {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Section::Stats(stats) => stats.serialize(serializer),
            Section::Top(entries) => {
                let mut map = serializer.serialize_map(Some(entries.len()))?;
                for (label, count) in entries {
                    map.serialize_entry(label, count)?;
                }
                map.end()
            }
        }
    }
}

/// The finished summary: named sections in output order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Report {
    sections: Vec<(String, Section)>,
}

impl Report {
    pub fn get(&self, name: &str) -> Option<&Section> {
        self.sections
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, section)| section)
    }

    pub fn stats(&self, name: &str) -> Option<&StatsSection> {
        match self.get(name)? {
            Section::Stats(stats) => Some(stats),
            Section::Top(_) => None,
        }
    }

    pub fn top(&self, name: &str) -> Option<&[(String, u64)]> {
        match self.get(name)? {
            Section::Top(entries) => Some(entries),
            Section::Stats(_) => None,
        }
    }

    pub fn section_names(&self) -> impl Iterator<Item = &str> {
        self.sections.iter().map(|(name, _)| name.as_str())
    }

    pub fn sections(&self) -> &[(String, Section)] {
        &self.sections
    }

    fn push_stats(&mut self, name: impl Into<String>, dialect: Dialect, acc: &StatAccumulator) {
        self.sections
            .push((name.into(), Section::Stats(StatsSection::new(dialect, acc))));
    }
}

impl Serialize for Report {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.sections.len()))?;
        for (name, section) in &self.sections {
            map.serialize_entry(name, section)?;
        }
        map.end()
    }
}

/// Turns a finished [`BucketSet`] into a [`Report`] in one dialect.
#[derive(Debug, Clone, Copy)]
pub struct Reporter {
    dialect: Dialect,
    top_n: usize,
}

impl Reporter {
    pub fn new(dialect: Dialect, top_n: usize) -> Self {
        Self { dialect, top_n }
    }

    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    pub fn report(&self, buckets: &BucketSet) -> Report {
        match self.dialect {
            Dialect::Legacy => self.legacy(buckets),
            Dialect::Extended => self.extended(buckets),
        }
    }

    fn extended(&self, buckets: &BucketSet) -> Report {
        let dialect = Dialect::Extended;
        let mut report = Report::default();

        let mut keys = vec![BucketKey::Total];
        keys.extend(CacheClass::ALL.map(BucketKey::Cache));
        keys.extend(StatusClass::ALL.map(BucketKey::Status));
        keys.extend(buckets.status_codes().map(BucketKey::Code));
        keys.push(BucketKey::Internal);

        for key in keys {
            report.push_stats(key.to_string(), dialect, &buckets.stats(key));
        }

        for dimension in Dimension::ALL {
            let top = buckets
                .counter(dimension)
                .top(self.top_n)
                .into_iter()
                .map(|(label, count)| (label.to_string(), count))
                .collect();
            report
                .sections
                .push((format!("top-{}", dimension.name()), Section::Top(top)));
        }

        report
    }

    /// The legacy sections are renames or merges of the extended buckets.
    fn legacy(&self, buckets: &BucketSet) -> Report {
        let dialect = Dialect::Legacy;
        let mut report = Report::default();

        let merged = |keys: &[BucketKey]| {
            let mut acc = StatAccumulator::new();
            for key in keys {
                acc.merge(&buckets.stats(*key));
            }
            acc
        };

        let uncached = merged(&[
            BucketKey::Cache(CacheClass::None),
            BucketKey::Cache(CacheClass::Miss),
            BucketKey::Cache(CacheClass::Other),
        ]);
        let php_total = merged(&[BucketKey::DynamicCached, BucketKey::DynamicUncached]);

        report.push_stats("total", dialect, &buckets.stats(BucketKey::Total));
        report.push_stats(
            "cached",
            dialect,
            &buckets.stats(BucketKey::Cache(CacheClass::Hit)),
        );
        report.push_stats("uncached", dialect, &uncached);
        report.push_stats("php_total", dialect, &php_total);
        report.push_stats(
            "php_cached",
            dialect,
            &buckets.stats(BucketKey::DynamicCached),
        );
        report.push_stats(
            "php_uncached",
            dialect,
            &buckets.stats(BucketKey::DynamicUncached),
        );
        report.push_stats("static", dialect, &buckets.stats(BucketKey::Static));
        report.push_stats("internal", dialect, &buckets.stats(BucketKey::Internal));

        report
    }
}
