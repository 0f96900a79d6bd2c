use super::{LineSpec, default_classifier};
use crate::summary::{
    Aggregator, BucketKey, CacheClass, Dimension, ParseError, StatusClass,
};
use pretty_assertions::assert_eq;

fn sample_lines() -> Vec<String> {
    vec![
        LineSpec::default().render(),
        LineSpec {
            status: 404,
            cache: "MISS",
            request_time: "0.020",
            bytes: 0,
            time: "16/Oct/2026:10:00:05 +0000",
            ..LineSpec::default()
        }
        .render(),
        "this is not an access log line".to_string(),
    ]
}

fn aggregate(lines: &[String]) -> Aggregator {
    let mut aggregator = Aggregator::new(default_classifier());
    for line in lines {
        let _ = aggregator.process_line(line.as_bytes());
    }
    aggregator
}

#[test]
fn folds_parsed_lines_and_skips_malformed_ones() {
    // Arrange / Act
    let aggregator = aggregate(&sample_lines());
    let buckets = aggregator.buckets();

    // Assert
    let total = buckets.stats(BucketKey::Total);
    assert_eq!(
        (total.count(), total.min(), total.max(), total.sum(), total.avg()),
        (2, 20, 50, 70, 35)
    );

    let hit = buckets.stats(BucketKey::Cache(CacheClass::Hit));
    assert_eq!((hit.count(), hit.sum()), (1, 50));

    let miss = buckets.stats(BucketKey::Cache(CacheClass::Miss));
    assert_eq!((miss.count(), miss.sum()), (1, 20));

    assert_eq!(buckets.stats(BucketKey::Status(StatusClass::ClientError)).count(), 1);
    assert_eq!(buckets.stats(BucketKey::Status(StatusClass::Success)).count(), 1);

    let stats = aggregator.stats();
    assert_eq!((stats.lines, stats.parsed, stats.skipped), (3, 2, 1));
}

#[test]
fn cache_buckets_partition_total() {
    // Arrange
    let lines: Vec<String> = ["HIT", "MISS", "-", "BYPASS", "EXPIRED", "HIT", "UPDATING"]
        .iter()
        .map(|&cache| {
            LineSpec {
                cache,
                ..LineSpec::default()
            }
            .render()
        })
        .collect();

    // Act
    let aggregator = aggregate(&lines);
    let buckets = aggregator.buckets();

    // Assert
    let cache_total: u64 = CacheClass::ALL
        .iter()
        .map(|class| buckets.stats(BucketKey::Cache(*class)).count())
        .sum();
    assert_eq!(cache_total, buckets.stats(BucketKey::Total).count());
    assert_eq!(buckets.stats(BucketKey::Cache(CacheClass::None)).count(), 2);
    assert_eq!(buckets.stats(BucketKey::Cache(CacheClass::Other)).count(), 2);
}

#[test]
fn content_buckets_partition_total() {
    let lines: Vec<String> = [
        ("GET /index.php HTTP/1.1", "HIT"),
        ("GET /index.php HTTP/1.1", "MISS"),
        ("GET /logo.png HTTP/1.1", "HIT"),
        ("GET /api/v1/items HTTP/1.1", "-"),
    ]
    .iter()
    .map(|&(request, cache)| {
        LineSpec {
            request,
            cache,
            ..LineSpec::default()
        }
        .render()
    })
    .collect();

    let aggregator = aggregate(&lines);
    let buckets = aggregator.buckets();

    assert_eq!(buckets.stats(BucketKey::DynamicCached).count(), 1);
    assert_eq!(buckets.stats(BucketKey::DynamicUncached).count(), 2);
    assert_eq!(buckets.stats(BucketKey::Static).count(), 1);
}

#[test]
fn zero_request_time_is_a_real_sample() {
    let lines = vec![
        LineSpec {
            request_time: "0.000",
            ..LineSpec::default()
        }
        .render(),
    ];

    let aggregator = aggregate(&lines);
    let total = aggregator.buckets().stats(BucketKey::Total);

    assert_eq!((total.count(), total.min(), total.max(), total.sum()), (1, 0, 0, 0));
}

#[test]
fn malformed_line_leaves_buckets_untouched() {
    // Arrange
    let mut aggregator = Aggregator::new(default_classifier());

    // Act
    let result = aggregator.process_line(b"garbage");

    // Assert
    assert!(result.is_err());
    assert!(aggregator.buckets().stats(BucketKey::Total).is_empty());
    assert_eq!(aggregator.buckets().counter(Dimension::Hostname).total(), 0);
    assert_eq!(aggregator.stats().skipped, 1);
}

#[test]
fn invalid_utf8_is_skipped() {
    let mut aggregator = Aggregator::new(default_classifier());

    let result = aggregator.process_line(&[0x66, 0xff, 0xfe, b'\n']);

    assert_eq!(result, Err(ParseError::InvalidUtf8));
    assert_eq!(aggregator.stats().skipped, 1);
    assert_eq!(aggregator.stats().parsed, 0);
}

#[test]
fn blank_lines_are_counted_but_not_malformed() {
    let mut aggregator = Aggregator::new(default_classifier());

    assert!(aggregator.process_line(b"\n").is_ok());
    assert!(aggregator.process_line(b"   \r\n").is_ok());

    let stats = aggregator.stats();
    assert_eq!((stats.lines, stats.blank, stats.skipped), (2, 2, 0));
}

#[test]
fn dimensions_are_ranked_per_record() {
    let lines = vec![
        LineSpec::default().render(),
        LineSpec {
            request: "POST /login HTTP/1.1",
            user: "alice",
            ..LineSpec::default()
        }
        .render(),
        LineSpec::default().render(),
    ];

    let aggregator = aggregate(&lines);
    let buckets = aggregator.buckets();

    assert_eq!(
        buckets.counter(Dimension::RequestType).top(9),
        vec![("GET", 2), ("POST", 1)]
    );
    assert_eq!(
        buckets.counter(Dimension::RemoteUser).top(9),
        vec![("-", 2), ("alice", 1)]
    );
    assert_eq!(buckets.counter(Dimension::Status).top(1), vec![("200", 3)]);
}

#[test]
fn timestamps_track_first_and_last_record() {
    let aggregator = aggregate(&sample_lines());
    let stats = aggregator.stats();

    assert_eq!(
        stats.first_timestamp.map(|t| t.to_rfc3339()),
        Some("2026-10-16T10:00:00+00:00".to_string())
    );
    assert_eq!(
        stats.last_timestamp.map(|t| t.to_rfc3339()),
        Some("2026-10-16T10:00:05+00:00".to_string())
    );
}

#[test]
fn merging_chunks_matches_a_single_pass() {
    // Arrange
    let mut lines = sample_lines();
    lines.push(
        LineSpec {
            status: 503,
            cache: "-",
            addr: "10.0.0.4",
            request_time: "1.250",
            ..LineSpec::default()
        }
        .render(),
    );
    lines.push(LineSpec::default().render());
    let whole = aggregate(&lines);

    // Act
    let mut merged = aggregate(&lines[..2]);
    merged.merge(aggregate(&lines[2..]));

    // Assert
    for key in [
        BucketKey::Total,
        BucketKey::Cache(CacheClass::Hit),
        BucketKey::Cache(CacheClass::None),
        BucketKey::Status(StatusClass::ServerError),
        BucketKey::Code(503),
        BucketKey::Internal,
        BucketKey::DynamicCached,
        BucketKey::DynamicUncached,
    ] {
        assert_eq!(merged.buckets().stats(key), whole.buckets().stats(key), "{key}");
    }
    for dimension in Dimension::ALL {
        assert_eq!(
            merged.buckets().counter(dimension).top(9),
            whole.buckets().counter(dimension).top(9),
        );
    }
    assert_eq!(merged.stats(), whole.stats());
}

#[test]
fn every_bucket_keeps_avg_between_min_and_max() {
    // Arrange
    let times = ["0.001", "0.333", "2.718", "0.000", "0.050", "9.999", "0.7"];
    let caches = ["HIT", "MISS", "-", "STALE"];
    let lines: Vec<String> = times
        .iter()
        .enumerate()
        .map(|(i, &request_time)| {
            LineSpec {
                request_time,
                cache: caches[i % caches.len()],
                status: [200, 301, 404, 503][i % 4],
                ..LineSpec::default()
            }
            .render()
        })
        .collect();

    // Act
    let aggregator = aggregate(&lines);

    // Assert
    let keys = [BucketKey::Total, BucketKey::Code(503), BucketKey::DynamicCached]
        .into_iter()
        .chain(CacheClass::ALL.map(BucketKey::Cache))
        .chain(StatusClass::ALL.map(BucketKey::Status));
    for key in keys {
        let acc = aggregator.buckets().stats(key);
        if acc.is_empty() {
            continue;
        }
        assert!(acc.min() <= acc.avg() && acc.avg() <= acc.max(), "{key}");
        assert!(acc.sum() - acc.count() * acc.avg() < acc.count(), "{key}");
    }
}

#[test]
fn huge_byte_counts_and_request_times_do_not_overflow() {
    // Arrange
    let lines = vec![
        LineSpec {
            bytes: u64::MAX,
            ..LineSpec::default()
        }
        .render(),
        LineSpec {
            bytes: u64::MAX,
            ..LineSpec::default()
        }
        .render(),
        LineSpec {
            request_time: "10000000000000000.000",
            ..LineSpec::default()
        }
        .render(),
        LineSpec {
            request_time: "10000000000000000.000",
            ..LineSpec::default()
        }
        .render(),
    ];

    // Act
    let aggregator = aggregate(&lines);

    // Assert
    let total = aggregator.buckets().stats(BucketKey::Total);
    assert_eq!(aggregator.stats().parsed, 4);
    assert_eq!(total.count(), 4);
    assert_eq!(total.bytes(), u64::MAX);
    assert_eq!(total.sum(), u64::MAX);
    assert_eq!(total.max(), 10_000_000_000_000_000_000);
    assert_eq!(total.min(), 50);
}
