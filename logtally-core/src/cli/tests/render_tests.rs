use crate::cli::render::{render_text, write_report};
use crate::cli::OutputFormat;
use crate::conf::ClassifyConfig;
use crate::summary::{Aggregator, Classifier, Dialect, Report, Reporter};
use pretty_assertions::assert_eq;
use std::sync::Arc;

const LINE: &str = "example.com 203.0.113.7 - - [16/Oct/2026:10:00:00 +0000] \
                    \"GET /index.php HTTP/1.1\" 200 5120 \"-\" \"Mozilla/5.0\" HIT \"example.com\" 0.050";

fn report(dialect: Dialect, lines: &[&str]) -> Report {
    let classifier = Arc::new(Classifier::from_config(&ClassifyConfig::default()).unwrap());
    let mut aggregator = Aggregator::new(classifier);
    for line in lines {
        aggregator.process_line(line.as_bytes()).unwrap();
    }
    Reporter::new(dialect, 9).report(aggregator.buckets())
}

fn written(report: &Report, format: OutputFormat) -> String {
    let mut buf = Vec::new();
    write_report(report, format, &mut buf).unwrap();
    String::from_utf8(buf).unwrap()
}

#[test]
fn json_uses_four_space_indent() {
    let out = written(&report(Dialect::Legacy, &[LINE]), OutputFormat::Json);

    assert!(
        out.starts_with("{\n    \"total\": {\n        \"num_requests\": 1,\n"),
        "{out}"
    );
    assert!(out.ends_with("}\n"));
}

#[test]
fn compact_is_a_single_line() {
    let out = written(&report(Dialect::Legacy, &[]), OutputFormat::Compact);

    assert_eq!(out.lines().count(), 1);
    assert!(out.starts_with("{\"total\":{\"num_requests\":0,\"min\":0"));
}

#[test]
fn formats_agree_on_content() {
    let report = report(Dialect::Extended, &[LINE, LINE]);

    let pretty: serde_json::Value =
        serde_json::from_str(&written(&report, OutputFormat::Json)).unwrap();
    let compact: serde_json::Value =
        serde_json::from_str(&written(&report, OutputFormat::Compact)).unwrap();

    assert_eq!(pretty, compact);
}

#[test]
fn text_lists_stats_then_top_tables() {
    // Arrange
    let report = report(Dialect::Extended, &[LINE]);

    // Act
    let text = render_text(&report);

    // Assert
    let total_row = text.lines().find(|l| l.starts_with("total ")).unwrap();
    let columns: Vec<&str> = total_row.split_whitespace().collect();
    assert_eq!(columns, vec!["total", "1", "50", "50", "50", "50", "5120"]);

    let stats_end = text.find("top-hostname:").unwrap();
    assert!(text.find("internal ").unwrap() < stats_end);
    assert!(text.contains("  example.com"));
}

#[test]
fn text_marks_empty_top_tables() {
    let text = render_text(&report(Dialect::Extended, &[]));

    assert_eq!(text.matches("<no samples>").count(), 8);
}

#[test]
fn legacy_text_has_no_top_tables() {
    let text = render_text(&report(Dialect::Legacy, &[LINE]));

    assert!(!text.contains("top-"));
    assert!(text.lines().any(|l| l.starts_with("php_cached ")));
}
