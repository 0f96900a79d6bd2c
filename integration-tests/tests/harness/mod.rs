#[allow(dead_code)]
pub mod tracing;

use logtally_core::cli::summarize::SummarizeArgs;
use logtally_core::cli::OutputFormat;
use logtally_core::summary::LogSource;
use std::fs;
use std::path::{Path, PathBuf};

pub use self::tracing::captured_events;

pub fn fixture(file: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("fixtures")
        .join(file)
}

pub fn fixture_lines(file: &str) -> Vec<String> {
    fs::read_to_string(fixture(file))
        .unwrap()
        .lines()
        .map(str::to_string)
        .collect()
}

/// Arguments equivalent to `logtally summarize <source>` with no flags.
pub fn summarize_args(source: &Path) -> SummarizeArgs {
    SummarizeArgs {
        source: LogSource::File(source.to_path_buf()),
        config: None,
        dialect: None,
        top: None,
        format: OutputFormat::Json,
        output: None,
        jobs: 1,
        strict: false,
    }
}
