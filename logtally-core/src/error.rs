use crate::conf::ConfigError;
use crate::summary::ParseError;
use std::path::PathBuf;
use thiserror::Error;

/// Conditions that end a run without a report.
#[derive(Debug, Error)]
pub enum SummaryError {
    #[error("cannot open log source {path}: {source}")]
    Source {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read log source {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed line {line}: {source}")]
    Malformed {
        line: u64,
        #[source]
        source: ParseError,
    },

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("failed to write report to {}: {source}", output_name(.path))]
    Output {
        path: Option<PathBuf>,
        #[source]
        source: std::io::Error,
    },
}

fn output_name(path: &Option<PathBuf>) -> String {
    match path {
        Some(path) => path.display().to_string(),
        None => "<stdout>".to_string(),
    }
}
