use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    //-------------------------------------------------------------------------
    // IO / Parsing
    //-------------------------------------------------------------------------
    #[error("failed to read config file {path}: {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid configuration file: {path}\n\n{source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: hcl::Error,
    },

    #[error("failed to write config file {path}: {source}")]
    WriteFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{path} already exists, refusing to overwrite it")]
    AlreadyExists { path: PathBuf },

    //-------------------------------------------------------------------------
    // Validation
    //-------------------------------------------------------------------------
    #[error("config validation failed for {path}:{}", render_errors(.errors))]
    Validation {
        path: PathBuf,
        errors: Vec<ConfigError>,
    },

    #[error("invalid internal network '{network}': {source}")]
    InvalidNetwork {
        network: String,
        #[source]
        source: ipnet::AddrParseError,
    },

    #[error("status code {code} is outside 100-599")]
    InvalidStatusCode { code: u16 },

    #[error("status code {code} is listed more than once")]
    DuplicateStatusCode { code: u16 },

    #[error("top_n must be at least 1")]
    InvalidTopN,

    #[error("'{field}' must not contain empty entries")]
    EmptyEntry { field: &'static str },
}

impl ConfigError {
    pub fn read_file(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::ReadFile {
            path: path.into(),
            source,
        }
    }

    pub fn parse(path: impl Into<PathBuf>, source: hcl::Error) -> Self {
        Self::Parse {
            path: path.into(),
            source,
        }
    }
}

fn render_errors(errors: &[ConfigError]) -> String {
    errors.iter().map(|e| format!("\n  - {e}")).collect()
}
