use crate::conf::error::ConfigError;
use crate::conf::types::SummaryConfig;
use crate::conf::validate::validate_config;
use std::fs;
use std::path::Path;

pub const DEFAULT_CONFIG_TEMPLATE: &str = include_str!("../../config-templates/logtally.hcl");

/// Read, parse and validate a config file.
pub fn load_config(path: &Path) -> Result<SummaryConfig, ConfigError> {
    let contents = fs::read_to_string(path).map_err(|e| ConfigError::read_file(path, e))?;
    parse_config(&contents, path)
}

/// Built-in defaults when no file is given.
pub fn load_optional_config(path: Option<&Path>) -> Result<SummaryConfig, ConfigError> {
    match path {
        Some(path) => load_config(path),
        None => Ok(SummaryConfig::default()),
    }
}

/// `path` only labels errors.
pub fn parse_config(contents: &str, path: &Path) -> Result<SummaryConfig, ConfigError> {
    let cfg: SummaryConfig = hcl::from_str(contents).map_err(|e| ConfigError::parse(path, e))?;

    let errors = validate_config(&cfg);
    if !errors.is_empty() {
        return Err(ConfigError::Validation {
            path: path.to_path_buf(),
            errors,
        });
    }

    Ok(cfg)
}

/// Write the default config to `path`, never replacing an existing file.
pub fn write_default_config(path: &Path) -> Result<(), ConfigError> {
    if path.exists() {
        return Err(ConfigError::AlreadyExists {
            path: path.to_path_buf(),
        });
    }

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|source| ConfigError::WriteFile {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    fs::write(path, DEFAULT_CONFIG_TEMPLATE).map_err(|source| ConfigError::WriteFile {
        path: path.to_path_buf(),
        source,
    })
}
