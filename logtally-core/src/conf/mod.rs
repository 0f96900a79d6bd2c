mod error;
mod loader;
pub mod types;
mod validate;


pub use error::ConfigError;
pub use loader::{
    DEFAULT_CONFIG_TEMPLATE, load_config, load_optional_config, parse_config,
    write_default_config,
};
pub use types::{ClassifyConfig, ReportConfig, SummaryConfig};
pub use validate::validate_config;
