use crate::summary::Dialect;
use crate::summary::constants::{
    DEFAULT_INTERNAL_NETWORKS, DEFAULT_INTERNAL_USER_AGENTS, DEFAULT_STATIC_EXTENSIONS,
    DEFAULT_STATUS_CODES, DEFAULT_TOP_N,
};
use serde::{Deserialize, Serialize};

/// Contents of a `logtally.hcl` file.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct SummaryConfig {
    #[serde(default)]
    pub report: ReportConfig,

    #[serde(default)]
    pub classify: ClassifyConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ReportConfig {
    #[serde(default)]
    pub dialect: Dialect,

    #[serde(default = "default_top_n")]
    pub top_n: usize,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            dialect: Dialect::default(),
            top_n: default_top_n(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ClassifyConfig {
    /// Codes that get a bucket of their own.
    #[serde(default = "default_status_codes")]
    pub status_codes: Vec<u16>,

    /// CIDR networks whose clients count as internal.
    #[serde(default = "default_internal_networks")]
    pub internal_networks: Vec<String>,

    /// User agent substrings that mark a request as internal.
    #[serde(default = "default_internal_user_agents")]
    pub internal_user_agents: Vec<String>,

    #[serde(default = "default_static_extensions")]
    pub static_extensions: Vec<String>,
}

impl Default for ClassifyConfig {
    fn default() -> Self {
        Self {
            status_codes: default_status_codes(),
            internal_networks: default_internal_networks(),
            internal_user_agents: default_internal_user_agents(),
            static_extensions: default_static_extensions(),
        }
    }
}

fn default_top_n() -> usize {
    DEFAULT_TOP_N
}

fn default_status_codes() -> Vec<u16> {
    DEFAULT_STATUS_CODES.to_vec()
}

fn default_internal_networks() -> Vec<String> {
    to_strings(DEFAULT_INTERNAL_NETWORKS)
}

fn default_internal_user_agents() -> Vec<String> {
    to_strings(DEFAULT_INTERNAL_USER_AGENTS)
}

fn default_static_extensions() -> Vec<String> {
    to_strings(DEFAULT_STATIC_EXTENSIONS)
}

fn to_strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|s| s.to_string()).collect()
}
