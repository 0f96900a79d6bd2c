use crate::conf::error::ConfigError;
use crate::conf::types::SummaryConfig;
use ipnet::IpNet;

/// Check every semantic rule and collect all violations, not just the first.
pub fn validate_config(cfg: &SummaryConfig) -> Vec<ConfigError> {
    let mut errors = Vec::new();

    if cfg.report.top_n == 0 {
        errors.push(ConfigError::InvalidTopN);
    }

    let mut seen = Vec::with_capacity(cfg.classify.status_codes.len());
    for &code in &cfg.classify.status_codes {
        if !(100..=599).contains(&code) {
            errors.push(ConfigError::InvalidStatusCode { code });
        } else if seen.contains(&code) {
            errors.push(ConfigError::DuplicateStatusCode { code });
        }
        seen.push(code);
    }

    for network in &cfg.classify.internal_networks {
        if let Err(source) = network.parse::<IpNet>() {
            errors.push(ConfigError::InvalidNetwork {
                network: network.clone(),
                source,
            });
        }
    }

    let lists = [
        ("internal_user_agents", &cfg.classify.internal_user_agents),
        ("static_extensions", &cfg.classify.static_extensions),
    ];
    for (field, values) in lists {
        if values.iter().any(|v| v.trim().is_empty()) {
            errors.push(ConfigError::EmptyEntry { field });
        }
    }

    errors
}
