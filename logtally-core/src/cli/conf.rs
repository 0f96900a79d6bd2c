use crate::conf::{ConfigError, load_config, write_default_config};
use anyhow::Result;
use clap::Subcommand;
use std::path::{Path, PathBuf};

#[derive(Subcommand, Debug)]
pub enum ConfigCmd {
    /// Validate a config file and exit
    Check {
        #[arg(default_value = "logtally.hcl")]
        path: PathBuf,
    },

    /// Print the resolved configuration as JSON
    Dump {
        #[arg(default_value = "logtally.hcl")]
        path: PathBuf,
    },

    /// Write a config file with every default spelled out
    Init {
        #[arg(default_value = "logtally.hcl")]
        path: PathBuf,
    },
}

pub fn run(cmd: ConfigCmd) -> Result<()> {
    match cmd {
        ConfigCmd::Check { path } => check(&path),
        ConfigCmd::Dump { path } => dump(&path),
        ConfigCmd::Init { path } => init(&path),
    }
}

pub fn check(path: &Path) -> Result<()> {
    match load_config(path) {
        Ok(cfg) => {
            println!("✔ Config loaded successfully");
            println!("✔ dialect: {}", cfg.report.dialect);
            println!("✔ top_n: {}", cfg.report.top_n);
            println!("✔ {} tracked status codes", cfg.classify.status_codes.len());
            println!(
                "✔ {} internal networks",
                cfg.classify.internal_networks.len()
            );
            println!(
                "✔ {} internal user agent markers",
                cfg.classify.internal_user_agents.len()
            );
            println!(
                "✔ {} static extensions",
                cfg.classify.static_extensions.len()
            );
            Ok(())
        }
        Err(err) => {
            if let Some(hint) = config_error_hint(&err) {
                eprintln!("{hint}");
                eprintln!();
            }
            Err(err.into())
        }
    }
}

pub fn dump(path: &Path) -> Result<()> {
    let cfg = load_config(path)?;
    println!("{}", serde_json::to_string_pretty(&cfg)?);
    Ok(())
}

pub fn init(path: &Path) -> Result<()> {
    write_default_config(path)?;

    println!("✔ Wrote default config to {}", path.display());
    println!();
    println!("Next steps:");
    println!("  logtally config check {}", path.display());
    println!(
        "  logtally summarize --config {} access.log",
        path.display()
    );

    Ok(())
}

pub fn config_error_hint(err: &ConfigError) -> Option<&'static str> {
    match err {
        ConfigError::Parse { .. } => Some(
            "Config files are HCL with two optional blocks.\n\
             \n\
             Example:\n\
             \n\
             report {\n\
               dialect = \"legacy\"\n\
             }\n\
             classify {\n\
               status_codes = [502, 503]\n\
             }",
        ),

        ConfigError::Validation { errors, .. }
            if errors
                .iter()
                .any(|e| matches!(e, ConfigError::InvalidNetwork { .. })) =>
        {
            Some(
                "Internal networks are CIDR blocks such as \"10.0.0.0/8\" or \"fc00::/7\".\n\
                 A single address needs a full-length prefix, e.g. \"192.0.2.1/32\".",
            )
        }

        _ => None,
    }
}
