use crate::cli::render::{OutputFormat, open_output, write_report};
use crate::conf::{ConfigError, SummaryConfig, load_optional_config, validate_config};
use crate::error::SummaryError;
use crate::summary::{Classifier, Dialect, LogSource, Report, Reporter, RunOptions, summarize};
use clap::Args;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Args, Debug, Clone)]
pub struct SummarizeArgs {
    /// Access log to summarize, `-` for stdin
    #[arg(default_value = "-")]
    pub source: LogSource,

    /// Path to a logtally.hcl config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Output dialect, overrides the config file
    #[arg(long)]
    pub dialect: Option<Dialect>,

    /// Entries per top-N table, overrides the config file
    #[arg(long)]
    pub top: Option<usize>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,

    /// Write the report here instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Worker threads
    #[arg(short, long, default_value_t = 1)]
    pub jobs: usize,

    /// Fail on the first malformed line instead of skipping it
    #[arg(long)]
    pub strict: bool,
}

impl SummarizeArgs {
    /// Config file contents with command line overrides applied.
    pub fn resolve_config(&self) -> Result<SummaryConfig, ConfigError> {
        let mut cfg = load_optional_config(self.config.as_deref())?;

        if let Some(dialect) = self.dialect {
            cfg.report.dialect = dialect;
        }
        if let Some(top) = self.top {
            cfg.report.top_n = top;
        }

        let errors = validate_config(&cfg);
        if !errors.is_empty() {
            return Err(ConfigError::Validation {
                path: self
                    .config
                    .clone()
                    .unwrap_or_else(|| PathBuf::from("<command line>")),
                errors,
            });
        }

        Ok(cfg)
    }

    pub fn run_options(&self) -> RunOptions {
        RunOptions {
            jobs: self.jobs.max(1),
            strict: self.strict,
        }
    }
}

/// Aggregate the source and build the report, without writing it.
pub fn build_report(args: &SummarizeArgs) -> Result<Report, SummaryError> {
    let cfg = args.resolve_config()?;
    let classifier = Arc::new(Classifier::from_config(&cfg.classify)?);

    let summary = summarize(&args.source, classifier, args.run_options())?;

    let reporter = Reporter::new(cfg.report.dialect, cfg.report.top_n);
    Ok(reporter.report(&summary.buckets))
}

pub fn run_summarize(args: SummarizeArgs) -> anyhow::Result<()> {
    let report = build_report(&args)?;

    let output_error = |source: std::io::Error| SummaryError::Output {
        path: args.output.clone(),
        source,
    };

    let out = open_output(args.output.as_deref()).map_err(output_error)?;
    write_report(&report, args.format, out).map_err(output_error)?;

    Ok(())
}
