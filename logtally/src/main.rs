use clap::{Parser, Subcommand};
use logtally_core::cli::{self, ConfigCmd, SummarizeArgs};
use logtally_core::logging::{default_log_format, init_logging};

#[derive(Parser, Debug)]
#[command(
    name = "logtally",
    version,
    about = "logtally: offline nginx access log summaries"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Summarize an access log into one JSON document
    Summarize(SummarizeArgs),

    /// Config file tooling
    Config {
        #[command(subcommand)]
        cmd: ConfigCmd,
    },
}

fn main() {
    let cli = Cli::parse();

    init_logging(default_log_format());

    let result = match cli.command {
        Command::Summarize(args) => cli::run_summarize(args),
        Command::Config { cmd } => cli::conf::run(cmd),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
