//! # aigp CLI entry point
//!
//! Parses command-line arguments and dispatches to subcommand handlers.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use aigp_cli::analytics::{run_analytics, AnalyticsArgs};
use aigp_cli::config::ValidatorConfig;
use aigp_cli::validate::{run_validate, ValidateArgs};
use aigp_cli::EXIT_USAGE;

/// AIGP exam batch validator.
///
/// Checks batches of multiple-choice questions against the batch JSON
/// Schema and against semantic rules the schema cannot express: unique ids
/// across files, a clean A/B/C/D option set, a correct answer that exists,
/// and (optionally) domain mix, analytics consistency and answer-key runs.
#[derive(Parser, Debug)]
#[command(name = "aigp", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to a YAML configuration file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Validate batch files against the schema and the semantic rules.
    Validate(ValidateArgs),

    /// Print the analytics block recomputed from a batch's questions.
    Analytics(AnalyticsArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!(version = env!("CARGO_PKG_VERSION"), "aigp starting");

    let config = match cli.config.as_deref().map(ValidatorConfig::load).transpose() {
        Ok(config) => config.unwrap_or_default(),
        Err(e) => {
            tracing::error!("{e}");
            return ExitCode::from(EXIT_USAGE);
        }
    };

    let result = match cli.command {
        Commands::Validate(args) => run_validate(&args, &config),
        Commands::Analytics(args) => run_analytics(&args),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(EXIT_USAGE)
        }
    }
}
