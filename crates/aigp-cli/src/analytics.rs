//! # Analytics Subcommand
//!
//! Prints the analytics block recomputed from a batch's questions, ready to
//! paste into the batch. Read-only: the file is never modified.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use aigp_rules::recompute;
use aigp_schema::load_document;

use crate::EXIT_OK;

/// Arguments for the `aigp analytics` subcommand.
#[derive(Args, Debug)]
pub struct AnalyticsArgs {
    /// Batch file (JSON, or YAML by extension).
    #[arg(value_name = "FILE")]
    pub file: PathBuf,
}

/// Execute the analytics subcommand.
pub fn run_analytics(args: &AnalyticsArgs) -> Result<u8> {
    println!("{}", analytics_json(args)?);
    Ok(EXIT_OK)
}

/// The recomputed analytics of `args.file` as pretty JSON.
fn analytics_json(args: &AnalyticsArgs) -> Result<String> {
    let document = load_document(&args.file)
        .with_context(|| format!("failed to load {}", args.file.display()))?;
    let analytics = recompute(&document);
    tracing::debug!(file = %args.file.display(), "recomputed analytics");
    serde_json::to_string_pretty(&analytics.to_json()).context("failed to render analytics")
}
