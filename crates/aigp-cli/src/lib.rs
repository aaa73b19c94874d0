//! # aigp-cli: Command-Line Interface for Exam Batch Validation
//!
//! Provides the `aigp` binary. Argument parsing lives here; the checks
//! themselves live in `aigp-schema` and `aigp-rules`.
//!
//! ## Subcommands
//!
//! - `aigp validate`: schema + rule validation of one or more batches.
//! - `aigp analytics`: print the recomputed analytics block of a batch.
//!
//! ## Exit Codes
//!
//! | Code | Meaning |
//! |------|---------|
//! | 0 | every file checked, no issues |
//! | 1 | at least one issue |
//! | 2 | no input files matched, or an operational error (bad schema, bad config) |
//!
//! ```bash
//! aigp validate --schema schemas/aigp-exam-batch.schema.json 'data/**/*.json'
//! aigp validate --schema schemas/aigp-exam-batch.schema.json --strict-analytics exam3.1.json exam3.2.json
//! ```

pub mod analytics;
pub mod config;
pub mod discover;
pub mod report;
pub mod run;
pub mod validate;

/// Exit code for a clean run.
pub const EXIT_OK: u8 = 0;
/// Exit code when any issue was reported.
pub const EXIT_ISSUES: u8 = 1;
/// Exit code when no input matched or the run could not start.
pub const EXIT_USAGE: u8 = 2;
