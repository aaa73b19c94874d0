//! # Run Report
//!
//! The outcome of one validation run and its two renderings: the
//! human-readable text CI logs show, and a JSON document for tooling.

use aigp_core::ValidationIssue;
use clap::ValueEnum;
use serde::Serialize;
use serde_json::{json, Value};

use crate::{EXIT_ISSUES, EXIT_OK};

/// Output format for `aigp validate`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// `VALIDATION OK` / `VALIDATION FAILED` with one line per issue.
    #[default]
    Text,
    /// A single JSON object on stdout.
    Json,
}

/// Every issue found in a run, in discovery order.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Report {
    /// Files that were attempted, including ones that failed to parse.
    pub files_checked: usize,
    /// Issues in file order; within a file, schema issues before rule issues.
    pub issues: Vec<ValidationIssue>,
}

impl Report {
    /// True when no issue was found.
    pub fn is_ok(&self) -> bool {
        self.issues.is_empty()
    }

    /// Process exit code for this outcome.
    pub fn exit_code(&self) -> u8 {
        if self.is_ok() {
            EXIT_OK
        } else {
            EXIT_ISSUES
        }
    }

    /// Render in `format`.
    pub fn render(&self, format: OutputFormat) -> String {
        match format {
            OutputFormat::Text => self.render_text(),
            OutputFormat::Json => {
                // A `Value` built from strings and integers always serializes.
                serde_json::to_string_pretty(&self.to_json()).unwrap_or_default() + "\n"
            }
        }
    }

    /// The text report.
    pub fn render_text(&self) -> String {
        if self.is_ok() {
            return format!("VALIDATION OK — {} file(s) checked.\n", self.files_checked);
        }

        let mut out = String::from("\nVALIDATION FAILED\n\n");
        for issue in &self.issues {
            out.push_str(&issue.to_string());
            out.push('\n');
        }
        out.push_str(&format!("\nTotal issues: {}\n", self.issues.len()));
        out
    }

    /// The JSON report: `{ "ok", "files_checked", "issues" }`.
    pub fn to_json(&self) -> Value {
        json!({
            "ok": self.is_ok(),
            "files_checked": self.files_checked,
            "issues": self.issues,
        })
    }
}
