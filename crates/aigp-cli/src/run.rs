//! # Validation Run
//!
//! Coordinates one invocation of `aigp validate` over an ordered list of
//! files. A [`ValidationRun`] owns the state shared across files: the
//! compiled schema, the rule options and the question id registry.
//!
//! ## Per-File Pipeline
//!
//! 1. Load the document (JSON, or YAML by extension).
//! 2. If it does not parse: one file-level issue, nothing else. The id
//!    registry is not touched.
//! 3. Schema issues, sorted.
//! 4. Rule issues, in question order then batch order.
//!
//! Files are processed strictly in the order given, so the first file to
//! use a question id owns it and later files are the ones reported.

use std::path::Path;

use aigp_core::{IdRegistry, ValidationIssue};
use aigp_rules::{validate_batch, RuleOptions};
use aigp_schema::{load_document, SchemaError, SchemaValidator};

use crate::report::Report;

/// State of one validation run.
#[derive(Debug)]
pub struct ValidationRun<'s> {
    schema: &'s SchemaValidator,
    options: RuleOptions,
    registry: IdRegistry,
    report: Report,
}

impl<'s> ValidationRun<'s> {
    /// Start a run with an empty id registry.
    pub fn new(schema: &'s SchemaValidator, options: RuleOptions) -> Self {
        Self {
            schema,
            options,
            registry: IdRegistry::new(),
            report: Report::default(),
        }
    }

    /// Check one file and append its issues. Returns how many were added.
    pub fn check_file(&mut self, path: &Path) -> usize {
        let file = path.display().to_string();
        let before = self.report.issues.len();

        match load_document(path) {
            Err(e) => {
                let reason = match e {
                    SchemaError::DocumentLoad { reason, .. } => reason,
                    other => other.to_string(),
                };
                tracing::warn!(file = %file, %reason, "document did not parse");
                self.report.issues.push(ValidationIssue::new(
                    file,
                    format!("Failed to parse document: {reason}"),
                ));
            }
            Ok(document) => {
                let schema_issues = self.schema.validate(&document, &file);
                let rule_issues =
                    validate_batch(&document, &file, &mut self.registry, &self.options);
                tracing::debug!(
                    file = %file,
                    schema_issues = schema_issues.len(),
                    rule_issues = rule_issues.len(),
                    "checked file"
                );
                self.report.issues.extend(schema_issues);
                self.report.issues.extend(rule_issues);
            }
        }

        self.report.files_checked += 1;
        self.report.issues.len() - before
    }

    /// Check every file in order.
    pub fn check_all<P: AsRef<Path>>(&mut self, paths: &[P]) {
        for path in paths {
            self.check_file(path.as_ref());
        }
    }

    /// Question ids recorded so far.
    pub fn registry(&self) -> &IdRegistry {
        &self.registry
    }

    /// End the run and hand over its report.
    pub fn finish(self) -> Report {
        tracing::info!(
            files = self.report.files_checked,
            issues = self.report.issues.len(),
            ids = self.registry.len(),
            "validation run finished"
        );
        self.report
    }
}
