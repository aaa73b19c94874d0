//! # Validator Configuration
//!
//! Optional YAML file (`--config`) holding defaults for `aigp validate`, so
//! a CI job can pin its schema and strictness in the repository:
//!
//! ```yaml
//! schema: schemas/aigp-exam-batch.schema.json
//! expect_20q_domain_mix: true
//! strict_analytics: true
//! strict_pattern: false
//! max_answer_run: 4
//! ```
//!
//! ## Merge Rules
//!
//! - Boolean switches are OR'ed: a check runs if either the config or the
//!   command line enables it.
//! - Values given on the command line (`--schema`, `--max-answer-run`)
//!   override the config.
//! - A relative `schema` path in the file is relative to the file itself.

use std::path::{Path, PathBuf};

use aigp_core::AigpError;
use aigp_rules::{RuleOptions, DEFAULT_MAX_ANSWER_RUN};
use serde::Deserialize;

use crate::validate::ValidateArgs;

/// Contents of a `--config` file. Every key is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ValidatorConfig {
    /// Batch schema to validate against.
    pub schema: Option<PathBuf>,
    /// Enable the 20-question domain-mix check.
    pub expect_20q_domain_mix: bool,
    /// Enable the analytics consistency check.
    pub strict_analytics: bool,
    /// Enable the answer-key pattern check.
    pub strict_pattern: bool,
    /// Pattern-check threshold.
    pub max_answer_run: Option<usize>,
}

impl ValidatorConfig {
    /// Load and parse a config file.
    pub fn load(path: &Path) -> Result<Self, AigpError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            AigpError::Config(format!("cannot read {}: {e}", path.display()))
        })?;
        let mut config = Self::from_yaml(&content)?;

        if let Some(schema) = config.schema.take() {
            let base = path.parent().unwrap_or_else(|| Path::new(""));
            config.schema = Some(if schema.is_absolute() {
                schema
            } else {
                base.join(schema)
            });
        }

        tracing::info!(path = %path.display(), "loaded validator config");
        Ok(config)
    }

    /// Parse config from YAML text. Relative paths are left as written.
    ///
    /// An empty document is the default config.
    pub fn from_yaml(content: &str) -> Result<Self, AigpError> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(content)?)
    }

    /// The schema to use: `--schema` if given, else the config's.
    pub fn schema_for(&self, args: &ValidateArgs) -> Option<PathBuf> {
        args.schema.clone().or_else(|| self.schema.clone())
    }

    /// Rule options for a run, merging the command line over this config.
    ///
    /// # Errors
    ///
    /// Returns [`AigpError::Config`] for a zero threshold: every non-empty
    /// answer key has a run of at least one, so it would fail every batch.
    pub fn rule_options(&self, args: &ValidateArgs) -> Result<RuleOptions, AigpError> {
        let max_answer_run = args
            .max_answer_run
            .or(self.max_answer_run)
            .unwrap_or(DEFAULT_MAX_ANSWER_RUN);
        if max_answer_run == 0 {
            return Err(AigpError::Config(
                "max_answer_run must be at least 1".to_string(),
            ));
        }

        Ok(RuleOptions {
            expect_twenty_question_domain_mix: args.expect_20q_domain_mix
                || self.expect_20q_domain_mix,
            strict_analytics: args.strict_analytics || self.strict_analytics,
            strict_pattern_check: args.strict_pattern || self.strict_pattern,
            max_answer_run,
        })
    }
}
