//! # Rule Options
//!
//! Switches for the optional batch-level checks. Consulted by plain
//! branches in the engine; there is no rule registry.

use aigp_core::Domain;
use serde::{Deserialize, Serialize};

/// Longest tolerated run of one correct-answer letter before the pattern
/// check reports the batch. A tuning preference, not a content rule.
pub const DEFAULT_MAX_ANSWER_RUN: usize = 4;

/// Batch size the domain-mix expectation applies to.
pub const DOMAIN_MIX_BATCH_SIZE: usize = 20;

/// Per-domain question counts expected in a batch of
/// [`DOMAIN_MIX_BATCH_SIZE`] questions.
pub const EXPECTED_DOMAIN_MIX: [(Domain, u64); 4] = [
    (Domain::I, 4),
    (Domain::II, 6),
    (Domain::III, 6),
    (Domain::IV, 4),
];

/// Which optional checks run, and their thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleOptions {
    /// Require the [`EXPECTED_DOMAIN_MIX`] in batches of exactly
    /// [`DOMAIN_MIX_BATCH_SIZE`] questions.
    pub expect_twenty_question_domain_mix: bool,
    /// Recompute analytics and require an exact match with the batch's own.
    pub strict_analytics: bool,
    /// Report answer keys with a same-letter run longer than `max_answer_run`.
    pub strict_pattern_check: bool,
    /// Threshold for the pattern check.
    pub max_answer_run: usize,
}

impl Default for RuleOptions {
    fn default() -> Self {
        Self {
            expect_twenty_question_domain_mix: false,
            strict_analytics: false,
            strict_pattern_check: false,
            max_answer_run: DEFAULT_MAX_ANSWER_RUN,
        }
    }
}

impl RuleOptions {
    /// Every optional check enabled, default threshold.
    pub fn strict() -> Self {
        Self {
            expect_twenty_question_domain_mix: true,
            strict_analytics: true,
            strict_pattern_check: true,
            ..Self::default()
        }
    }
}
