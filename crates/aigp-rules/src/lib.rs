//! # aigp-rules: Semantic Rule Engine for Exam Batches
//!
//! Checks the business rules a JSON Schema cannot express. Given a parsed
//! batch document, the run's [`aigp_core::IdRegistry`] and a set of
//! [`RuleOptions`], [`validate_batch`] returns every violation it finds.
//! It never stops at the first one.
//!
//! ## Components
//!
//! - [`engine`]: per-question checks (ids, enumerations, option keys,
//!   option texts, correct answer) and batch-level checks (domain mix,
//!   analytics consistency, answer-key pattern).
//! - [`analytics`]: recomputes the derived summary counts of a batch.
//! - [`pattern`]: longest run of equal consecutive answer letters.
//! - [`options`]: the flags and thresholds that switch optional checks on.
//!
//! ## Input Tolerance
//!
//! The engine reads the raw `serde_json::Value`, not a typed model. A field
//! that is missing or has the wrong type is reported as invalid; it never
//! aborts the check. A document that is not an object at all behaves as a
//! batch with no questions.

pub mod analytics;
mod batch;
pub mod engine;
pub mod options;
pub mod pattern;

pub use analytics::{recompute, Analytics};
pub use engine::validate_batch;
pub use options::{RuleOptions, DEFAULT_MAX_ANSWER_RUN, DOMAIN_MIX_BATCH_SIZE, EXPECTED_DOMAIN_MIX};
pub use pattern::longest_run;
