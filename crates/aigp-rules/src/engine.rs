//! # Batch Rule Engine
//!
//! Checks one parsed batch against the semantic rules and returns every
//! violation, in check order.
//!
//! ## Per-Question Checks
//!
//! Run for each element of `questions`, in order:
//!
//! 1. `id` is a non-empty string (after trimming) and unseen in this run.
//! 2. `domain`, `difficulty`, `jurisdiction` are members of their sets.
//! 3. `options` is an array of exactly four items. If not, the remaining
//!    option and answer checks are skipped for this question.
//! 4. Option keys, compared as a set, are exactly `{A, B, C, D}`.
//! 5. Every option text is non-empty; if so, texts are pairwise distinct
//!    after trimming and lowercasing.
//! 6. `correct_answer` is a letter A-D and names a key actually present
//!    among this question's options.
//!
//! ## Batch-Level Checks
//!
//! 7. Domain mix of a 20-question batch (opt-in).
//! 8. Provided analytics equal the recomputed analytics (opt-in).
//! 9. Longest same-letter run in the answer key (opt-in).
//!
//! ## Id Registry
//!
//! Every valid id is recorded in the caller's [`IdRegistry`], duplicate or
//! not. Later batches in the same run therefore see every id checked so far.

use std::collections::{BTreeMap, HashSet};

use aigp_core::{
    Difficulty, Domain, Enumerated, IdRegistry, Jurisdiction, OptionKey, Sighting, ValidationIssue,
};
use serde_json::{Map, Value};

use crate::analytics::recompute;
use crate::batch::{questions, render, str_field};
use crate::options::{RuleOptions, DOMAIN_MIX_BATCH_SIZE, EXPECTED_DOMAIN_MIX};
use crate::pattern::longest_run;

/// Validate `batch`, attributing every issue to `file`.
///
/// Never fails: malformed fields are reported as issues. Ids of this batch
/// are recorded in `registry` as a side effect.
pub fn validate_batch(
    batch: &Value,
    file: &str,
    registry: &mut IdRegistry,
    options: &RuleOptions,
) -> Vec<ValidationIssue> {
    let mut checker = BatchChecker {
        file,
        issues: Vec::new(),
        answer_key: Vec::new(),
    };
    let qs = questions(batch);

    for (idx, question) in qs.iter().enumerate() {
        checker.check_question(idx, question, registry);
    }

    if options.expect_twenty_question_domain_mix && qs.len() == DOMAIN_MIX_BATCH_SIZE {
        checker.check_domain_mix(qs);
    }

    if options.strict_analytics {
        checker.check_analytics(batch);
    }

    if options.strict_pattern_check && !checker.answer_key.is_empty() {
        checker.check_answer_pattern(options.max_answer_run);
    }

    tracing::debug!(
        file,
        questions = qs.len(),
        issues = checker.issues.len(),
        "checked batch rules"
    );

    checker.issues
}

// ---------------------------------------------------------------------------
// Checker state
// ---------------------------------------------------------------------------

/// Accumulates issues for one batch, plus the answer key in question order.
struct BatchChecker<'a> {
    file: &'a str,
    issues: Vec<ValidationIssue>,
    answer_key: Vec<OptionKey>,
}

impl BatchChecker<'_> {
    fn report(&mut self, path: String, message: String) {
        self.issues.push(ValidationIssue::new(self.file, message).at(path));
    }

    // -----------------------------------------------------------------------
    // Per-question checks
    // -----------------------------------------------------------------------

    fn check_question(&mut self, idx: usize, question: &Value, registry: &mut IdRegistry) {
        let qpath = format!("/questions/{idx}");

        // 1. Identifier
        match str_field(question, "id") {
            Some(id) if !id.trim().is_empty() => {
                if registry.record(id) == Sighting::Duplicate {
                    self.report(
                        format!("{qpath}/id"),
                        format!("Duplicate question id across files: {id}"),
                    );
                }
            }
            _ => self.report(
                format!("{qpath}/id"),
                "Question id must be a non-empty string".to_string(),
            ),
        }

        // 2. Enumerated fields
        self.check_member::<Domain>(&qpath, question, "domain");
        self.check_member::<Difficulty>(&qpath, question, "difficulty");
        self.check_member::<Jurisdiction>(&qpath, question, "jurisdiction");

        // 3. Options shape; nothing below is meaningful without four options.
        let options = match question.get("options").and_then(Value::as_array) {
            Some(options) if options.len() == 4 => options,
            _ => {
                self.report(
                    format!("{qpath}/options"),
                    "Options must be an array of exactly 4 items".to_string(),
                );
                return;
            }
        };

        // 4. Option keys
        let present_keys = self.check_option_keys(&qpath, options);

        // 5. Option texts
        self.check_option_texts(&qpath, options);

        // 6. Correct answer
        let raw_answer = question.get("correct_answer");
        match raw_answer.and_then(Value::as_str).and_then(OptionKey::parse) {
            None => self.report(
                format!("{qpath}/correct_answer"),
                format!("Invalid correct_answer: {}", render(raw_answer)),
            ),
            Some(answer) if !present_keys.contains(answer.as_str()) => self.report(
                format!("{qpath}/correct_answer"),
                "correct_answer must match one of the option keys".to_string(),
            ),
            Some(answer) => self.answer_key.push(answer),
        }
    }

    fn check_member<E: Enumerated>(&mut self, qpath: &str, question: &Value, field: &str) {
        let raw = question.get(field);
        if raw.and_then(Value::as_str).and_then(E::parse).is_none() {
            self.report(
                format!("{qpath}/{field}"),
                format!("Invalid {field}: {}", render(raw)),
            );
        }
    }

    /// Check the key set and return the string keys actually present.
    ///
    /// Keys are read only from object-shaped options. A missing or
    /// non-string key never matches a letter, so it always fails the check.
    fn check_option_keys<'v>(&mut self, qpath: &str, options: &'v [Value]) -> HashSet<&'v str> {
        let keys: Vec<Option<&Value>> = options
            .iter()
            .filter(|o| o.is_object())
            .map(|o| o.get("key"))
            .collect();
        let present: HashSet<&str> = keys.iter().flatten().filter_map(|k| k.as_str()).collect();

        let all_strings = keys.iter().all(|k| k.is_some_and(Value::is_string));
        let expected: HashSet<&str> = OptionKey::all().iter().map(|k| k.as_str()).collect();
        if !all_strings || present != expected {
            let found: Vec<Value> = keys
                .iter()
                .map(|k| k.cloned().unwrap_or(Value::Null))
                .collect();
            self.report(
                format!("{qpath}/options"),
                format!(
                    "Options must contain exactly one each of A/B/C/D. Found keys: {}",
                    Value::Array(found)
                ),
            );
        }
        present
    }

    fn check_option_texts(&mut self, qpath: &str, options: &[Value]) {
        let texts: Vec<Option<&str>> = options
            .iter()
            .filter(|o| o.is_object())
            .map(|o| str_field(o, "text"))
            .collect();

        let all_filled = texts.len() == 4
            && texts
                .iter()
                .all(|t| t.is_some_and(|t| !t.trim().is_empty()));
        if !all_filled {
            self.report(
                format!("{qpath}/options"),
                "Each option must have non-empty text".to_string(),
            );
            return;
        }

        let normalized: HashSet<String> = texts
            .iter()
            .flatten()
            .map(|t| t.trim().to_lowercase())
            .collect();
        if normalized.len() != 4 {
            self.report(
                format!("{qpath}/options"),
                "Option texts must be unique within a question".to_string(),
            );
        }
    }

    // -----------------------------------------------------------------------
    // Batch-level checks
    // -----------------------------------------------------------------------

    fn check_domain_mix(&mut self, qs: &[Value]) {
        let mut actual: BTreeMap<String, u64> = BTreeMap::new();
        for question in qs {
            *actual.entry(render(question.get("domain"))).or_insert(0) += 1;
        }

        let off = EXPECTED_DOMAIN_MIX
            .iter()
            .any(|(domain, n)| actual.get(domain.as_str()).copied().unwrap_or(0) != *n);
        if off {
            let expected: Map<String, Value> = EXPECTED_DOMAIN_MIX
                .iter()
                .map(|(domain, n)| (domain.as_str().to_string(), Value::from(*n)))
                .collect();
            let actual: Map<String, Value> = actual
                .into_iter()
                .map(|(domain, n)| (domain, Value::from(n)))
                .collect();
            self.report(
                "/questions".to_string(),
                format!(
                    "Unexpected domain mix for 20Q batch. Expected {}, got {}",
                    Value::Object(expected),
                    Value::Object(actual)
                ),
            );
        }
    }

    fn check_analytics(&mut self, batch: &Value) {
        let recomputed = recompute(batch);
        let provided = batch
            .get("analytics")
            .cloned()
            .unwrap_or_else(|| Value::Object(Map::new()));
        if !recomputed.matches(&provided) {
            self.report(
                "/analytics".to_string(),
                format!(
                    "Provided analytics do not match recomputed analytics.\nProvided: {}\nRecomputed: {}",
                    provided,
                    recomputed.to_json()
                ),
            );
        }
    }

    fn check_answer_pattern(&mut self, max_answer_run: usize) {
        let run = longest_run(&self.answer_key);
        if run > max_answer_run {
            self.report(
                "/questions".to_string(),
                format!(
                    "Answer key has a long same-letter run (max_run={run}). Consider rebalancing."
                ),
            );
        }
    }
}
