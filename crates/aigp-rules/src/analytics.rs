//! # Analytics Recomputation
//!
//! A batch may carry an `analytics` block summarising its own questions.
//! That block is derived data, so it can be recomputed from the questions
//! and compared.
//!
//! ## Counting Rules
//!
//! - Every member of every enumeration is present in the output, with an
//!   explicit zero when no question matches. Comparison against a provided
//!   block is therefore exact: a provided block that omits a member is a
//!   mismatch even when every member it does list agrees.
//! - A question whose domain, difficulty, jurisdiction or correct answer is
//!   missing or not a known member simply does not count in that dimension.
//!   Reporting it is the per-question checks' job.
//! - A question is a case study only when `is_case_study` is boolean `true`.

use std::collections::BTreeMap;

use aigp_core::{Difficulty, Domain, Enumerated, Jurisdiction, OptionKey};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::batch::{questions, same_json, str_field};

/// Derived summary counts of a batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Analytics {
    /// Questions per domain.
    pub domain_counts: BTreeMap<Domain, u64>,
    /// Questions per difficulty.
    pub difficulty_counts: BTreeMap<Difficulty, u64>,
    /// Questions flagged as case studies.
    pub case_study_count: u64,
    /// Questions per jurisdiction.
    pub jurisdiction_counts: BTreeMap<Jurisdiction, u64>,
    /// Questions per correct-answer letter.
    pub correct_answer_distribution: BTreeMap<OptionKey, u64>,
}

impl Default for Analytics {
    fn default() -> Self {
        Self {
            domain_counts: zero_filled(),
            difficulty_counts: zero_filled(),
            case_study_count: 0,
            jurisdiction_counts: zero_filled(),
            correct_answer_distribution: zero_filled(),
        }
    }
}

impl Analytics {
    /// The JSON form used for comparison and display.
    ///
    /// Built by hand rather than through `serde_json::to_value` so it is
    /// infallible and keys are always the wire spellings.
    pub fn to_json(&self) -> Value {
        let mut out = Map::new();
        out.insert("domain_counts".into(), counts_json(&self.domain_counts));
        out.insert("difficulty_counts".into(), counts_json(&self.difficulty_counts));
        out.insert("case_study_count".into(), Value::from(self.case_study_count));
        out.insert("jurisdiction_counts".into(), counts_json(&self.jurisdiction_counts));
        out.insert(
            "correct_answer_distribution".into(),
            counts_json(&self.correct_answer_distribution),
        );
        Value::Object(out)
    }

    /// Whether `provided` is exactly this summary.
    ///
    /// Missing or extra keys anywhere are a mismatch. Numbers compare by
    /// value, so `4.0` matches `4`.
    pub fn matches(&self, provided: &Value) -> bool {
        same_json(provided, &self.to_json())
    }
}

/// Recompute the analytics of `batch` from its questions.
///
/// Pure and total: any document shape yields a fully populated summary.
pub fn recompute(batch: &Value) -> Analytics {
    let mut analytics = Analytics::default();

    for question in questions(batch) {
        tally(&mut analytics.domain_counts, str_field(question, "domain"));
        tally(&mut analytics.difficulty_counts, str_field(question, "difficulty"));
        tally(&mut analytics.jurisdiction_counts, str_field(question, "jurisdiction"));
        tally(
            &mut analytics.correct_answer_distribution,
            str_field(question, "correct_answer"),
        );
        if question.get("is_case_study") == Some(&Value::Bool(true)) {
            analytics.case_study_count += 1;
        }
    }

    analytics
}

fn zero_filled<E: Enumerated>() -> BTreeMap<E, u64> {
    E::all().iter().map(|member| (*member, 0)).collect()
}

fn tally<E: Enumerated>(counts: &mut BTreeMap<E, u64>, raw: Option<&str>) {
    if let Some(member) = raw.and_then(E::parse) {
        *counts.entry(member).or_insert(0) += 1;
    }
}

fn counts_json<E: Enumerated>(counts: &BTreeMap<E, u64>) -> Value {
    Value::Object(
        counts
            .iter()
            .map(|(member, n)| (member.as_str().to_string(), Value::from(*n)))
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn question(domain: &str, difficulty: &str, jurisdiction: &str, case: bool, answer: &str) -> Value {
        json!({
            "domain": domain,
            "difficulty": difficulty,
            "jurisdiction": jurisdiction,
            "is_case_study": case,
            "correct_answer": answer,
        })
    }

    #[test]
    fn empty_batch_is_all_zeros() {
        let analytics = recompute(&json!({"questions": []}));
        assert_eq!(
            analytics.to_json(),
            json!({
                "domain_counts": {"I": 0, "II": 0, "III": 0, "IV": 0},
                "difficulty_counts": {"easy": 0, "medium": 0, "hard": 0},
                "case_study_count": 0,
                "jurisdiction_counts": {"US": 0, "EU": 0, "Other": 0, "Mixed": 0},
                "correct_answer_distribution": {"A": 0, "B": 0, "C": 0, "D": 0}
            })
        );
        assert_eq!(analytics, Analytics::default());
    }

    #[test]
    fn non_object_document_is_all_zeros() {
        assert_eq!(recompute(&json!([1, 2, 3])), Analytics::default());
        assert_eq!(recompute(&json!(null)), Analytics::default());
    }

    #[test]
    fn counts_each_dimension() {
        let batch = json!({
            "questions": [
                question("I", "easy", "US", true, "A"),
                question("II", "hard", "EU", false, "A"),
                question("II", "hard", "Mixed", true, "D"),
            ]
        });
        let a = recompute(&batch);
        assert_eq!(a.domain_counts[&Domain::I], 1);
        assert_eq!(a.domain_counts[&Domain::II], 2);
        assert_eq!(a.domain_counts[&Domain::IV], 0);
        assert_eq!(a.difficulty_counts[&Difficulty::Hard], 2);
        assert_eq!(a.jurisdiction_counts[&Jurisdiction::Other], 0);
        assert_eq!(a.case_study_count, 2);
        assert_eq!(a.correct_answer_distribution[&OptionKey::A], 2);
        assert_eq!(a.correct_answer_distribution[&OptionKey::D], 1);
    }

    #[test]
    fn invalid_values_are_silently_excluded() {
        let batch = json!({
            "questions": [
                question("V", "trivial", "UK", false, "E"),
                {"is_case_study": "true"},
                42,
            ]
        });
        let a = recompute(&batch);
        assert_eq!(a, Analytics::default());
    }

    #[test]
    fn matches_requires_every_key() {
        let batch = json!({"questions": [question("I", "easy", "US", false, "B")]});
        let a = recompute(&batch);

        let mut provided = a.to_json();
        assert!(a.matches(&provided));

        provided["jurisdiction_counts"]
            .as_object_mut()
            .unwrap()
            .remove("Mixed");
        assert!(!a.matches(&provided));
    }

    #[test]
    fn matches_rejects_extra_fields() {
        let a = Analytics::default();
        let mut provided = a.to_json();
        provided["generated_by"] = json!("tool");
        assert!(!a.matches(&provided));
    }

    #[test]
    fn matches_accepts_float_counts() {
        let a = recompute(&json!({"questions": [question("IV", "medium", "EU", true, "C")]}));
        let mut provided = a.to_json();
        provided["case_study_count"] = json!(1.0);
        assert!(a.matches(&provided));
    }

    #[test]
    fn serde_form_matches_to_json() {
        let a = recompute(&json!({"questions": [question("III", "easy", "Other", false, "D")]}));
        assert_eq!(serde_json::to_value(&a).unwrap(), a.to_json());
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        fn any_question() -> impl Strategy<Value = Value> {
            (
                prop::sample::select(vec!["I", "II", "III", "IV", "V"]),
                prop::sample::select(vec!["easy", "medium", "hard", "Hard"]),
                prop::sample::select(vec!["US", "EU", "Other", "Mixed", "UK"]),
                any::<bool>(),
                prop::sample::select(vec!["A", "B", "C", "D", "E"]),
            )
                .prop_map(|(d, diff, j, case, ans)| question(d, diff, j, case, ans))
        }

        proptest! {
            /// Every dimension always lists every member, and no dimension
            /// counts more questions than the batch holds.
            #[test]
            fn fully_populated_and_bounded(qs in prop::collection::vec(any_question(), 0..30)) {
                let n = qs.len() as u64;
                let a = recompute(&json!({"questions": qs}));
                prop_assert_eq!(a.domain_counts.len(), 4);
                prop_assert_eq!(a.difficulty_counts.len(), 3);
                prop_assert_eq!(a.jurisdiction_counts.len(), 4);
                prop_assert_eq!(a.correct_answer_distribution.len(), 4);
                prop_assert!(a.domain_counts.values().sum::<u64>() <= n);
                prop_assert!(a.correct_answer_distribution.values().sum::<u64>() <= n);
                prop_assert!(a.case_study_count <= n);
                prop_assert!(a.matches(&a.to_json()));
            }
        }
    }
}
