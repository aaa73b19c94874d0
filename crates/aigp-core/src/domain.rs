//! # Question Enumerations: Single Source of Truth
//!
//! Defines the four closed value sets a question is checked against:
//! [`Domain`], [`Difficulty`], [`Jurisdiction`] and [`OptionKey`]. These
//! are the ONE definitions used by the rule engine, the analytics
//! recomputer and the CLI. Every `match` on them is exhaustive, so adding a
//! member forces every consumer to handle it at compile time.
//!
//! Parsing is exact: case-sensitive, no trimming. `"ii"` is not a domain
//! and `" A"` is not an option key.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::ValidationError;

/// A closed, ordered value set with a fixed wire spelling per member.
///
/// Implemented by every enumeration in this module so analytics can
/// zero-fill a count table for any of them without knowing which one.
pub trait Enumerated: Copy + Ord + Sized + 'static {
    /// Human-readable name of the value set, used in error messages.
    const KIND: &'static str;

    /// All members in canonical order.
    fn all() -> &'static [Self];

    /// The wire spelling of this member.
    fn as_str(&self) -> &'static str;

    /// Exact parse from the wire spelling.
    fn parse(s: &str) -> Option<Self> {
        Self::all().iter().copied().find(|m| m.as_str() == s)
    }
}

/// Wires `Display` and `FromStr` through the [`Enumerated`] impl so the
/// wire spelling is written down exactly once per member.
macro_rules! impl_enumerated_text {
    ($ty:ident) => {
        impl std::fmt::Display for $ty {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $ty {
            type Err = ValidationError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                <$ty as Enumerated>::parse(s).ok_or_else(|| ValidationError::UnknownValue {
                    kind: <$ty as Enumerated>::KIND,
                    value: s.to_string(),
                })
            }
        }
    };
}

/// Top-level subject area of the exam body of knowledge.
///
/// | Domain | Expected share of a 20-question batch |
/// |--------|------|
/// | I      | 4    |
/// | II     | 6    |
/// | III    | 6    |
/// | IV     | 4    |
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Domain {
    #[serde(rename = "I")]
    I,
    #[serde(rename = "II")]
    II,
    #[serde(rename = "III")]
    III,
    #[serde(rename = "IV")]
    IV,
}

impl Enumerated for Domain {
    const KIND: &'static str = "domain";

    fn all() -> &'static [Self] {
        &[Self::I, Self::II, Self::III, Self::IV]
    }

    fn as_str(&self) -> &'static str {
        match self {
            Self::I => "I",
            Self::II => "II",
            Self::III => "III",
            Self::IV => "IV",
        }
    }
}

impl_enumerated_text!(Domain);

/// Author-assigned difficulty of a question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Enumerated for Difficulty {
    const KIND: &'static str = "difficulty";

    fn all() -> &'static [Self] {
        &[Self::Easy, Self::Medium, Self::Hard]
    }

    fn as_str(&self) -> &'static str {
        match self {
            Self::Easy => "easy",
            Self::Medium => "medium",
            Self::Hard => "hard",
        }
    }
}

impl_enumerated_text!(Difficulty);

/// Regulatory jurisdiction a question is framed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Jurisdiction {
    #[serde(rename = "US")]
    Us,
    #[serde(rename = "EU")]
    Eu,
    Other,
    Mixed,
}

impl Enumerated for Jurisdiction {
    const KIND: &'static str = "jurisdiction";

    fn all() -> &'static [Self] {
        &[Self::Us, Self::Eu, Self::Other, Self::Mixed]
    }

    fn as_str(&self) -> &'static str {
        match self {
            Self::Us => "US",
            Self::Eu => "EU",
            Self::Other => "Other",
            Self::Mixed => "Mixed",
        }
    }
}

impl_enumerated_text!(Jurisdiction);

/// Letter of one of the four answer options. Also the type of a
/// question's `correct_answer`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum OptionKey {
    A,
    B,
    C,
    D,
}

impl Enumerated for OptionKey {
    const KIND: &'static str = "option key";

    fn all() -> &'static [Self] {
        &[Self::A, Self::B, Self::C, Self::D]
    }

    fn as_str(&self) -> &'static str {
        match self {
            Self::A => "A",
            Self::B => "B",
            Self::C => "C",
            Self::D => "D",
        }
    }
}

impl_enumerated_text!(OptionKey);

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_wire_spelling<E>()
    where
        E: Enumerated + Serialize + for<'de> Deserialize<'de> + std::fmt::Debug + std::fmt::Display,
    {
        for member in E::all() {
            let json = serde_json::to_string(member).unwrap();
            assert_eq!(json, format!("\"{}\"", member.as_str()));
            let back: E = serde_json::from_str(&json).unwrap();
            assert_eq!(*member, back);
            assert_eq!(member.to_string(), member.as_str());
            assert_eq!(E::parse(member.as_str()), Some(*member));
        }
    }

    #[test]
    fn serde_display_and_parse_agree_on_wire_spelling() {
        assert_wire_spelling::<Domain>();
        assert_wire_spelling::<Difficulty>();
        assert_wire_spelling::<Jurisdiction>();
        assert_wire_spelling::<OptionKey>();
    }

    #[test]
    fn canonical_order() {
        let domains: Vec<&str> = Domain::all().iter().map(|d| d.as_str()).collect();
        assert_eq!(domains, ["I", "II", "III", "IV"]);
        let jurisdictions: Vec<&str> = Jurisdiction::all().iter().map(|j| j.as_str()).collect();
        assert_eq!(jurisdictions, ["US", "EU", "Other", "Mixed"]);
        assert!(Difficulty::Easy < Difficulty::Hard);
    }

    #[test]
    fn parse_is_exact() {
        assert_eq!(Domain::parse("ii"), None);
        assert_eq!(Difficulty::parse("Easy"), None);
        assert_eq!(Jurisdiction::parse("us"), None);
        assert_eq!(OptionKey::parse(" A"), None);
        assert_eq!(OptionKey::parse("E"), None);
        assert_eq!(OptionKey::parse(""), None);
    }

    #[test]
    fn from_str_reports_kind_and_value() {
        let err = "E".parse::<OptionKey>().unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("option key"));
        assert!(msg.contains("\"E\""));

        assert_eq!("III".parse::<Domain>().unwrap(), Domain::III);
        assert!("V".parse::<Domain>().is_err());
    }

    #[test]
    fn exhaustive_match_compiles() {
        fn expected_share(d: Domain) -> u32 {
            match d {
                Domain::I => 4,
                Domain::II => 6,
                Domain::III => 6,
                Domain::IV => 4,
            }
        }
        let total: u32 = Domain::all().iter().map(|d| expected_share(*d)).sum();
        assert_eq!(total, 20);
    }
}
