//! # Error Hierarchy
//!
//! Structured error types for the validator, built with `thiserror`.
//! No `Box<dyn Error>`, no `.unwrap()` outside tests.
//!
//! These are operational errors only: a missing file, an unreadable
//! config, a value that cannot be parsed into a typed enumeration. Rule
//! violations found inside a batch are never errors; they are reported as
//! [`crate::ValidationIssue`]s and the check keeps going.

use thiserror::Error;

/// Top-level error type for the validator.
#[derive(Error, Debug)]
pub enum AigpError {
    /// Typed value construction failed.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Configuration could not be loaded or is inconsistent.
    #[error("configuration error: {0}")]
    Config(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML serialization/deserialization error.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Errors constructing typed values from their wire spelling.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The string is not a member of the named value set.
    #[error("unknown {kind}: {value:?}")]
    UnknownValue {
        /// Name of the value set (e.g. "domain").
        kind: &'static str,
        /// The rejected input.
        value: String,
    },
}
