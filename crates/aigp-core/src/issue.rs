//! # Validation Issues
//!
//! A [`ValidationIssue`] is one reported violation: which file, where in
//! the document (a JSON Pointer such as `/questions/3/options`), and what
//! went wrong. Issues are appended in the order checks run and are never
//! mutated afterwards.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One structural or semantic rule violation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationIssue {
    /// Identifier of the file the issue was found in (usually its path).
    pub file: String,
    /// JSON Pointer into the document, absent for file-level issues.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    /// Human-readable description of the violation.
    pub message: String,
}

impl ValidationIssue {
    /// A file-level issue with no document path.
    pub fn new(file: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            path: None,
            message: message.into(),
        }
    }

    /// Attach a document path. An empty path is treated as no path.
    pub fn at(mut self, path: impl Into<String>) -> Self {
        let path = path.into();
        self.path = if path.is_empty() { None } else { Some(path) };
        self
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.path {
            Some(path) => write!(f, "[{}] @ {} {}", self.file, path, self.message),
            None => write!(f, "[{}] {}", self.file, self.message),
        }
    }
}
