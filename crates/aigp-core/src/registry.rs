//! # Question Id Registry
//!
//! Question ids must be unique across every batch checked in one run, not
//! just within a file. The [`IdRegistry`] carries that cross-file state.
//!
//! ## Lifecycle
//!
//! Created empty when a run starts, passed by `&mut` into each batch check
//! in file order, dropped when the run ends. It only grows: a duplicate id
//! is reported and stays recorded, so every later repeat of the same value
//! is reported too.
//!
//! ## Concurrency
//!
//! The registry has a single writer. A caller that validates batches in
//! parallel must guard it with one lock around [`IdRegistry::record`] so
//! check-and-insert stays atomic and the first occurrence in file order is
//! the one that wins.

use std::collections::HashSet;

/// Outcome of recording an id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sighting {
    /// The id had not been seen earlier in this run.
    First,
    /// The id was already recorded by an earlier question.
    Duplicate,
}

/// Run-scoped set of question ids already seen.
#[derive(Debug, Clone, Default)]
pub struct IdRegistry {
    seen: HashSet<String>,
}

impl IdRegistry {
    /// An empty registry for a new run.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `id` and report whether it had been seen before.
    ///
    /// The id is stored in both cases; afterwards it is present exactly once.
    pub fn record(&mut self, id: &str) -> Sighting {
        if self.seen.insert(id.to_string()) {
            Sighting::First
        } else {
            Sighting::Duplicate
        }
    }

    /// Whether `id` has been recorded in this run.
    pub fn contains(&self, id: &str) -> bool {
        self.seen.contains(id)
    }

    /// Number of distinct ids recorded.
    pub fn len(&self) -> usize {
        self.seen.len()
    }

    /// Returns true if no id has been recorded yet.
    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
}
