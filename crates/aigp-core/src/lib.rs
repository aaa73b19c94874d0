//! # aigp-core: Foundational Types for Exam Batch Validation
//!
//! Leaf crate of the workspace. Defines the vocabulary every other crate
//! speaks when it checks a batch of multiple-choice exam questions.
//!
//! ## Key Types
//!
//! 1. **Closed enumerations.** [`Domain`], [`Difficulty`], [`Jurisdiction`]
//!    and [`OptionKey`] each carry their wire spelling, canonical order and
//!    an exact parser. The [`Enumerated`] trait lets analytics code zero-fill
//!    any of them generically.
//!
//! 2. **[`ValidationIssue`].** One reported violation, attributed to a file
//!    and optionally a JSON Pointer path inside it. Immutable once built.
//!
//! 3. **[`IdRegistry`].** The run-scoped set of question ids already seen.
//!    Owned by whoever drives the run and passed by `&mut` into every batch
//!    check. There is no process-wide registry.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `aigp-*` crates.
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod domain;
pub mod error;
pub mod issue;
pub mod registry;

pub use domain::{Difficulty, Domain, Enumerated, Jurisdiction, OptionKey};
pub use error::{AigpError, ValidationError};
pub use issue::ValidationIssue;
pub use registry::{IdRegistry, Sighting};
