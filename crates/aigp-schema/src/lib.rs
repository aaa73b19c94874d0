//! # aigp-schema: Schema Validation for Exam Batches
//!
//! The declarative half of batch validation. The semantic half (unique
//! ids, option key sets, analytics consistency) lives in `aigp-rules`.
//!
//! ## Runtime Validation (`validate`)
//!
//! [`SchemaValidator::from_file`] loads the batch schema, registers every
//! sibling `*.json` file for `$ref` resolution, and compiles a Draft 2020-12
//! validator once per run. [`SchemaValidator::validate`] turns each schema
//! error into a [`aigp_core::ValidationIssue`].
//!
//! ## Document Loading (`document`)
//!
//! [`load_document`] reads one batch file into a `serde_json::Value`,
//! accepting YAML for `.yaml`/`.yml` files and JSON otherwise.
//!
//! ## Crate Policy
//!
//! - Depends only on `aigp-core` internally.
//! - Never reaches the network: unresolved `$ref` URIs resolve to `{}`.

pub mod document;
pub mod validate;

pub use document::load_document;
pub use validate::{SchemaError, SchemaValidator};
