//! # Schema Validation
//!
//! Runtime validation of exam batch documents against a JSON Schema
//! (Draft 2020-12).
//!
//! ## Schema Resolution
//!
//! The batch schema is a single file, but it may `$ref` shared definitions
//! kept next to it. Every `*.json` file in the schema's directory is loaded
//! and registered under its own `$id` and under its bare filename, so both
//! `"$ref": "option.schema.json"` and absolute `$id` references resolve
//! locally. Internal `#/$defs/<name>` references are resolved by the
//! jsonschema crate natively.
//!
//! ## Issue Shape
//!
//! Each schema error becomes one [`ValidationIssue`] whose path is the JSON
//! Pointer of the offending instance location (no path for the document
//! root). Issues are sorted by message then path so output is stable
//! across runs.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use aigp_core::ValidationIssue;
use jsonschema::{Retrieve, Uri, Validator};
use serde_json::Value;
use thiserror::Error;

/// Local retriever that resolves `$ref` URIs to schemas loaded in memory.
///
/// Keeps the jsonschema crate from making network requests. URIs that
/// match nothing loaded resolve to the permissive schema `{}`.
struct LocalSchemaRetriever {
    /// Map from URI string (or bare filename) to schema value.
    schemas_by_uri: HashMap<String, Value>,
}

impl Retrieve for LocalSchemaRetriever {
    fn retrieve(
        &self,
        uri: &Uri<&str>,
    ) -> Result<Value, Box<dyn std::error::Error + Send + Sync>> {
        let uri_str = uri.as_str();

        if let Some(value) = self.schemas_by_uri.get(uri_str) {
            return Ok(value.clone());
        }

        let filename = uri_str.rsplit('/').next().unwrap_or(uri_str);
        if let Some(value) = self.schemas_by_uri.get(filename) {
            return Ok(value.clone());
        }

        tracing::debug!(uri = uri_str, "unresolved $ref, using permissive schema");
        Ok(serde_json::json!({}))
    }
}

/// Error loading or compiling a schema, or loading a document.
#[derive(Error, Debug)]
pub enum SchemaError {
    /// The schema file could not be read or is not valid JSON.
    #[error("schema load error for '{path}': {reason}")]
    SchemaLoad {
        /// Path of the schema file.
        path: String,
        /// Reason the schema could not be loaded.
        reason: String,
    },

    /// The schema parsed but could not be compiled into a validator.
    #[error("validator build error for schema '{path}': {reason}")]
    ValidatorBuild {
        /// Path of the schema file.
        path: String,
        /// Reason the validator could not be built.
        reason: String,
    },

    /// A batch document could not be read or parsed.
    #[error("document load error for '{path}': {reason}")]
    DocumentLoad {
        /// Path to the document that failed to load.
        path: String,
        /// Reason the document could not be loaded.
        reason: String,
    },

    /// IO error reading a sibling schema.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// A compiled batch schema, backed by the `jsonschema` crate.
///
/// Built once per run and reused for every document. `Validator` is
/// `Send + Sync`, so a `SchemaValidator` can be shared across threads.
pub struct SchemaValidator {
    /// Path of the root schema file.
    schema_path: PathBuf,
    /// Number of sibling schemas registered for `$ref` resolution.
    sibling_count: usize,
    validator: Validator,
}

impl SchemaValidator {
    /// Load and compile the schema at `schema_path`.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::SchemaLoad`] if the schema (or a sibling
    /// `*.json` file) cannot be read or parsed, and
    /// [`SchemaError::ValidatorBuild`] if the schema is not a valid
    /// Draft 2020-12 schema.
    pub fn from_file(schema_path: impl AsRef<Path>) -> Result<Self, SchemaError> {
        let schema_path = schema_path.as_ref().to_path_buf();
        let schema = read_schema(&schema_path)?;
        let siblings = load_siblings(&schema_path)?;
        let sibling_count = siblings.len();

        let mut opts = jsonschema::options();
        opts.with_draft(jsonschema::Draft::Draft202012);
        opts.with_retriever(LocalSchemaRetriever {
            schemas_by_uri: index_by_uri(siblings),
        });

        let validator = opts.build(&schema).map_err(|e| SchemaError::ValidatorBuild {
            path: schema_path.display().to_string(),
            reason: e.to_string(),
        })?;

        tracing::info!(
            schema = %schema_path.display(),
            siblings = sibling_count,
            "compiled batch schema"
        );

        Ok(Self {
            schema_path,
            sibling_count,
            validator,
        })
    }

    /// Returns the root schema path.
    pub fn schema_path(&self) -> &Path {
        &self.schema_path
    }

    /// Returns the number of sibling schemas available to `$ref`.
    pub fn sibling_count(&self) -> usize {
        self.sibling_count
    }

    /// Validate `instance`, attributing every schema error to `file`.
    ///
    /// Returns an empty list when the document conforms.
    pub fn validate(&self, instance: &Value, file: &str) -> Vec<ValidationIssue> {
        let mut errors: Vec<(String, String)> = self
            .validator
            .iter_errors(instance)
            .map(|e| (e.to_string(), e.instance_path.to_string()))
            .collect();
        errors.sort();

        errors
            .into_iter()
            .map(|(message, path)| ValidationIssue::new(file, message).at(path))
            .collect()
    }

    /// Whether `instance` conforms to the schema.
    pub fn is_valid(&self, instance: &Value) -> bool {
        self.validator.is_valid(instance)
    }
}

impl std::fmt::Debug for SchemaValidator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SchemaValidator")
            .field("schema_path", &self.schema_path)
            .field("sibling_count", &self.sibling_count)
            .finish_non_exhaustive()
    }
}

fn read_schema(path: &Path) -> Result<Value, SchemaError> {
    let content = std::fs::read_to_string(path).map_err(|e| SchemaError::SchemaLoad {
        path: path.display().to_string(),
        reason: format!("cannot read file: {e}"),
    })?;
    serde_json::from_str(&content).map_err(|e| SchemaError::SchemaLoad {
        path: path.display().to_string(),
        reason: format!("invalid JSON: {e}"),
    })
}

/// Load every `*.json` file next to `schema_path`, keyed by filename.
fn load_siblings(schema_path: &Path) -> Result<HashMap<String, Value>, SchemaError> {
    let mut siblings = HashMap::new();
    let dir = match schema_path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };

    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if path == schema_path || path.extension().and_then(|e| e.to_str()) != Some("json") {
            continue;
        }
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        // Anything that is not a JSON object cannot be a schema.
        match read_schema(&path) {
            Ok(value) if value.is_object() => {
                siblings.insert(name.to_string(), value);
            }
            Ok(_) => {}
            Err(e) => tracing::debug!(error = %e, "skipping sibling file"),
        }
    }
    Ok(siblings)
}

/// Register each schema under its bare filename and under its own `$id`.
fn index_by_uri(siblings: HashMap<String, Value>) -> HashMap<String, Value> {
    let mut by_uri = HashMap::new();
    for (filename, value) in siblings {
        if let Some(id) = value.get("$id").and_then(|v| v.as_str()) {
            by_uri.insert(id.to_string(), value.clone());
        }
        by_uri.insert(filename, value);
    }
    by_uri
}
