//! # Batch Document Loading
//!
//! Reads one batch file into a `serde_json::Value`. The format is picked
//! from the extension: `.yaml`/`.yml` go through `serde_yaml`, everything
//! else is parsed as JSON. YAML batches are converted to the same JSON
//! value tree, so schema and rule checks never see the difference.

use std::path::Path;

use serde_json::Value;

use crate::validate::SchemaError;

/// Load and parse the batch document at `path`.
///
/// # Errors
///
/// Returns [`SchemaError::DocumentLoad`] if the file cannot be read or its
/// content is not a well-formed document. The reason text is meant to be
/// shown to the author of the file.
pub fn load_document(path: &Path) -> Result<Value, SchemaError> {
    let content = std::fs::read_to_string(path).map_err(|e| SchemaError::DocumentLoad {
        path: path.display().to_string(),
        reason: format!("cannot read file: {e}"),
    })?;

    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");

    match ext {
        "yaml" | "yml" => serde_yaml::from_str::<Value>(&content).map_err(|e| {
            SchemaError::DocumentLoad {
                path: path.display().to_string(),
                reason: format!("invalid YAML: {e}"),
            }
        }),
        _ => serde_json::from_str::<Value>(&content).map_err(|e| SchemaError::DocumentLoad {
            path: path.display().to_string(),
            reason: format!("invalid JSON: {e}"),
        }),
    }
}
