//! A schema document together with the text it was parsed from.
//!
//! Duplicate-key detection works on the source text, so both are kept.

use std::path::Path;

use serde_json::Value;

use crate::error::SchemaValidationError;

/// A parsed JSON Schema Core document.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceDocument {
    name: String,
    source: String,
    value: Value,
}

impl SourceDocument {
    /// Parse `source` as JSON. `name` is used in error messages.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaValidationError::DocumentLoadError`] if the text is not
    /// valid JSON.
    pub fn parse(
        name: impl Into<String>,
        source: impl Into<String>,
    ) -> Result<Self, SchemaValidationError> {
        let name = name.into();
        let source = source.into();
        let value = serde_json::from_str(&source).map_err(|e| {
            SchemaValidationError::DocumentLoadError {
                path: name.clone(),
                reason: format!("JSON parse error: {e}"),
            }
        })?;
        Ok(Self {
            name,
            source,
            value,
        })
    }

    /// Read and parse a JSON file.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaValidationError::DocumentLoadError`] if the file cannot
    /// be read or is not valid JSON.
    pub fn from_path(path: &Path) -> Result<Self, SchemaValidationError> {
        let source = std::fs::read_to_string(path).map_err(|e| {
            SchemaValidationError::DocumentLoadError {
                path: path.display().to_string(),
                reason: e.to_string(),
            }
        })?;
        Self::parse(path.display().to_string(), source)
    }

    /// Path or name the document was loaded under.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The text the document was parsed from.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// The parsed value.
    pub fn value(&self) -> &Value {
        &self.value
    }
}
