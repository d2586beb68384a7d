//! # Metaschema Conformance
//!
//! Structural checking of a schema document against the JSON Schema Core
//! metaschema, itself a Draft-07 JSON Schema, using the `jsonschema` crate.
//!
//! Conformance and the core rules are independent passes: a document can
//! satisfy the metaschema's shape and still break a semantic rule such as
//! pointer resolution, and the other way around. The CLI runs both.
//!
//! ## Offline Resolution
//!
//! Remote `$ref` URIs in a metaschema are never fetched. They resolve to a
//! permissive empty schema, so only the parts of the metaschema that are
//! present locally constrain the document.

use std::fmt;
use std::path::Path;

use jsonschema::{Retrieve, Uri, Validator};
use serde_json::Value;

use crate::document::SourceDocument;
use crate::error::SchemaValidationError;

/// Resolves every external `$ref` to an empty (accept-all) schema.
struct OfflineRetriever;

impl Retrieve for OfflineRetriever {
    fn retrieve(
        &self,
        uri: &Uri<&str>,
    ) -> Result<Value, Box<dyn std::error::Error + Send + Sync>> {
        tracing::debug!(uri = uri.as_str(), "external metaschema reference left unresolved");
        Ok(serde_json::json!({}))
    }
}

/// A single metaschema violation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConformanceViolation {
    /// JSON Pointer path to the violating node in the document.
    pub instance_path: String,
    /// JSON Pointer path within the metaschema that triggered the error.
    pub schema_path: String,
    /// Human-readable description of the violation.
    pub message: String,
}

impl fmt::Display for ConformanceViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.instance_path.is_empty() {
            write!(f, "  (root): {}", self.message)
        } else {
            write!(f, "  {}: {}", self.instance_path, self.message)
        }
    }
}

/// Collection of metaschema violations.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConformanceViolations {
    violations: Vec<ConformanceViolation>,
}

impl ConformanceViolations {
    /// Returns the number of violations.
    pub fn len(&self) -> usize {
        self.violations.len()
    }

    /// Returns true if there are no violations.
    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    /// Returns a slice of all violations.
    pub fn violations(&self) -> &[ConformanceViolation] {
        &self.violations
    }

    /// Consumes self and returns the inner Vec.
    pub fn into_inner(self) -> Vec<ConformanceViolation> {
        self.violations
    }
}

impl fmt::Display for ConformanceViolations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, v) in self.violations.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{v}")?;
        }
        Ok(())
    }
}

/// A compiled Draft-07 metaschema.
pub struct MetaschemaValidator {
    name: String,
    validator: Validator,
}

impl fmt::Debug for MetaschemaValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MetaschemaValidator")
            .field("name", &self.name)
            .finish()
    }
}

impl MetaschemaValidator {
    /// Compile `metaschema` as a Draft-07 schema. `name` is used in errors.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaValidationError::MetaschemaBuildError`] if the value is
    /// not a valid Draft-07 schema.
    pub fn new(name: impl Into<String>, metaschema: &Value) -> Result<Self, SchemaValidationError> {
        let name = name.into();
        let validator = jsonschema::options()
            .with_draft(jsonschema::Draft::Draft7)
            .with_retriever(OfflineRetriever)
            .build(metaschema)
            .map_err(|e| SchemaValidationError::MetaschemaBuildError {
                metaschema: name.clone(),
                reason: e.to_string(),
            })?;
        Ok(Self { name, validator })
    }

    /// Load and compile a metaschema file.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaValidationError::DocumentLoadError`] if the file cannot
    /// be read or parsed, and [`SchemaValidationError::MetaschemaBuildError`]
    /// if it does not compile.
    pub fn from_path(path: &Path) -> Result<Self, SchemaValidationError> {
        let document = SourceDocument::from_path(path)?;
        Self::new(document.name(), document.value())
    }

    /// Path or name the metaschema was loaded under.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Collect every way `instance` fails to conform.
    pub fn conformance(&self, instance: &Value) -> ConformanceViolations {
        let violations = self
            .validator
            .iter_errors(instance)
            .map(|e| ConformanceViolation {
                instance_path: e.instance_path.to_string(),
                schema_path: e.schema_path.to_string(),
                message: e.to_string(),
            })
            .collect();
        ConformanceViolations { violations }
    }

    /// Check a loaded document against the metaschema.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaValidationError::MetaschemaValidationFailed`] with
    /// every violation if the document does not conform.
    pub fn validate(&self, document: &SourceDocument) -> Result<(), SchemaValidationError> {
        let violations = self.conformance(document.value());
        tracing::debug!(
            document = document.name(),
            metaschema = %self.name,
            violations = violations.len(),
            "metaschema conformance checked"
        );
        if violations.is_empty() {
            Ok(())
        } else {
            Err(SchemaValidationError::MetaschemaValidationFailed {
                document: document.name().to_string(),
                metaschema: self.name.clone(),
                violations,
            })
        }
    }
}
