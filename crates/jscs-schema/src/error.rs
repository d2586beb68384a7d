//! # Operational Errors
//!
//! Failures of the validation *process*: unreadable files, unparseable
//! documents, bad configuration, metaschemas that do not compile, and
//! documents rejected as a whole. Individual rule violations are
//! [`SchemaError`](jscs_core::SchemaError)s collected in a report instead.

use thiserror::Error;

use crate::metaschema::ConformanceViolations;
use crate::report::ValidationReport;

/// Error raised while loading or validating a document.
#[derive(Error, Debug)]
pub enum SchemaValidationError {
    /// The document broke one or more JSON Schema Core rules.
    #[error("'{document}' is not a valid JSON Schema Core document:\n{report}")]
    CoreValidationFailed {
        /// Document path or name.
        document: String,
        /// Every violation found.
        report: ValidationReport,
    },

    /// The document does not conform to the metaschema.
    #[error("'{document}' does not conform to metaschema '{metaschema}':\n{violations}")]
    MetaschemaValidationFailed {
        /// Document path or name.
        document: String,
        /// Metaschema path or name.
        metaschema: String,
        /// Structured list of individual violations.
        violations: ConformanceViolations,
    },

    /// The metaschema could not be compiled into a validator.
    #[error("metaschema build error for '{metaschema}': {reason}")]
    MetaschemaBuildError {
        /// Metaschema path or name.
        metaschema: String,
        /// Reason the validator could not be built.
        reason: String,
    },

    /// A document or metaschema file could not be loaded or parsed.
    #[error("document load error for '{path}': {reason}")]
    DocumentLoadError {
        /// Path to the file that failed to load.
        path: String,
        /// Reason the file could not be loaded.
        reason: String,
    },

    /// Validator options could not be parsed.
    #[error("config error: {reason}")]
    ConfigError {
        /// Parser message.
        reason: String,
    },
}
