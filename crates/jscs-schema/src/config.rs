//! # Validator Configuration
//!
//! Options for a [`CoreValidator`](crate::CoreValidator) run. Every field has
//! a default, so a config file only needs the keys it changes.

use serde::{Deserialize, Serialize};

use crate::error::SchemaValidationError;

/// Default bound on the length of a `$ref`/`$extends` chain.
pub const DEFAULT_MAX_REFERENCE_DEPTH: usize = 64;

/// Options controlling one validation pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidatorConfig {
    /// Accept property names that start with `$`.
    ///
    /// Metaschemas describe the dialect's own keywords and need this.
    pub allow_dollar: bool,

    /// Scan the source text for keys repeated within one object.
    pub check_duplicate_keys: bool,

    /// Longest `$ref`/`$extends` chain followed before reporting a cycle.
    pub max_reference_depth: usize,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            allow_dollar: false,
            check_duplicate_keys: true,
            max_reference_depth: DEFAULT_MAX_REFERENCE_DEPTH,
        }
    }
}

impl ValidatorConfig {
    /// Default options with `allow_dollar` set as given.
    pub fn with_allow_dollar(allow_dollar: bool) -> Self {
        Self {
            allow_dollar,
            ..Self::default()
        }
    }

    /// Parse options from YAML (or JSON, which YAML accepts).
    ///
    /// # Errors
    ///
    /// Returns `SchemaValidationError::ConfigError` if the text is not a
    /// valid options mapping.
    pub fn from_yaml_str(text: &str) -> Result<Self, SchemaValidationError> {
        serde_yaml::from_str(text).map_err(|e| SchemaValidationError::ConfigError {
            reason: e.to_string(),
        })
    }
}
