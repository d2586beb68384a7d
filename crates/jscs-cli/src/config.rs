//! # CLI Configuration File
//!
//! Optional YAML (or JSON) file named by the global `--config` flag. It
//! carries the validator options plus a default metaschema:
//!
//! ```yaml
//! allow_dollar: false
//! check_duplicate_keys: true
//! max_reference_depth: 64
//! metaschema: schemas/json-schema-core.metaschema.json
//! ```
//!
//! A relative `metaschema` path is resolved against the directory holding
//! the config file. Command-line flags override file values.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use jscs_schema::ValidatorConfig;

/// Contents of a `--config` file.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// Options passed to the core validator.
    #[serde(flatten)]
    pub validator: ValidatorConfig,

    /// Metaschema used when `--metaschema` is not given.
    pub metaschema: Option<PathBuf>,
}

impl CliConfig {
    /// Read and parse a config file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        let mut config: Self = serde_yaml::from_str(&content)
            .with_context(|| format!("failed to parse config file {}", path.display()))?;

        if let Some(metaschema) = config.metaschema.take() {
            let base = path.parent().unwrap_or_else(|| Path::new("."));
            config.metaschema = Some(resolve_path(&metaschema, base));
        }
        tracing::debug!(config = ?config, "loaded configuration");
        Ok(config)
    }
}

/// Resolve `path` against `base` unless it is already absolute.
pub fn resolve_path(path: &Path, base: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}
