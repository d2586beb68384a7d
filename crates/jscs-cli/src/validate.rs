//! # Validate Subcommand
//!
//! Checks schema documents against the JSON Schema Core rules and,
//! optionally, a Draft-07 metaschema.
//!
//! Each document gets one line: `OK: <path>`, or `FAIL: <reason>` followed
//! by one indented line per violation. A document that cannot be read or
//! parsed counts as a failure; the remaining documents are still checked.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::Args;

use jscs_schema::{
    CoreValidator, MetaschemaValidator, SchemaValidationError, SourceDocument, ValidatorConfig,
};

use crate::config::CliConfig;

/// Arguments for the `jscs validate` subcommand.
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Schema documents to validate.
    #[arg(value_name = "FILE", required = true)]
    pub paths: Vec<PathBuf>,

    /// Accept property names starting with '$' (needed for metaschemas).
    #[arg(long)]
    pub allow_dollar: bool,

    /// Also check each document against this Draft-07 metaschema.
    #[arg(long, value_name = "FILE")]
    pub metaschema: Option<PathBuf>,

    /// Skip the core rules and only check metaschema conformance.
    #[arg(long)]
    pub skip_core: bool,

    /// Do not scan the source text for repeated keys.
    #[arg(long)]
    pub no_duplicate_check: bool,
}

impl ValidateArgs {
    /// Validator options: the config file values with flags applied on top.
    fn validator_config(&self, config: &CliConfig) -> ValidatorConfig {
        let mut options = config.validator.clone();
        options.allow_dollar |= self.allow_dollar;
        if self.no_duplicate_check {
            options.check_duplicate_keys = false;
        }
        options
    }
}

/// Execute the validate subcommand.
///
/// Returns exit code: 0 when every document passes, 1 when any fails.
/// Operational problems (an unusable metaschema, nothing to check) are
/// returned as errors.
pub fn run_validate(args: &ValidateArgs, config: &CliConfig) -> Result<u8> {
    let metaschema_path = args.metaschema.as_ref().or(config.metaschema.as_ref());
    if args.skip_core && metaschema_path.is_none() {
        bail!("--skip-core requires a metaschema (--metaschema or 'metaschema' in the config file)");
    }

    let metaschema = metaschema_path
        .map(|path| {
            MetaschemaValidator::from_path(path)
                .with_context(|| format!("failed to load metaschema {}", path.display()))
        })
        .transpose()?;
    let core = (!args.skip_core).then(|| CoreValidator::new(args.validator_config(config)));

    tracing::info!(
        documents = args.paths.len(),
        core = core.is_some(),
        metaschema = ?metaschema.as_ref().map(MetaschemaValidator::name),
        "validating"
    );

    let mut failed = 0usize;
    for path in &args.paths {
        let errors = check_path(path, core.as_ref(), metaschema.as_ref());
        if errors.is_empty() {
            println!("OK: {}", path.display());
        } else {
            failed += 1;
            for e in &errors {
                println!("FAIL: {e}");
            }
        }
    }

    if args.paths.len() > 1 {
        println!(
            "\nDocuments: {}/{} passed",
            args.paths.len() - failed,
            args.paths.len()
        );
    }

    Ok(if failed > 0 { 1 } else { 0 })
}

/// Run every enabled pass on one file and collect the failures.
fn check_path(
    path: &Path,
    core: Option<&CoreValidator>,
    metaschema: Option<&MetaschemaValidator>,
) -> Vec<SchemaValidationError> {
    let document = match SourceDocument::from_path(path) {
        Ok(document) => document,
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "document could not be loaded");
            return vec![e];
        }
    };

    let mut errors = Vec::new();
    if let Some(metaschema) = metaschema {
        if let Err(e) = metaschema.validate(&document) {
            errors.push(e);
        }
    }
    if let Some(core) = core {
        if let Err(e) = core.validate_document(&document) {
            errors.push(e);
        }
    }
    errors
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const SCHEMA_URI: &str = "https://schemas.vasters.com/experimental/json-schema-core/v0";

    fn args(paths: Vec<PathBuf>) -> ValidateArgs {
        ValidateArgs {
            paths,
            allow_dollar: false,
            metaschema: None,
            skip_core: false,
            no_duplicate_check: false,
        }
    }

    fn write_json(dir: &Path, name: &str, value: &serde_json::Value) -> PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, serde_json::to_string_pretty(value).unwrap()).unwrap();
        path
    }

    fn valid_doc() -> serde_json::Value {
        json!({
            "$schema": SCHEMA_URI,
            "$id": "https://example.com/schema/person",
            "name": "Person",
            "type": "object",
            "properties": {"name": {"type": "string"}},
            "required": ["name"]
        })
    }

    fn dollar_doc() -> serde_json::Value {
        json!({
            "$schema": SCHEMA_URI,
            "$id": "https://example.com/schema/meta",
            "type": "object",
            "properties": {"$custom": {"type": "string"}}
        })
    }

    fn metaschema() -> serde_json::Value {
        json!({
            "$schema": "http://json-schema.org/draft-07/schema#",
            "type": "object",
            "required": ["$schema", "$id", "name"],
            "properties": {"name": {"type": "string"}}
        })
    }

    #[test]
    fn test_valid_document_exits_zero() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_json(dir.path(), "person.json", &valid_doc());
        let code = run_validate(&args(vec![path]), &CliConfig::default()).unwrap();
        assert_eq!(code, 0);
    }

    #[test]
    fn test_invalid_document_exits_one() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_json(dir.path(), "bad.json", &json!({"type": "object"}));
        let code = run_validate(&args(vec![path]), &CliConfig::default()).unwrap();
        assert_eq!(code, 1);
    }

    #[test]
    fn test_one_failure_among_many_exits_one() {
        let dir = tempfile::tempdir().unwrap();
        let good = write_json(dir.path(), "good.json", &valid_doc());
        let missing = dir.path().join("missing.json");
        let code = run_validate(&args(vec![good, missing]), &CliConfig::default()).unwrap();
        assert_eq!(code, 1);
    }

    #[test]
    fn test_unparseable_document_is_a_failure() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        std::fs::write(&path, "{ not json").unwrap();
        let errors = check_path(&path, Some(&CoreValidator::default()), None);
        assert_eq!(errors.len(), 1);
        assert!(matches!(errors[0], SchemaValidationError::DocumentLoadError { .. }));
    }

    #[test]
    fn test_allow_dollar_flag() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_json(dir.path(), "meta.json", &dollar_doc());
        let config = CliConfig::default();
        assert_eq!(run_validate(&args(vec![path.clone()]), &config).unwrap(), 1);

        let mut with_flag = args(vec![path]);
        with_flag.allow_dollar = true;
        assert_eq!(run_validate(&with_flag, &config).unwrap(), 0);
    }

    #[test]
    fn test_allow_dollar_from_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_json(dir.path(), "meta.json", &dollar_doc());
        let config = CliConfig {
            validator: ValidatorConfig::with_allow_dollar(true),
            metaschema: None,
        };
        assert_eq!(run_validate(&args(vec![path]), &config).unwrap(), 0);
    }

    #[test]
    fn test_duplicate_keys_and_opt_out() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dup.json");
        let text = format!(
            r#"{{"$schema": "{SCHEMA_URI}", "$id": "x", "name": "A", "name": "B", "type": "any"}}"#
        );
        std::fs::write(&path, text).unwrap();
        assert_eq!(run_validate(&args(vec![path.clone()]), &CliConfig::default()).unwrap(), 1);

        let mut opt_out = args(vec![path]);
        opt_out.no_duplicate_check = true;
        assert_eq!(run_validate(&opt_out, &CliConfig::default()).unwrap(), 0);
    }

    #[test]
    fn test_metaschema_conformance_is_checked() {
        let dir = tempfile::tempdir().unwrap();
        let meta = write_json(dir.path(), "core.metaschema.json", &metaschema());
        let nameless = write_json(
            dir.path(),
            "nameless.json",
            &json!({"$schema": SCHEMA_URI, "$id": "x", "type": "any"}),
        );

        let mut core_only = args(vec![nameless.clone()]);
        assert_eq!(run_validate(&core_only, &CliConfig::default()).unwrap(), 0);

        core_only.metaschema = Some(meta);
        assert_eq!(run_validate(&core_only, &CliConfig::default()).unwrap(), 1);
    }

    #[test]
    fn test_skip_core_runs_metaschema_only() {
        let dir = tempfile::tempdir().unwrap();
        let meta = write_json(dir.path(), "core.metaschema.json", &metaschema());
        // Conforms to the metaschema but breaks a core rule.
        let doc = write_json(
            dir.path(),
            "doc.json",
            &json!({"$schema": SCHEMA_URI, "$id": "x", "name": "N", "type": "object"}),
        );
        let mut skip = args(vec![doc.clone()]);
        skip.metaschema = Some(meta.clone());
        skip.skip_core = true;
        assert_eq!(run_validate(&skip, &CliConfig::default()).unwrap(), 0);

        let mut both = args(vec![doc]);
        both.metaschema = Some(meta);
        assert_eq!(run_validate(&both, &CliConfig::default()).unwrap(), 1);
    }

    #[test]
    fn test_metaschema_from_config() {
        let dir = tempfile::tempdir().unwrap();
        let meta = write_json(dir.path(), "core.metaschema.json", &metaschema());
        let doc = write_json(
            dir.path(),
            "doc.json",
            &json!({"$schema": SCHEMA_URI, "$id": "x", "type": "any"}),
        );
        let config = CliConfig {
            validator: ValidatorConfig::default(),
            metaschema: Some(meta),
        };
        assert_eq!(run_validate(&args(vec![doc]), &config).unwrap(), 1);
    }

    #[test]
    fn test_skip_core_without_metaschema_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_json(dir.path(), "person.json", &valid_doc());
        let mut skip = args(vec![path]);
        skip.skip_core = true;
        assert!(run_validate(&skip, &CliConfig::default()).is_err());
    }

    #[test]
    fn test_missing_metaschema_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_json(dir.path(), "person.json", &valid_doc());
        let mut with_meta = args(vec![path]);
        with_meta.metaschema = Some(dir.path().join("nope.json"));
        let err = run_validate(&with_meta, &CliConfig::default()).unwrap_err();
        assert!(format!("{err:#}").contains("failed to load metaschema"));
    }

    #[test]
    fn test_flags_override_config() {
        let config = CliConfig {
            validator: ValidatorConfig {
                allow_dollar: false,
                check_duplicate_keys: true,
                max_reference_depth: 12,
            },
            metaschema: None,
        };
        let mut a = args(vec![]);
        a.allow_dollar = true;
        a.no_duplicate_check = true;
        let options = a.validator_config(&config);
        assert!(options.allow_dollar);
        assert!(!options.check_duplicate_keys);
        assert_eq!(options.max_reference_depth, 12);
    }
}
