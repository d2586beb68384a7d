//! # Core Validation
//!
//! Entry points and the node pipeline that drives every rule.
//!
//! ## Traversal
//!
//! The document is walked once, depth-first, starting at the root. Each
//! schema node goes through the same pipeline:
//!
//! 1. `type`/`$root` exclusivity and `$root` resolution;
//! 2. for typed nodes (any of `type`, `$ref`, `$root`): `$ref` and `type`
//!    classification, then effective-type resolution;
//! 3. on every node, namespaces included: `properties` (names checked,
//!    values recursed into) and the `$extends` target;
//! 4. for typed nodes: the type-dependent object rules and enum/const rules;
//! 5. `$defs` (recursing into each definition) and `$offers`.
//!
//! Every violation lands in one report and traversal continues. Only a
//! root that is not an object ends the pass early.

use serde_json::{Map, Value};

use jscs_core::{json_kind, Location, PointerError, SchemaError};

use crate::config::ValidatorConfig;
use crate::context::Context;
use crate::document::SourceDocument;
use crate::duplicates::find_duplicate_keys;
use crate::error::SchemaValidationError;
use crate::report::ValidationReport;
use crate::types::{check_ref_value, classify, effective_type};
use crate::{defs, object, offers, values};

/// Keywords that give a node type semantics.
const TYPING_KEYWORDS: [&str; 3] = ["type", "$ref", "$root"];

/// Validate a JSON Schema Core document.
///
/// `source_text` must be the text `document` was parsed from; it is
/// scanned for duplicate keys. Returns one `"<pointer>: <message>"` line per
/// violation, or an empty list when the document is valid.
pub fn validate(document: &Value, source_text: &str, allow_dollar: bool) -> Vec<String> {
    CoreValidator::new(ValidatorConfig::with_allow_dollar(allow_dollar))
        .validate(document, source_text)
}

/// A configured JSON Schema Core validator.
///
/// Holds no per-document state; one instance can check any number of
/// documents, from any number of threads.
#[derive(Debug, Clone, Default)]
pub struct CoreValidator {
    config: ValidatorConfig,
}

impl CoreValidator {
    /// Create a validator with the given options.
    pub fn new(config: ValidatorConfig) -> Self {
        Self { config }
    }

    /// Returns the options in use.
    pub fn config(&self) -> &ValidatorConfig {
        &self.config
    }

    /// Check a document and return every violation found.
    pub fn check(&self, document: &Value, source_text: &str) -> ValidationReport {
        let mut ctx = Context::new(document, &self.config);
        let location = Location::root();

        let Some(root) = document.as_object() else {
            ctx.report(
                &location,
                SchemaError::NotAnObject {
                    what: "document root",
                    found: json_kind(document),
                },
            );
            return ctx.finish();
        };

        if self.config.check_duplicate_keys {
            check_source(&mut ctx, source_text, &location);
        }
        check_document_keywords(&mut ctx, root, &location);
        validate_node(&mut ctx, root, &location);

        let report = ctx.finish();
        tracing::debug!(violations = report.len(), "core validation finished");
        report
    }

    /// Check a document and render each violation as a line of text.
    pub fn validate(&self, document: &Value, source_text: &str) -> Vec<String> {
        self.check(document, source_text).messages()
    }

    /// Check a loaded document.
    ///
    /// # Errors
    ///
    /// Returns `SchemaValidationError::CoreValidationFailed` carrying the
    /// full report if any rule is broken.
    pub fn validate_document(&self, document: &SourceDocument) -> Result<(), SchemaValidationError> {
        let report = self.check(document.value(), document.source());
        if report.is_empty() {
            Ok(())
        } else {
            Err(SchemaValidationError::CoreValidationFailed {
                document: document.name().to_string(),
                report,
            })
        }
    }
}

fn check_source(ctx: &mut Context<'_>, source_text: &str, location: &Location) {
    match find_duplicate_keys(source_text) {
        Ok(duplicates) => {
            for duplicate in duplicates {
                ctx.report(
                    &duplicate.location,
                    SchemaError::DuplicateKey { key: duplicate.key },
                );
            }
        }
        Err(e) => ctx.report(
            location,
            SchemaError::MalformedSource {
                reason: e.to_string(),
            },
        ),
    }
}

fn check_document_keywords(ctx: &mut Context<'_>, root: &Map<String, Value>, location: &Location) {
    if !root.get("$schema").is_some_and(Value::is_string) {
        ctx.report(location, SchemaError::MissingSchemaKeyword);
    }
    if !root.get("$id").is_some_and(Value::is_string) {
        ctx.report(location, SchemaError::MissingIdKeyword);
    }
}

/// Run the full pipeline on one schema node.
pub(crate) fn validate_node<'doc>(
    ctx: &mut Context<'doc>,
    node: &'doc Map<String, Value>,
    location: &Location,
) {
    if node.contains_key("type") && node.contains_key("$root") {
        ctx.report(location, SchemaError::TypeAndRootConflict);
    }
    if let Some(root) = node.get("$root") {
        let root_location = location.key("$root");
        let resolved = match root.as_str() {
            Some(pointer) => ctx.resolve(pointer).map(|_| ()),
            None => Err(PointerError::Malformed(root.to_string())),
        };
        if let Err(e) = resolved {
            ctx.report(&root_location, e);
        }
    }

    let typed = TYPING_KEYWORDS.iter().any(|k| node.contains_key(*k));
    let (own, effective) = if typed {
        if let Some(reference) = node.get("$ref") {
            check_ref_value(ctx, reference, &location.key("$ref"));
        }
        let own = node
            .get("type")
            .and_then(|ty| classify(ctx, ty, &location.key("type")));
        let effective = match effective_type(ctx, node) {
            Ok(effective) => effective,
            Err(PointerError::Cyclic(pointer)) => {
                ctx.report(location, PointerError::Cyclic(pointer));
                None
            }
            // Resolution failures are reported where the pointer is written.
            Err(_) => None,
        };
        (own, effective)
    } else {
        (None, None)
    };

    object::check_structure(ctx, node, location);
    if typed {
        object::check(ctx, node, location, own.as_ref(), effective.as_ref());
        values::check(ctx, node, location, effective.as_ref());
    }

    defs::check(ctx, node, location);
    offers::check(ctx, node, location);
}
