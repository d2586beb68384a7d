//! # jscs-schema: JSON Schema Core Document Validation
//!
//! Decides whether a JSON document is a well-formed JSON Schema Core
//! schema, and reports every violation with the pointer of the node that
//! caused it.
//!
//! ## Core Rules (`validate`)
//!
//! [`CoreValidator`] walks the document once and applies the semantic
//! rules a metaschema cannot express:
//!
//! - `type` expressions: primitives, `$ref` objects and unions ([`types`]);
//! - object schemas: `properties`, `required`, `additionalProperties`,
//!   `$extends` and `abstract` (`object`);
//! - `enum`/`const` placement (`values`);
//! - `$defs` namespaces and `$offers` registries (`defs`, `offers`);
//! - property-name policy ([`names`]) and repeated keys ([`duplicates`]).
//!
//! Every pointer must resolve inside the document. Reference chains are
//! followed with visited sets, so cyclic documents terminate with a
//! report instead of recursing forever.
//!
//! ## Metaschema Conformance (`metaschema`)
//!
//! [`MetaschemaValidator`] checks a document against the dialect's Draft-07
//! metaschema using the `jsonschema` crate. It is an independent pass.
//!
//! ## Crate Policy
//!
//! - Depends only on `jscs-core` internally.
//! - Rule violations are data ([`ValidationReport`]); only operational
//!   failures (I/O, parse, bad metaschema) are [`SchemaValidationError`]s.
//! - Validation never mutates the document and never panics on input.

pub mod config;
mod context;
mod defs;
pub mod document;
pub mod duplicates;
pub mod error;
pub mod metaschema;
pub mod names;
mod object;
mod offers;
pub mod report;
pub mod types;
pub mod validate;
mod values;

pub use config::ValidatorConfig;
pub use document::SourceDocument;
pub use error::SchemaValidationError;
pub use metaschema::{ConformanceViolation, ConformanceViolations, MetaschemaValidator};
pub use report::{ValidationReport, Violation};
pub use validate::{validate, CoreValidator};
