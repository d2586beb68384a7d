//! # jscs-cli: Command-Line Validator for JSON Schema Core
//!
//! Provides the `jscs` command-line interface.
//!
//! ## Subcommands
//!
//! - `jscs validate`: core rules and optional metaschema conformance for
//!   one or more schema files.
//!
//! ```bash
//! jscs validate schemas/person.json
//! jscs validate --allow-dollar --metaschema core.metaschema.json core.metaschema.json
//! jscs --config jscs.yaml -vv validate schemas/*.json
//! ```
//!
//! ## Crate Policy
//!
//! - CLI construction (argument parsing) is separated from business logic.
//! - Handler functions delegate to `jscs-schema`; no validation rules here.
//! - Exit codes: 0 all documents pass, 1 any document fails, 2 operational
//!   error.

pub mod config;
pub mod validate;
