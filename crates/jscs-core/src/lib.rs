//! # jscs-core: Foundational Types for the JSON Schema Core Validator
//!
//! Leaf crate of the workspace. It defines the violation taxonomy and the
//! intra-document pointer service that every validation rule shares.
//!
//! ## Contents
//!
//! - [`error`]: [`SchemaError`] (one variant per rule violation) and
//!   [`PointerError`] (resolution failures).
//! - [`pointer`]: [`resolve`] for `#/a/b` pointers and [`Location`] for
//!   reporting where a violation was found.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `jscs-*` crates.
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod error;
pub mod pointer;

pub use error::{json_kind, PointerError, SchemaError};
pub use pointer::{resolve, Location};
