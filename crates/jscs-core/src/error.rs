//! # Error Types: Violation Taxonomy
//!
//! Defines every rule violation the validator can report. All errors use
//! `thiserror` for derive-based `Display` and `Error` implementations.
//!
//! ## Design
//!
//! - A [`SchemaError`] is a *finding*, not a failure of the validator. The
//!   traversal appends it to the report and keeps going.
//! - Pointer resolution failures live in [`PointerError`] and convert into
//!   [`SchemaError`] with `#[from]`, so resolver call sites can use `?`
//!   inside helper functions.
//! - Messages name the offending keyword and value; the location of the
//!   node is attached separately by the report.

use thiserror::Error;

/// Failure to resolve an intra-document JSON Pointer.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PointerError {
    /// The pointer does not start with `#`, or `#` is followed by
    /// something other than `/segment...`.
    #[error("malformed pointer '{0}': expected '#' or '#/segment/...'")]
    Malformed(String),

    /// A segment names a missing key, an out-of-range index, or indexes
    /// into a scalar.
    #[error("pointer '{0}' does not resolve to a node in this document")]
    Unresolved(String),

    /// Following a `$ref`/`$extends` chain revisited a pointer.
    #[error("cyclic reference through '{0}'")]
    Cyclic(String),
}

/// A single rule violation found in a schema document.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    // -- structural --
    /// A position that must hold a JSON object holds something else.
    #[error("{what} must be a JSON object, found {found}")]
    NotAnObject {
        /// What was expected at this position (e.g. "document root").
        what: &'static str,
        /// JSON kind actually found.
        found: &'static str,
    },

    /// The source text could not be scanned for duplicate keys.
    #[error("source text is not valid JSON: {reason}")]
    MalformedSource {
        /// Parser message.
        reason: String,
    },

    /// `$defs` is present but is not an object.
    #[error("'$defs' must be an object mapping names to definitions, found {found}")]
    DefsNotObject {
        /// JSON kind actually found.
        found: &'static str,
    },

    /// `$defs` looks like a single type definition instead of a mapping.
    #[error("'$defs' must be a mapping of named definitions, but carries '{key}' directly")]
    DefsIsNotAMapping {
        /// The definition keyword found at the top level of `$defs`.
        key: String,
    },

    /// An entry in `$defs` is not an object.
    #[error("definition '{name}' must be a JSON object, found {found}")]
    DefinitionNotObject {
        /// Entry name.
        name: String,
        /// JSON kind actually found.
        found: &'static str,
    },

    /// `properties` is present but is not an object.
    #[error("'properties' must be an object, found {found}")]
    PropertiesNotObject {
        /// JSON kind actually found.
        found: &'static str,
    },

    /// `$offers` is present but is not an object.
    #[error("'$offers' must be an object, found {found}")]
    OffersNotObject {
        /// JSON kind actually found.
        found: &'static str,
    },

    // -- pointer --
    /// A pointer could not be resolved.
    #[error(transparent)]
    Pointer(#[from] PointerError),

    // -- type system --
    /// `type` names something that is neither a primitive nor `object`.
    #[error("unknown type '{name}'")]
    UnknownPrimitive {
        /// The unrecognized name.
        name: String,
    },

    /// `type` (or a union member) has a JSON shape that cannot express a type.
    #[error("{context} must be a type name, a {{\"$ref\": ...}} object or a union array, found {found}")]
    InvalidTypeExpression {
        /// Where the expression appeared ("type" or "union member N").
        context: String,
        /// JSON kind actually found.
        found: &'static str,
    },

    /// `type` is an empty union.
    #[error("union 'type' must list at least one member")]
    EmptyUnion,

    /// `$ref` is present but is not a string.
    #[error("'$ref' must be a string, found {found}")]
    RefNotString {
        /// JSON kind actually found.
        found: &'static str,
    },

    /// A `$ref` object or value is shaped incorrectly.
    #[error("malformed '$ref': {reason}")]
    RefMalformed {
        /// What is wrong with it.
        reason: String,
    },

    /// A union member is an anonymous structured type.
    #[error("union member {index} is an inline compound type; union members must be type names or $ref")]
    InlineCompoundInUnion {
        /// Position of the member in the union array.
        index: usize,
    },

    // -- object rules --
    /// `type: object` without `properties` or `$extends`.
    #[error("object type must declare 'properties' or '$extends'")]
    ObjectRequiresPropertiesOrExtends,

    /// `required` on a node whose effective type is not object.
    #[error("'required' is only allowed on object types, effective type is {effective}")]
    RequiredOnNonObject {
        /// Name of the effective type.
        effective: String,
    },

    /// `required` is not an array of strings.
    #[error("'required' must be an array of property names")]
    RequiredNotStringList,

    /// `additionalProperties` on a node whose effective type is not object.
    #[error("'additionalProperties' is only allowed on object types, effective type is {effective}")]
    AdditionalPropertiesOnNonObject {
        /// Name of the effective type.
        effective: String,
    },

    /// `additionalProperties` is not a boolean.
    #[error("'additionalProperties' must be a boolean, found {found}")]
    AdditionalPropertiesNotBoolean {
        /// JSON kind actually found.
        found: &'static str,
    },

    /// `$extends` does not lead to an object type.
    #[error("'$extends' target '{pointer}' is not usable: {reason}")]
    ExtendsUnresolved {
        /// The `$extends` value as written.
        pointer: String,
        /// Why the target was rejected.
        reason: String,
    },

    /// `abstract` is not a boolean.
    #[error("'abstract' must be a boolean, found {found}")]
    AbstractNotBoolean {
        /// JSON kind actually found.
        found: &'static str,
    },

    // -- value rules --
    /// `enum` is not an array.
    #[error("'enum' must be an array, found {found}")]
    EnumNotList {
        /// JSON kind actually found.
        found: &'static str,
    },

    /// `enum` on an object type.
    #[error("'enum' is not allowed on compound (object) types")]
    EnumOnCompoundType,

    /// `const` on an object type.
    #[error("'const' is not allowed on compound (object) types")]
    ConstOnCompoundType,

    // -- naming --
    /// A property name starts with `$` (or is empty) and dollar names are not allowed.
    #[error("property name '{name}' does not match the property name rules: names must be non-empty and must not start with '$'")]
    DollarPropertyDisallowed {
        /// The rejected name.
        name: String,
    },

    /// The same key appears twice in one object in the source text.
    #[error("duplicate key '{key}'")]
    DuplicateKey {
        /// The repeated key.
        key: String,
    },

    // -- offers --
    /// An `$offers` key is not an identifier string.
    #[error("'$offers' key '{key}' is not an identifier string")]
    OffersKeyNotString {
        /// The rejected key.
        key: String,
    },

    /// An `$offers` value is not a pointer string or array of pointer strings.
    #[error("'$offers' entry '{key}' must be a pointer string or an array of pointer strings, found {found}")]
    OffersValueNotString {
        /// The offer name.
        key: String,
        /// JSON kind actually found.
        found: &'static str,
    },

    // -- document level --
    /// The root lacks a string `$schema`.
    #[error("document root must declare a string '$schema'")]
    MissingSchemaKeyword,

    /// The root lacks a string `$id`.
    #[error("document root must declare a string '$id'")]
    MissingIdKeyword,

    /// A node declares both `type` and `$root`.
    #[error("'type' and '$root' are mutually exclusive")]
    TypeAndRootConflict,
}

/// Short JSON kind name for messages.
pub fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}
