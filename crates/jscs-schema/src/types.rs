//! # Type Expressions
//!
//! Classifies the polymorphic `type` keyword and computes a node's
//! *effective* type.
//!
//! A `type` value is one of:
//!
//! - `"any"`, a primitive name, or `"object"` (a string);
//! - `{"$ref": "#/..."}` (a reference to a named type);
//! - an array of primitive names and `$ref` objects (a union).
//!
//! Union members are always named types. An anonymous structure inside a
//! union (`{"type": "object", ...}` or the bare string `"object"`) is
//! rejected.
//!
//! The effective type is what a node's type turns out to be after
//! following `$ref`, `$extends` and `$root` chains. Chains are followed with
//! a visited set, so alias loops end in [`PointerError::Cyclic`].

use std::collections::HashSet;
use std::fmt;

use serde_json::{Map, Value};

use jscs_core::{json_kind, Location, PointerError, SchemaError};

use crate::context::Context;

/// Primitive type names accepted in `type`.
pub const PRIMITIVE_TYPES: &[&str] = &[
    "null",
    "boolean",
    "string",
    "number",
    "integer",
    "int8",
    "uint8",
    "int16",
    "uint16",
    "int32",
    "uint32",
    "int64",
    "uint64",
    "int128",
    "uint128",
    "float8",
    "float",
    "double",
    "decimal",
    "date",
    "datetime",
    "time",
    "duration",
    "uuid",
    "uri",
    "binary",
    "jsonpointer",
];

/// True for the names in [`PRIMITIVE_TYPES`].
pub fn is_primitive(name: &str) -> bool {
    PRIMITIVE_TYPES.contains(&name)
}

/// A classified `type` value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeExpr<'a> {
    /// `"any"`: no constraints.
    Any,
    /// A primitive scalar such as `"string"` or `"int32"`.
    Primitive(&'a str),
    /// `"object"`: a compound type checked by the object rules.
    Object,
    /// `{"$ref": pointer}`.
    Ref(&'a str),
    /// An array of named alternatives.
    Union(Vec<UnionMember<'a>>),
}

/// One alternative of a union type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnionMember<'a> {
    /// A primitive name (or `"any"`).
    Primitive(&'a str),
    /// A reference to a named type.
    Ref(&'a str),
}

impl TypeExpr<'_> {
    /// True for the literal `"object"`.
    pub fn is_object(&self) -> bool {
        matches!(self, Self::Object)
    }
}

impl fmt::Display for TypeExpr<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Any => f.write_str("any"),
            Self::Primitive(name) => f.write_str(name),
            Self::Object => f.write_str("object"),
            Self::Ref(pointer) => write!(f, "$ref {pointer}"),
            Self::Union(members) => write!(f, "union of {}", members.len()),
        }
    }
}

/// A node's type after following references.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EffectiveType {
    /// `"any"`.
    Any,
    /// A primitive name, as written.
    Primitive(String),
    /// `"object"`.
    Object,
    /// A union of alternatives.
    Union,
}

impl EffectiveType {
    /// Compound types are structured; value-level keywords do not apply to them.
    pub fn is_compound(&self) -> bool {
        matches!(self, Self::Object)
    }
}

impl fmt::Display for EffectiveType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Any => f.write_str("any"),
            Self::Primitive(name) => f.write_str(name),
            Self::Object => f.write_str("object"),
            Self::Union => f.write_str("union"),
        }
    }
}

/// Classify a raw `type` value, reporting every problem found.
///
/// Returns `None` when the expression is unusable. A `$ref` whose target
/// does not resolve is reported but still classified as [`TypeExpr::Ref`].
pub(crate) fn classify<'doc>(
    ctx: &mut Context<'doc>,
    value: &'doc Value,
    location: &Location,
) -> Option<TypeExpr<'doc>> {
    match value {
        Value::String(name) => classify_name(ctx, name, location),
        Value::Object(map) => check_ref_object(ctx, map, location).map(TypeExpr::Ref),
        Value::Array(items) => classify_union(ctx, items, location),
        other => {
            ctx.report(
                location,
                SchemaError::InvalidTypeExpression {
                    context: "'type'".to_string(),
                    found: json_kind(other),
                },
            );
            None
        }
    }
}

fn classify_name<'doc>(
    ctx: &mut Context<'doc>,
    name: &'doc str,
    location: &Location,
) -> Option<TypeExpr<'doc>> {
    match name {
        "any" => Some(TypeExpr::Any),
        "object" => Some(TypeExpr::Object),
        _ if is_primitive(name) => Some(TypeExpr::Primitive(name)),
        _ => {
            ctx.report(
                location,
                SchemaError::UnknownPrimitive {
                    name: name.to_string(),
                },
            );
            None
        }
    }
}

fn classify_union<'doc>(
    ctx: &mut Context<'doc>,
    items: &'doc [Value],
    location: &Location,
) -> Option<TypeExpr<'doc>> {
    if items.is_empty() {
        ctx.report(location, SchemaError::EmptyUnion);
        return None;
    }

    let mut members = Vec::with_capacity(items.len());
    let mut usable = true;
    for (index, item) in items.iter().enumerate() {
        let item_location = location.index(index);
        let member = match item {
            Value::String(name) if name == "object" => {
                ctx.report(&item_location, SchemaError::InlineCompoundInUnion { index });
                None
            }
            Value::String(name) if name == "any" || is_primitive(name) => {
                Some(UnionMember::Primitive(name.as_str()))
            }
            Value::String(name) => {
                ctx.report(
                    &item_location,
                    SchemaError::UnknownPrimitive { name: name.clone() },
                );
                None
            }
            Value::Object(map) if is_inline_compound(map) => {
                ctx.report(&item_location, SchemaError::InlineCompoundInUnion { index });
                None
            }
            Value::Object(map) => {
                check_ref_object(ctx, map, &item_location).map(UnionMember::Ref)
            }
            other => {
                ctx.report(
                    &item_location,
                    SchemaError::InvalidTypeExpression {
                        context: format!("union member {index}"),
                        found: json_kind(other),
                    },
                );
                None
            }
        };
        match member {
            Some(member) => members.push(member),
            None => usable = false,
        }
    }

    usable.then_some(TypeExpr::Union(members))
}

/// An anonymous object structure: `properties`, or `type: "object"`.
fn is_inline_compound(map: &Map<String, Value>) -> bool {
    map.contains_key("properties") || map.get("type").and_then(Value::as_str) == Some("object")
}

/// A `{"$ref": ...}` object used as a type expression.
fn check_ref_object<'doc>(
    ctx: &mut Context<'doc>,
    map: &'doc Map<String, Value>,
    location: &Location,
) -> Option<&'doc str> {
    let Some(value) = map.get("$ref") else {
        ctx.report(
            location,
            SchemaError::RefMalformed {
                reason: "a type object must contain '$ref'".to_string(),
            },
        );
        return None;
    };
    if map.len() != 1 {
        ctx.report(
            location,
            SchemaError::RefMalformed {
                reason: "a '$ref' type object must not carry other keywords".to_string(),
            },
        );
    }
    check_ref_value(ctx, value, &location.key("$ref"))
}

/// Check a `$ref` value and report when its target does not resolve.
///
/// Returns the pointer when the value is at least a `#`-prefixed string.
pub(crate) fn check_ref_value<'doc>(
    ctx: &mut Context<'doc>,
    value: &'doc Value,
    location: &Location,
) -> Option<&'doc str> {
    let Some(pointer) = value.as_str() else {
        ctx.report(
            location,
            SchemaError::RefNotString {
                found: json_kind(value),
            },
        );
        return None;
    };
    if !pointer.starts_with('#') {
        ctx.report(
            location,
            SchemaError::RefMalformed {
                reason: format!("'{pointer}' does not start with '#'"),
            },
        );
        return None;
    }
    if let Err(e) = ctx.resolve(pointer) {
        ctx.report(location, e);
    }
    Some(pointer)
}

/// The effective type of `node`, following reference chains.
///
/// `Ok(None)` means the node carries no usable type information (a
/// namespace, or a chain ending in something that is not a schema node).
pub(crate) fn effective_type(
    ctx: &Context<'_>,
    node: &Map<String, Value>,
) -> Result<Option<EffectiveType>, PointerError> {
    let mut visited = HashSet::new();
    chase(ctx, node, &mut visited)
}

fn chase(
    ctx: &Context<'_>,
    node: &Map<String, Value>,
    visited: &mut HashSet<String>,
) -> Result<Option<EffectiveType>, PointerError> {
    if let Some(ty) = node.get("type") {
        return match ty {
            Value::String(name) => Ok(Some(match name.as_str() {
                "any" => EffectiveType::Any,
                "object" => EffectiveType::Object,
                other => EffectiveType::Primitive(other.to_string()),
            })),
            Value::Array(_) => Ok(Some(EffectiveType::Union)),
            Value::Object(map) => match map.get("$ref").and_then(Value::as_str) {
                Some(pointer) => follow(ctx, pointer, visited),
                None => Ok(None),
            },
            _ => Ok(None),
        };
    }
    for keyword in ["$ref", "$extends", "$root"] {
        if let Some(pointer) = node.get(keyword).and_then(Value::as_str) {
            return follow(ctx, pointer, visited);
        }
    }
    Ok(None)
}

fn follow(
    ctx: &Context<'_>,
    pointer: &str,
    visited: &mut HashSet<String>,
) -> Result<Option<EffectiveType>, PointerError> {
    // Overlong chains are treated like loops.
    if visited.len() >= ctx.config().max_reference_depth || !visited.insert(pointer.to_string()) {
        return Err(PointerError::Cyclic(pointer.to_string()));
    }
    tracing::trace!(pointer, depth = visited.len(), "following reference");
    match ctx.resolve(pointer)? {
        Value::Object(target) => chase(ctx, target, visited),
        _ => Ok(None),
    }
}
