//! # Object-Schema Rules
//!
//! `properties`, `required`, `additionalProperties`, `$extends` and
//! `abstract`.
//!
//! `required` and `additionalProperties` only make sense when the node's
//! effective type is object. A node declaring `type: "object"` must say what
//! its properties are, either directly or by inheriting them through
//! `$extends`.

use std::collections::HashSet;

use serde_json::{Map, Value};

use jscs_core::{json_kind, Location, PointerError, SchemaError};

use crate::context::Context;
use crate::names::check_property_name;
use crate::types::{effective_type, EffectiveType, TypeExpr};
use crate::validate::validate_node;

/// Rules that hold on every node, namespaces included: `properties` and
/// `$extends`.
pub(crate) fn check_structure<'doc>(
    ctx: &mut Context<'doc>,
    node: &'doc Map<String, Value>,
    location: &Location,
) {
    if let Some(properties) = node.get("properties") {
        check_properties(ctx, properties, &location.key("properties"));
    }
    if let Some(extends) = node.get("$extends") {
        if let Err(e) = check_extends(ctx, extends) {
            ctx.report(&location.key("$extends"), e);
        }
    }
}

/// Apply the type-dependent object rules to a typed (non-namespace) node.
///
/// `own` is the node's classified `type`, `effective` its resolved type;
/// either is `None` when unknown, in which case type-dependent checks are
/// skipped rather than guessed.
pub(crate) fn check<'doc>(
    ctx: &mut Context<'doc>,
    node: &'doc Map<String, Value>,
    location: &Location,
    own: Option<&TypeExpr<'doc>>,
    effective: Option<&EffectiveType>,
) {
    if own.is_some_and(TypeExpr::is_object)
        && !node.contains_key("properties")
        && !node.contains_key("$extends")
    {
        ctx.report(location, SchemaError::ObjectRequiresPropertiesOrExtends);
    }

    if let Some(required) = node.get("required") {
        let location = location.key("required");
        let names_ok = required
            .as_array()
            .is_some_and(|items| items.iter().all(Value::is_string));
        if !names_ok {
            ctx.report(&location, SchemaError::RequiredNotStringList);
        }
        if let Some(effective) = effective.filter(|t| !t.is_compound()) {
            ctx.report(
                &location,
                SchemaError::RequiredOnNonObject {
                    effective: effective.to_string(),
                },
            );
        }
    }

    if let Some(additional) = node.get("additionalProperties") {
        let location = location.key("additionalProperties");
        if !additional.is_boolean() {
            ctx.report(
                &location,
                SchemaError::AdditionalPropertiesNotBoolean {
                    found: json_kind(additional),
                },
            );
        }
        if let Some(effective) = effective.filter(|t| !t.is_compound()) {
            ctx.report(
                &location,
                SchemaError::AdditionalPropertiesOnNonObject {
                    effective: effective.to_string(),
                },
            );
        }
    }

    if let Some(flag) = node.get("abstract") {
        if !flag.is_boolean() {
            ctx.report(
                &location.key("abstract"),
                SchemaError::AbstractNotBoolean {
                    found: json_kind(flag),
                },
            );
        }
    }
}

fn check_properties<'doc>(ctx: &mut Context<'doc>, properties: &'doc Value, location: &Location) {
    let Some(map) = properties.as_object() else {
        ctx.report(
            location,
            SchemaError::PropertiesNotObject {
                found: json_kind(properties),
            },
        );
        return;
    };
    for (name, schema) in map {
        let property_location = location.key(name);
        check_property_name(ctx, name, &property_location);
        match schema.as_object() {
            Some(schema) => validate_node(ctx, schema, &property_location),
            None => ctx.report(
                &property_location,
                SchemaError::NotAnObject {
                    what: "property schema",
                    found: json_kind(schema),
                },
            ),
        }
    }
}

/// Check that `$extends` leads to an object type.
///
/// Only the first hop is judged (its target must resolve and be an object
/// type); further `$extends` hops are followed to detect cycles, while their
/// own resolution problems are reported where they are written.
fn check_extends(ctx: &Context<'_>, extends: &Value) -> Result<(), SchemaError> {
    let Some(pointer) = extends.as_str() else {
        return Err(SchemaError::ExtendsUnresolved {
            pointer: extends.to_string(),
            reason: format!("expected a pointer string, found {}", json_kind(extends)),
        });
    };
    let unusable = |reason: String| SchemaError::ExtendsUnresolved {
        pointer: pointer.to_string(),
        reason,
    };

    let base = ctx.resolve(pointer).map_err(|e| unusable(e.to_string()))?;
    let Some(base) = base.as_object() else {
        return Err(unusable(format!("target is a {}, not a type definition", json_kind(base))));
    };
    match effective_type(ctx, base) {
        Ok(Some(EffectiveType::Object)) => {}
        Ok(Some(other)) => return Err(unusable(format!("target type is {other}, not object"))),
        Ok(None) => return Err(unusable("target declares no type".to_string())),
        Err(PointerError::Cyclic(p)) => return Err(PointerError::Cyclic(p).into()),
        Err(e) => return Err(unusable(e.to_string())),
    }

    let limit = ctx.config().max_reference_depth;
    let mut visited = HashSet::from([pointer.to_string()]);
    let mut next = base.get("$extends").and_then(Value::as_str);
    while let Some(pointer) = next {
        if visited.len() >= limit || !visited.insert(pointer.to_string()) {
            return Err(PointerError::Cyclic(pointer.to_string()).into());
        }
        next = ctx
            .resolve(pointer)
            .ok()
            .and_then(|target| target.get("$extends"))
            .and_then(Value::as_str);
    }
    Ok(())
}
