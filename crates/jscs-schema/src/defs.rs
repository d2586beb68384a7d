//! # Definitions
//!
//! `$defs` maps names to type definitions. Each definition goes through
//! the full node pipeline, so nested `$defs` and `$offers` are checked too.
//!
//! A `$defs` object that itself carries `name` or `type` with a non-object
//! value is a single type definition written where the mapping belongs;
//! the section is reported once and not descended into.

use serde_json::{Map, Value};

use jscs_core::{json_kind, Location, SchemaError};

use crate::context::Context;
use crate::validate::validate_node;

const DEFINITION_KEYWORDS: [&str; 2] = ["name", "type"];

pub(crate) fn check<'doc>(
    ctx: &mut Context<'doc>,
    node: &'doc Map<String, Value>,
    location: &Location,
) {
    let Some(defs) = node.get("$defs") else {
        return;
    };
    let location = location.key("$defs");
    let Some(defs) = defs.as_object() else {
        ctx.report(
            &location,
            SchemaError::DefsNotObject {
                found: json_kind(defs),
            },
        );
        return;
    };

    let misplaced = DEFINITION_KEYWORDS
        .into_iter()
        .find(|k| defs.get(*k).is_some_and(|v| !v.is_object()));
    if let Some(key) = misplaced {
        ctx.report(
            &location,
            SchemaError::DefsIsNotAMapping {
                key: key.to_string(),
            },
        );
        return;
    }

    for (name, definition) in defs {
        let definition_location = location.key(name);
        match definition.as_object() {
            Some(definition) => validate_node(ctx, definition, &definition_location),
            None => ctx.report(
                &definition_location,
                SchemaError::DefinitionNotObject {
                    name: name.clone(),
                    found: json_kind(definition),
                },
            ),
        }
    }
}
