//! Value-level restrictions: `enum` and `const`.
//!
//! Both constrain scalar values and are rejected on compound (object)
//! types. `const` may hold any JSON value.

use serde_json::{Map, Value};

use jscs_core::{json_kind, Location, SchemaError};

use crate::context::Context;
use crate::types::EffectiveType;

pub(crate) fn check(
    ctx: &mut Context<'_>,
    node: &Map<String, Value>,
    location: &Location,
    effective: Option<&EffectiveType>,
) {
    let compound = effective.is_some_and(EffectiveType::is_compound);

    if let Some(values) = node.get("enum") {
        let location = location.key("enum");
        if !values.is_array() {
            ctx.report(
                &location,
                SchemaError::EnumNotList {
                    found: json_kind(values),
                },
            );
        }
        if compound {
            ctx.report(&location, SchemaError::EnumOnCompoundType);
        }
    }

    if node.contains_key("const") && compound {
        ctx.report(&location.key("const"), SchemaError::ConstOnCompoundType);
    }
}
