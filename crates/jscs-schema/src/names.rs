//! Property-name and identifier rules.

use jscs_core::{Location, SchemaError};

use crate::context::Context;

/// Check one key of a `properties` map.
///
/// Names starting with `$` are reserved for dialect keywords and only
/// accepted when the pass allows them (metaschemas).
pub(crate) fn check_property_name(ctx: &mut Context<'_>, name: &str, location: &Location) {
    let reserved = name.starts_with('$') && !ctx.config().allow_dollar;
    if name.is_empty() || reserved {
        ctx.report(
            location,
            SchemaError::DollarPropertyDisallowed {
                name: name.to_string(),
            },
        );
    }
}

/// `[A-Za-z_][A-Za-z0-9_]*`
pub fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
