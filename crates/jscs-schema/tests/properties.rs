//! # Property Tests
//!
//! Validation is a pure function of the document: running it twice gives
//! the same report, and the order in which `$defs` entries or `properties`
//! are written does not change which violations are found.

use jscs_schema::validate;
use proptest::prelude::*;
use serde_json::{json, Map, Value};

const NAMES: [&str; 5] = ["Alpha", "Beta", "Gamma", "Delta", "Epsilon"];
const PROPERTY_NAMES: [&str; 5] = ["id", "label", "$meta", "count", "child"];

/// A type expression drawn from valid and invalid shapes alike.
fn type_expr() -> impl Strategy<Value = Value> {
    prop_oneof![
        prop::sample::select(vec!["any", "string", "int32", "uuid", "strng", "object"])
            .prop_map(|t| json!(t)),
        prop::sample::select(NAMES.to_vec())
            .prop_map(|n| json!({"$ref": format!("#/$defs/{n}")})),
        prop::sample::select(NAMES.to_vec())
            .prop_map(|n| json!(["null", {"$ref": format!("#/$defs/{n}")}])),
        Just(json!([])),
        Just(json!(7)),
    ]
}

fn definition() -> impl Strategy<Value = Value> {
    (type_expr(), any::<bool>(), any::<bool>()).prop_map(|(ty, with_required, with_enum)| {
        let mut def = Map::new();
        def.insert("type".to_string(), ty);
        if with_required {
            def.insert("required".to_string(), json!(["id"]));
        }
        if with_enum {
            def.insert("enum".to_string(), json!(["x"]));
        }
        Value::Object(def)
    })
}

fn entries<S>(keys: [&'static str; 5], values: S) -> impl Strategy<Value = Vec<(String, Value)>>
where
    S: Strategy<Value = Value>,
{
    prop::collection::btree_map(prop::sample::select(keys.to_vec()), values, 0..5)
        .prop_map(|m| m.into_iter().map(|(k, v)| (k.to_string(), v)).collect())
}

fn document(defs: &[(String, Value)], properties: &[(String, Value)]) -> Value {
    let defs: Map<String, Value> = defs.iter().cloned().collect();
    let properties: Map<String, Value> = properties.iter().cloned().collect();
    json!({
        "$schema": "https://schemas.vasters.com/experimental/json-schema-core/v0",
        "$id": "https://example.com/schema/generated",
        "name": "Generated",
        "type": "object",
        "properties": properties,
        "$defs": defs
    })
}

fn sorted_errors(doc: &Value) -> Vec<String> {
    let source = serde_json::to_string(doc).unwrap();
    let mut errors = validate(doc, &source, false);
    errors.sort();
    errors
}

proptest! {
    /// Validating the same document twice yields identical reports.
    #[test]
    fn validation_is_idempotent(
        defs in entries(NAMES, definition()),
        properties in entries(PROPERTY_NAMES, definition()),
    ) {
        let doc = document(&defs, &properties);
        let source = serde_json::to_string(&doc).unwrap();
        let first = validate(&doc, &source, false);
        let second = validate(&doc, &source, false);
        prop_assert_eq!(first, second);
    }

    /// Reordering `$defs` and `properties` only reorders the report.
    #[test]
    fn validation_ignores_member_order(
        defs in entries(NAMES, definition()),
        properties in entries(PROPERTY_NAMES, definition()),
    ) {
        let forward = document(&defs, &properties);
        let reversed_defs: Vec<_> = defs.iter().rev().cloned().collect();
        let reversed_properties: Vec<_> = properties.iter().rev().cloned().collect();
        let backward = document(&reversed_defs, &reversed_properties);
        prop_assert_eq!(sorted_errors(&forward), sorted_errors(&backward));
    }

    /// Generated documents never crash the validator, cycles included.
    #[test]
    fn validation_terminates(defs in entries(NAMES, definition())) {
        let doc = document(&defs, &[]);
        let errors = sorted_errors(&doc);
        for error in errors {
            prop_assert!(error.starts_with('#'));
        }
    }
}
