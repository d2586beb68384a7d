//! # Offers Registry
//!
//! `$offers` names extension points. Each entry maps an identifier to one
//! pointer, or to an array of pointers, naming the types that may be used
//! there. Every pointer must resolve inside the document.

use serde_json::{Map, Value};

use jscs_core::{json_kind, Location, SchemaError};

use crate::context::Context;
use crate::names::is_identifier;

pub(crate) fn check(ctx: &mut Context<'_>, node: &Map<String, Value>, location: &Location) {
    let Some(offers) = node.get("$offers") else {
        return;
    };
    let location = location.key("$offers");
    let Some(offers) = offers.as_object() else {
        ctx.report(
            &location,
            SchemaError::OffersNotObject {
                found: json_kind(offers),
            },
        );
        return;
    };

    for (key, targets) in offers {
        let entry_location = location.key(key);
        // Non-string keys only survive serialization as digit strings.
        if !is_identifier(key) {
            ctx.report(&entry_location, SchemaError::OffersKeyNotString { key: key.clone() });
        }
        match targets {
            Value::String(pointer) => check_target(ctx, pointer, &entry_location),
            Value::Array(pointers) => {
                for (index, pointer) in pointers.iter().enumerate() {
                    let item_location = entry_location.index(index);
                    match pointer.as_str() {
                        Some(pointer) => check_target(ctx, pointer, &item_location),
                        None => ctx.report(
                            &item_location,
                            SchemaError::OffersValueNotString {
                                key: key.clone(),
                                found: json_kind(pointer),
                            },
                        ),
                    }
                }
            }
            other => ctx.report(
                &entry_location,
                SchemaError::OffersValueNotString {
                    key: key.clone(),
                    found: json_kind(other),
                },
            ),
        }
    }
}

fn check_target(ctx: &mut Context<'_>, pointer: &str, location: &Location) {
    if let Err(e) = ctx.resolve(pointer) {
        ctx.report(location, e);
    }
}

#[cfg(test)]
mod tests {
    use crate::validate::validate;
    use serde_json::{json, Value};

    fn run(offers: Value) -> Vec<String> {
        let doc = json!({
            "$schema": "https://schemas.vasters.com/experimental/json-schema-core/v0",
            "$id": "https://example.com/schema/offers",
            "name": "Offers",
            "type": "any",
            "$offers": offers,
            "$defs": {
                "OfferType": {"name": "OfferType", "type": "string"},
                "OtherOffer": {"name": "OtherOffer", "type": "int32"}
            }
        });
        validate(&doc, &serde_json::to_string(&doc).unwrap(), false)
    }

    #[test]
    fn test_single_pointer_offer() {
        assert!(run(json!({"CustomOffer": "#/$defs/OfferType"})).is_empty());
    }

    #[test]
    fn test_pointer_list_offer() {
        assert!(run(json!({"Many": ["#/$defs/OfferType", "#/$defs/OtherOffer"]})).is_empty());
    }

    #[test]
    fn test_offers_not_object() {
        let errors = run(json!("should be an object"));
        assert_eq!(errors.len(), 1);
        assert!(errors[0].starts_with("#/$offers: "));
    }

    #[test]
    fn test_numeric_key_rejected() {
        let errors = run(json!({"123": "#/$defs/OfferType"}));
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("'123'"));
    }

    #[test]
    fn test_list_with_non_string() {
        let errors = run(json!({"OfferKey": ["#/$defs/OfferType", 123]}));
        assert_eq!(errors.len(), 1);
        assert!(errors[0].starts_with("#/$offers/OfferKey/1: "));
    }

    #[test]
    fn test_value_of_wrong_kind() {
        let errors = run(json!({"OfferKey": {"$ref": "#/$defs/OfferType"}}));
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn test_unresolved_and_malformed_targets() {
        let errors = run(json!({"A": "#/$defs/Missing", "B": ["nohash"]}));
        assert_eq!(errors.len(), 2);
        assert!(errors[0].contains("does not resolve"));
        assert!(errors[1].contains("malformed pointer"));
    }
}
