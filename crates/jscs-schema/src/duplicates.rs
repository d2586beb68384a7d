//! # Duplicate Key Detection
//!
//! A parsed `serde_json::Value` keeps only the last occurrence of a repeated
//! key, so duplicates can only be found in the source text. This module
//! re-reads the source with a streaming serde visitor that records the keys
//! of every object as it goes, without building a tree.
//!
//! Keys are compared after JSON unescaping, so `"\u0061"` and `"a"` collide.

use std::collections::HashSet;
use std::fmt;

use serde::de::{self, DeserializeSeed, Deserializer, MapAccess, SeqAccess, Visitor};

use jscs_core::Location;

/// A key repeated inside one JSON object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuplicateKey {
    /// Pointer to the object holding the repeated key.
    pub location: Location,
    /// The repeated key.
    pub key: String,
}

/// Scan `source` for repeated keys.
///
/// Each repetition is reported once per extra occurrence, in source order.
///
/// # Errors
///
/// Returns the parser error if `source` is not a single valid JSON value.
pub fn find_duplicate_keys(source: &str) -> Result<Vec<DuplicateKey>, serde_json::Error> {
    let mut found = Vec::new();
    let mut deserializer = serde_json::Deserializer::from_str(source);
    KeyScan {
        location: Location::root(),
        found: &mut found,
    }
    .deserialize(&mut deserializer)?;
    deserializer.end()?;
    Ok(found)
}

struct KeyScan<'a> {
    location: Location,
    found: &'a mut Vec<DuplicateKey>,
}

impl<'de> DeserializeSeed<'de> for KeyScan<'_> {
    type Value = ();

    fn deserialize<D>(self, deserializer: D) -> Result<(), D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(self)
    }
}

impl<'de> Visitor<'de> for KeyScan<'_> {
    type Value = ();

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a JSON value")
    }

    fn visit_bool<E: de::Error>(self, _: bool) -> Result<(), E> {
        Ok(())
    }

    fn visit_i64<E: de::Error>(self, _: i64) -> Result<(), E> {
        Ok(())
    }

    fn visit_u64<E: de::Error>(self, _: u64) -> Result<(), E> {
        Ok(())
    }

    fn visit_f64<E: de::Error>(self, _: f64) -> Result<(), E> {
        Ok(())
    }

    fn visit_str<E: de::Error>(self, _: &str) -> Result<(), E> {
        Ok(())
    }

    fn visit_unit<E: de::Error>(self) -> Result<(), E> {
        Ok(())
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<(), A::Error>
    where
        A: SeqAccess<'de>,
    {
        let KeyScan { location, found } = self;
        let mut index = 0;
        while seq
            .next_element_seed(KeyScan {
                location: location.index(index),
                found: &mut *found,
            })?
            .is_some()
        {
            index += 1;
        }
        Ok(())
    }

    fn visit_map<A>(self, mut map: A) -> Result<(), A::Error>
    where
        A: MapAccess<'de>,
    {
        let KeyScan { location, found } = self;
        let mut seen = HashSet::new();
        while let Some(key) = map.next_key::<String>()? {
            map.next_value_seed(KeyScan {
                location: location.key(&key),
                found: &mut *found,
            })?;
            if !seen.insert(key.clone()) {
                found.push(DuplicateKey {
                    location: location.clone(),
                    key,
                });
            }
        }
        Ok(())
    }
}
