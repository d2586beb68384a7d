//! # Intra-Document Pointers
//!
//! Resolves `#/seg1/seg2/...` pointers against the document root and
//! tracks the [`Location`] of the node under validation.
//!
//! Resolution is always relative to the root, never to the node holding
//! the reference. Segments are percent-decoded first, then tilde-unescaped
//! (`~1` -> `/`, `~0` -> `~`), so `#/$defs/a~1b` names the key `a/b`.

use std::borrow::Cow;
use std::fmt;

use percent_encoding::percent_decode_str;
use serde_json::Value;

use crate::error::PointerError;

/// Resolve `pointer` against `root`.
///
/// # Errors
///
/// Returns [`PointerError::Malformed`] when the pointer is not `#` or
/// `#/...`, and [`PointerError::Unresolved`] when any segment fails to
/// index into the tree.
pub fn resolve<'a>(pointer: &str, root: &'a Value) -> Result<&'a Value, PointerError> {
    let Some(fragment) = pointer.strip_prefix('#') else {
        return Err(PointerError::Malformed(pointer.to_string()));
    };
    if fragment.is_empty() {
        return Ok(root);
    }
    if !fragment.starts_with('/') {
        return Err(PointerError::Malformed(pointer.to_string()));
    }
    fragment
        .split('/')
        .skip(1)
        .map(unescape_segment)
        .try_fold(root, |target, token| match target {
            Value::Object(map) => map.get(&*token),
            Value::Array(list) => parse_index(&token).and_then(|i| list.get(i)),
            _ => None,
        })
        .ok_or_else(|| PointerError::Unresolved(pointer.to_string()))
}

/// Decode one pointer segment.
pub fn unescape_segment(segment: &str) -> Cow<'_, str> {
    let decoded = percent_decode_str(segment).decode_utf8_lossy();
    if !decoded.contains('~') {
        return decoded;
    }
    Cow::Owned(decoded.replace("~1", "/").replace("~0", "~"))
}

/// Escape a key for use as a pointer segment.
pub fn escape_segment(key: &str) -> Cow<'_, str> {
    if key.contains(['~', '/', '%']) {
        Cow::Owned(
            key.replace('%', "%25")
                .replace('~', "~0")
                .replace('/', "~1"),
        )
    } else {
        Cow::Borrowed(key)
    }
}

// Array indices follow RFC 6901: no sign, no leading zeros.
fn parse_index(s: &str) -> Option<usize> {
    if s.starts_with('+') || (s.starts_with('0') && s.len() != 1) {
        return None;
    }
    s.parse().ok()
}

/// JSON Pointer path of the node currently being validated.
///
/// Rendered as `#` for the root and `#/properties/name` below it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Location(String);

impl Location {
    /// The document root.
    pub fn root() -> Self {
        Self::default()
    }

    /// Child location under an object key.
    pub fn key(&self, key: &str) -> Self {
        Self(format!("{}/{}", self.0, escape_segment(key)))
    }

    /// Child location under an array index.
    pub fn index(&self, index: usize) -> Self {
        Self(format!("{}/{index}", self.0))
    }

    /// The location as a resolvable pointer string.
    pub fn to_pointer(&self) -> String {
        format!("#{}", self.0)
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}
