//! Recursive removal of null and empty values.
//!
//! Objects and arrays have separate entry points; [`sanitize`] dispatches
//! on the node kind for callers holding an arbitrary [`Value`].

use docpath_util::{is_empty_value, is_null_like};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Options shared by the sanitizer and the null report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SanitizeOptions {
    /// Treat `""` as a real value rather than as null.
    pub keep_empty_strings: bool,
}

/// Sanitize any value.
///
/// Objects go through [`sanitize_object`] and arrays through
/// [`sanitize_array`]. A scalar has no entries to clean and is returned as
/// is.
///
/// # Example
///
/// ```
/// use docpath::{sanitize, SanitizeOptions};
/// use serde_json::json;
///
/// let doc = json!({"a": null, "b": "", "c": {"d": null}, "e": [null, 1]});
/// assert_eq!(sanitize(&doc, SanitizeOptions::default()), json!({"e": [1]}));
///
/// let keep = SanitizeOptions { keep_empty_strings: true };
/// assert_eq!(sanitize(&doc, keep), json!({"b": "", "e": [1]}));
/// ```
pub fn sanitize(doc: &Value, options: SanitizeOptions) -> Value {
    match doc {
        Value::Object(map) => Value::Object(sanitize_object(map, options)),
        Value::Array(items) => Value::Array(sanitize_array(items, options)),
        scalar => scalar.clone(),
    }
}

/// Return a copy of `map` without null-like entries.
///
/// Nested objects and arrays are cleaned first and dropped if nothing is
/// left in them. Key order is preserved.
pub fn sanitize_object(map: &Map<String, Value>, options: SanitizeOptions) -> Map<String, Value> {
    let mut out = Map::new();
    for (key, value) in map {
        if let Some(kept) = sanitize_entry(value, options) {
            out.insert(key.clone(), kept);
        }
    }
    out
}

/// Return a copy of `items` without null-like elements.
///
/// The surviving elements are re-indexed; no holes are left behind.
pub fn sanitize_array(items: &[Value], options: SanitizeOptions) -> Vec<Value> {
    items
        .iter()
        .filter_map(|item| sanitize_entry(item, options))
        .collect()
}

fn sanitize_entry(value: &Value, options: SanitizeOptions) -> Option<Value> {
    let cleaned = match value {
        Value::Object(map) => Value::Object(sanitize_object(map, options)),
        Value::Array(items) => Value::Array(sanitize_array(items, options)),
        Value::String(s) if s.is_empty() && options.keep_empty_strings => return Some(value.clone()),
        leaf if is_null_like(Some(leaf)) => return None,
        leaf => return Some(leaf.clone()),
    };
    (!is_empty_value(&cleaned)).then_some(cleaned)
}
