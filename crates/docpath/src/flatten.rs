//! Conversion between nested documents and flat key/value maps.

use docpath_key::{append_segment, to_bracketed};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::document::set_at_path;

/// Options for [`flatten`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FlattenOptions {
    /// Keep arrays as values instead of descending into their elements.
    pub keep_arrays: bool,
}

/// Flatten a document into a map from dotted key to leaf value.
///
/// Keys appear in document order. Scalars, empty objects and empty arrays
/// are leaves; so are non-empty arrays when `keep_arrays` is set. `$each`
/// levels do not contribute a segment to the key. A scalar root has no key
/// and yields an empty map.
///
/// # Example
///
/// ```
/// use docpath::{flatten, FlattenOptions};
/// use serde_json::json;
///
/// let doc = json!({"a": {"b": [1, 2]}, "c": {}});
/// let flat = flatten(&doc, FlattenOptions::default());
/// assert_eq!(serde_json::Value::Object(flat), json!({"a.b.0": 1, "a.b.1": 2, "c": {}}));
///
/// let flat = flatten(&doc, FlattenOptions { keep_arrays: true });
/// assert_eq!(serde_json::Value::Object(flat), json!({"a.b": [1, 2], "c": {}}));
/// ```
pub fn flatten(doc: &Value, options: FlattenOptions) -> Map<String, Value> {
    let mut flat = Map::new();
    flatten_into(doc, None, options, &mut flat);
    flat
}

fn flatten_into(value: &Value, key: Option<String>, options: FlattenOptions, flat: &mut Map<String, Value>) {
    match value {
        Value::Object(map) if !map.is_empty() => {
            for (k, v) in map {
                flatten_into(v, append_segment(key.as_deref(), k), options, flat);
            }
        }
        Value::Array(arr) if !arr.is_empty() && !options.keep_arrays => {
            for (i, v) in arr.iter().enumerate() {
                flatten_into(v, append_segment(key.as_deref(), &i.to_string()), options, flat);
            }
        }
        _ => {
            if let Some(key) = key {
                flat.insert(key, value.clone());
            }
        }
    }
}

/// Rebuild a nested document from a flat map of dotted keys.
///
/// Entries are applied in order with [`set_at_path`]. An entry that would
/// have to descend into a value an earlier entry already set as a scalar is
/// skipped.
///
/// # Example
///
/// ```
/// use docpath::expand;
/// use serde_json::json;
///
/// let flat = json!({"a.0.b": 1, "a.1.b": 2, "c": "x"});
/// let doc = expand(flat.as_object().unwrap());
/// assert_eq!(doc, json!({"a": [{"b": 1}, {"b": 2}], "c": "x"}));
/// ```
pub fn expand(flat: &Map<String, Value>) -> Value {
    let mut doc = Value::Object(Map::new());
    for (key, value) in flat {
        let position = to_bracketed(key, false);
        if let Err(err) = set_at_path(&mut doc, &position, Some(value.clone())) {
            tracing::debug!(%key, %err, "skipping key that cannot be placed");
        }
    }
    doc
}
