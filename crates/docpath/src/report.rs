//! Null reports: flat maps naming the keys that hold nothing.
//!
//! Every reported key maps to the empty string, the shape an `$unset`
//! style instruction expects.

use serde_json::{Map, Value};

use crate::flatten::{flatten, FlattenOptions};
use crate::sanitize::{sanitize_array, SanitizeOptions};

fn is_reportable(value: &Value, options: SanitizeOptions) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty() && !options.keep_empty_strings,
        Value::Array(items) => sanitize_array(items, options).is_empty(),
        Value::Bool(_) | Value::Number(_) | Value::Object(_) => false,
    }
}

/// Report the keys of a flat map whose values are null-like.
///
/// A key is reported when its value is null, the empty string (unless
/// `keep_empty_strings` is set), or an array that is empty once sanitized.
/// Objects are expected to have been flattened away by the caller and are
/// never reported.
///
/// # Example
///
/// ```
/// use docpath::{report_nulls, SanitizeOptions};
/// use serde_json::json;
///
/// let flat = json!({"a": null, "b": "x", "c": [], "d": [null, ""]});
/// let nulls = report_nulls(flat.as_object().unwrap(), SanitizeOptions::default());
/// assert_eq!(serde_json::Value::Object(nulls), json!({"a": "", "c": "", "d": ""}));
/// ```
pub fn report_nulls(flat: &Map<String, Value>, options: SanitizeOptions) -> Map<String, Value> {
    flat.iter()
        .filter(|(_, value)| is_reportable(value, options))
        .map(|(key, _)| (key.clone(), Value::String(String::new())))
        .collect()
}

/// Flatten `doc` (keeping arrays whole) and report its null-like keys.
pub fn report_document_nulls(doc: &Value, options: SanitizeOptions) -> Map<String, Value> {
    let flat = flatten(doc, FlattenOptions { keep_arrays: true });
    report_nulls(&flat, options)
}
