use serde_json::Value;

/// Check if a value is empty.
///
/// Null, the empty string, and arrays or objects without entries are
/// empty. Booleans and numbers never are.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use docpath_util::is_empty::is_empty_value;
///
/// assert!(is_empty_value(&json!(null)));
/// assert!(is_empty_value(&json!([])));
/// assert!(is_empty_value(&json!({})));
/// assert!(!is_empty_value(&json!(0)));
/// ```
pub fn is_empty_value(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        Value::Array(arr) => arr.is_empty(),
        Value::Object(map) => map.is_empty(),
        Value::Bool(_) | Value::Number(_) => false,
    }
}

/// Check if a slot holds nothing worth keeping: it is absent, null, or the
/// empty string.
///
/// Empty arrays and objects are not null-like; whether they survive is
/// decided after their entries have been cleaned.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use docpath_util::is_empty::is_null_like;
///
/// assert!(is_null_like(None));
/// assert!(is_null_like(Some(&json!(""))));
/// assert!(!is_null_like(Some(&json!([]))));
/// ```
pub fn is_null_like(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.is_empty(),
        Some(_) => false,
    }
}
