//! Reading and writing document locations by position.
//!
//! A position is a bracketed key path (`a[0][b]`), see
//! [`docpath_key::split_position`]. Writes create missing intermediate
//! containers on the way down; reads never modify the document.

use docpath_key::{split_position, starts_with_integer, to_bracketed};
use serde_json::{Map, Value};

use crate::error::DocumentError;

// ── Navigation helpers ────────────────────────────────────────────────────

fn array_index(segment: &str) -> Result<usize, DocumentError> {
    segment
        .parse()
        .map_err(|_| DocumentError::InvalidIndex(segment.to_owned()))
}

/// How many null slots a single write may add past the end of an array.
pub const MAX_ARRAY_PADDING: usize = 1024;

/// Grow `arr` so that `idx` is addressable. Holes are filled with null.
///
/// Indices more than [`MAX_ARRAY_PADDING`] past the end are rejected.
fn ensure_len(arr: &mut Vec<Value>, idx: usize, segment: &str) -> Result<(), DocumentError> {
    if idx < arr.len() {
        return Ok(());
    }
    let padding = idx - arr.len();
    if padding > MAX_ARRAY_PADDING {
        return Err(DocumentError::InvalidIndex(segment.to_owned()));
    }
    if padding > 0 {
        tracing::trace!(len = arr.len(), idx, "padding array with nulls");
    }
    let new_len = idx
        .checked_add(1)
        .ok_or_else(|| DocumentError::InvalidIndex(segment.to_owned()))?;
    arr.resize(new_len, Value::Null);
    Ok(())
}

/// Return the child of `current` under `segment`, creating it if unset.
///
/// A fresh child is an array when `next` starts like an integer and an
/// object otherwise. Existing containers are never replaced; a null slot
/// counts as unset.
fn child_or_insert<'a>(
    current: &'a mut Value,
    segment: &str,
    next: &str,
) -> Result<&'a mut Value, DocumentError> {
    let slot = match current {
        Value::Object(map) => map.entry(segment.to_owned()).or_insert(Value::Null),
        Value::Array(arr) => {
            let idx = array_index(segment)?;
            ensure_len(arr, idx, segment)?;
            &mut arr[idx]
        }
        _ => return Err(DocumentError::NotContainer(segment.to_owned())),
    };
    if slot.is_null() {
        *slot = if starts_with_integer(next) {
            Value::Array(Vec::new())
        } else {
            Value::Object(Map::new())
        };
    }
    Ok(slot)
}

fn assign(target: &mut Value, key: &str, value: Value) -> Result<(), DocumentError> {
    match target {
        Value::Object(map) => {
            map.insert(key.to_owned(), value);
            Ok(())
        }
        Value::Array(arr) => {
            let idx = array_index(key)?;
            ensure_len(arr, idx, key)?;
            arr[idx] = value;
            Ok(())
        }
        _ => Err(DocumentError::NotContainer(key.to_owned())),
    }
}

/// Remove `key` from `target`.
///
/// Removing the last array element shortens the array; removing any other
/// element leaves a null in its place so sibling indices stay put.
fn remove(target: &mut Value, key: &str) -> Result<Option<Value>, DocumentError> {
    match target {
        Value::Object(map) => Ok(map.shift_remove(key)),
        Value::Array(arr) => {
            let idx = array_index(key)?;
            if idx >= arr.len() {
                Ok(None)
            } else if idx == arr.len() - 1 {
                Ok(arr.pop())
            } else {
                Ok(Some(std::mem::replace(&mut arr[idx], Value::Null)))
            }
        }
        _ => Err(DocumentError::NotContainer(key.to_owned())),
    }
}

// ── Public API ────────────────────────────────────────────────────────────

/// Set or remove the value at `position` inside `container`.
///
/// Missing intermediate containers are created: an array when the segment
/// after them starts like an integer, an object otherwise. The final
/// segment is always overwritten with `Some(value)`; `None` removes it.
/// Segments are taken literally once split, so `a[b.0.c]` writes the key
/// `"b.0.c"` of `a`.
///
/// # Errors
///
/// - `DocumentError::KeyPath` - the position has unbalanced brackets
/// - `DocumentError::NotContainer` - a segment descends into a scalar
/// - `DocumentError::InvalidIndex` - a non-numeric segment addresses an
///   array, or an index lies more than [`MAX_ARRAY_PADDING`] past its end
///
/// # Example
///
/// ```
/// use docpath::set_at_path;
/// use serde_json::json;
///
/// let mut doc = json!({});
/// set_at_path(&mut doc, "a[b][0]", Some(json!(1))).unwrap();
/// assert_eq!(doc, json!({"a": {"b": [1]}}));
///
/// set_at_path(&mut doc, "a[b]", None).unwrap();
/// assert_eq!(doc, json!({"a": {}}));
/// ```
pub fn set_at_path(
    container: &mut Value,
    position: &str,
    value: Option<Value>,
) -> Result<(), DocumentError> {
    let segments = split_position(position)?;
    let Some((last, parents)) = segments.split_last() else {
        return Ok(());
    };

    let mut current = container;
    for (i, segment) in parents.iter().enumerate() {
        current = child_or_insert(current, segment, segments[i + 1])?;
    }

    match value {
        Some(value) => assign(current, last, value),
        None => remove(current, last).map(|_| ()),
    }
}

/// Get the value at `position`, or `None` if nothing is there.
///
/// # Errors
///
/// Returns `DocumentError::KeyPath` if the position has unbalanced brackets.
///
/// # Example
///
/// ```
/// use docpath::get_at_path;
/// use serde_json::json;
///
/// let doc = json!({"a": {"b": [10, 20]}});
/// assert_eq!(get_at_path(&doc, "a[b][1]").unwrap(), Some(&json!(20)));
/// assert_eq!(get_at_path(&doc, "a[c]").unwrap(), None);
/// ```
pub fn get_at_path<'a>(doc: &'a Value, position: &str) -> Result<Option<&'a Value>, DocumentError> {
    let mut current = doc;
    for segment in split_position(position)? {
        let next = match current {
            Value::Object(map) => map.get(segment),
            Value::Array(arr) => segment.parse::<usize>().ok().and_then(|idx| arr.get(idx)),
            _ => None,
        };
        match next {
            Some(value) => current = value,
            None => return Ok(None),
        }
    }
    Ok(Some(current))
}

/// [`get_at_path`] addressed by a dotted key.
pub fn get_at_key<'a>(doc: &'a Value, key: &str) -> Result<Option<&'a Value>, DocumentError> {
    get_at_path(doc, &to_bracketed(key, false))
}

/// [`set_at_path`] addressed by a dotted key.
pub fn set_at_key(doc: &mut Value, key: &str, value: Option<Value>) -> Result<(), DocumentError> {
    set_at_path(doc, &to_bracketed(key, false), value)
}
