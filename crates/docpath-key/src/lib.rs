//! Key path algebra for nested documents.
//!
//! Three spellings of a location are supported:
//!
//! - a *specific key* in dotted form, naming one location in one document
//!   (`a.0.b`),
//! - the same key as a bracketed *position* (`a[0][b]`),
//! - a *generic key*, where array indices and positional operators are
//!   collapsed to `$` so that one key names a whole class of locations
//!   (`a.$.b`).
//!
//! # Example
//!
//! ```
//! use docpath_key::{implies_key, to_bracketed, to_dotted, to_generic};
//!
//! let position = to_bracketed("a.0.b", false);
//! assert_eq!(position, "a[0][b]");
//! assert_eq!(to_dotted(&position).unwrap(), "a.0.b");
//!
//! assert_eq!(to_generic("a.0.b"), "a.$.b");
//! assert!(implies_key("a", "a.0.b"));
//! ```

use regex::Regex;
use serde_json::Value;
use std::sync::OnceLock;
use thiserror::Error;

pub mod validate;
pub use validate::{split_position, validate_position};

/// Batch operator segment. It modifies how its parent is updated and never
/// becomes part of a key.
pub const EACH_OPERATOR: &str = "$each";

/// Segment standing in for any array element in a generic key.
pub const GENERIC_SEGMENT: &str = "$";

/// Convert a dotted key into a bracketed position.
///
/// Every segment after the first is wrapped in `[...]`. With `wrap_first`
/// the first segment is wrapped as well, which is the form used when the
/// position is appended to an operator (`$set[a][b]`).
///
/// # Example
///
/// ```
/// use docpath_key::to_bracketed;
///
/// assert_eq!(to_bracketed("a.0.b", false), "a[0][b]");
/// assert_eq!(to_bracketed("a.0.b", true), "[a][0][b]");
/// assert_eq!(to_bracketed("a", false), "a");
/// ```
pub fn to_bracketed(key: &str, wrap_first: bool) -> String {
    let mut position = String::with_capacity(key.len() + 8);
    for (i, piece) in key.split('.').enumerate() {
        if i == 0 && !wrap_first {
            position.push_str(piece);
        } else {
            position.push('[');
            position.push_str(piece);
            position.push(']');
        }
    }
    position
}

/// Convert a bracketed position back into a dotted key.
///
/// # Errors
///
/// Returns [`KeyPathError::UnbalancedBrackets`] if the position is not
/// well formed.
///
/// # Example
///
/// ```
/// use docpath_key::to_dotted;
///
/// assert_eq!(to_dotted("a[0][b]").unwrap(), "a.0.b");
/// assert_eq!(to_dotted("[a][b]").unwrap(), "a.b");
/// assert!(to_dotted("a[0").is_err());
/// ```
pub fn to_dotted(position: &str) -> Result<String, KeyPathError> {
    Ok(split_position(position)?.join("."))
}

fn generic_segment_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\.([0-9]+|\$\[[^\]]*\])").unwrap())
}

/// Derive the generic key from a specific key.
///
/// Each segment after the first that is an array index (`.0`) or a
/// positional operator (`.$[id]`, `.$[]`) is replaced with `.$`. Segments
/// only count when they are followed by `.` or the end of the key, so
/// `a.0x` is left alone. The function is idempotent.
///
/// # Example
///
/// ```
/// use docpath_key::to_generic;
///
/// assert_eq!(to_generic("a.0.b"), "a.$.b");
/// assert_eq!(to_generic("a.0.1.b"), "a.$.$.b");
/// assert_eq!(to_generic("a.$[elem].b"), "a.$.b");
/// assert_eq!(to_generic("a.$.b"), "a.$.b");
/// ```
pub fn to_generic(key: &str) -> String {
    let re = generic_segment_regex();
    let bytes = key.as_bytes();
    let mut generic = String::with_capacity(key.len());
    let mut copied = 0;
    let mut start = 0;
    // The regex crate has no lookahead, so the "followed by `.` or end"
    // condition is checked by hand. A rejected match resumes one byte in.
    while let Some(m) = re.find_at(key, start) {
        let end = m.end();
        if end == key.len() || bytes[end] == b'.' {
            generic.push_str(&key[copied..m.start()]);
            generic.push('.');
            generic.push_str(GENERIC_SEGMENT);
            copied = end;
            start = end;
        } else {
            start = m.start() + 1;
        }
    }
    generic.push_str(&key[copied..]);
    generic
}

/// [`to_generic`] for untyped input: anything but a string yields `None`.
///
/// # Example
///
/// ```
/// use docpath_key::to_generic_value;
/// use serde_json::json;
///
/// assert_eq!(to_generic_value(&json!("a.1")), Some("a.$".to_string()));
/// assert_eq!(to_generic_value(&json!(1)), None);
/// ```
pub fn to_generic_value(key: &Value) -> Option<String> {
    key.as_str().map(to_generic)
}

/// Append one segment to a key.
///
/// [`EACH_OPERATOR`] is skipped and `base` comes back unchanged. A missing
/// or empty `base` yields the segment on its own.
///
/// # Example
///
/// ```
/// use docpath_key::append_segment;
///
/// assert_eq!(append_segment(Some("a"), "b").as_deref(), Some("a.b"));
/// assert_eq!(append_segment(Some("a"), "$each").as_deref(), Some("a"));
/// assert_eq!(append_segment(None, "b").as_deref(), Some("b"));
/// ```
pub fn append_segment(base: Option<&str>, segment: &str) -> Option<String> {
    if segment == EACH_OPERATOR {
        return base.map(str::to_owned);
    }
    match base {
        Some(base) if !base.is_empty() => {
            let mut key = String::with_capacity(base.len() + segment.len() + 1);
            key.push_str(base);
            key.push('.');
            key.push_str(segment);
            Some(key)
        }
        _ => Some(segment.to_owned()),
    }
}

/// Return the leading operator of a position, if there is one.
///
/// The head of the position (everything before the first `[`) is returned
/// when it starts with `$`.
///
/// # Errors
///
/// Returns [`KeyPathError::MissingBracket`] if the position has no `[`.
///
/// # Example
///
/// ```
/// use docpath_key::extract_leading_operator;
///
/// assert_eq!(extract_leading_operator("$set[a][b]").unwrap(), Some("$set"));
/// assert_eq!(extract_leading_operator("a[b]").unwrap(), None);
/// assert!(extract_leading_operator("$set").is_err());
/// ```
pub fn extract_leading_operator(position: &str) -> Result<Option<&str>, KeyPathError> {
    let idx = position
        .find('[')
        .ok_or_else(|| KeyPathError::MissingBracket(position.to_owned()))?;
    let head = &position[..idx];
    Ok(is_operator(head).then_some(head))
}

/// Check whether a change to `affected` implies a change to `candidate`.
///
/// That holds when the keys are equal, when `affected` lies below
/// `candidate`, or when `candidate` names the elements (`.$`) of exactly the
/// array `affected` names. The rules are tried on `affected` as given and
/// again on its generic form, so a generic candidate also covers the
/// specific keys of its class.
///
/// # Example
///
/// ```
/// use docpath_key::implies_key;
///
/// assert!(implies_key("a", "a.b"));
/// assert!(implies_key("a.0", "a.0.b"));
/// assert!(implies_key("a.$", "a.0"));
/// assert!(implies_key("a.$", "a"));
/// assert!(!implies_key("a.b", "a"));
/// assert!(!implies_key("a.0", "a.$"));
/// ```
pub fn implies_key(candidate: &str, affected: &str) -> bool {
    implies_literal(candidate, affected) || implies_literal(candidate, &to_generic(affected))
}

fn implies_literal(candidate: &str, affected: &str) -> bool {
    if affected == candidate {
        return true;
    }
    if affected.len() > candidate.len()
        && affected.starts_with(candidate)
        && affected.as_bytes()[candidate.len()] == b'.'
    {
        return true;
    }
    matches!(candidate.strip_suffix(".$"), Some(prefix) if prefix == affected)
}

/// Check if a segment is a `$`-prefixed operator.
///
/// # Example
///
/// ```
/// use docpath_key::is_operator;
///
/// assert!(is_operator("$set"));
/// assert!(is_operator("$[id]"));
/// assert!(!is_operator("set"));
/// ```
pub fn is_operator(segment: &str) -> bool {
    segment.starts_with('$')
}

/// Check if a segment begins like an integer: optional leading whitespace,
/// an optional sign, then a digit.
///
/// This decides whether a missing intermediate container should be an
/// array (`"0"`, `"12abc"`) or an object (`"b"`, `"$"`).
///
/// # Example
///
/// ```
/// use docpath_key::starts_with_integer;
///
/// assert!(starts_with_integer("0"));
/// assert!(starts_with_integer("-3"));
/// assert!(!starts_with_integer("b"));
/// assert!(!starts_with_integer(""));
/// ```
pub fn starts_with_integer(segment: &str) -> bool {
    let s = segment.trim_start();
    let s = s.strip_prefix(|c: char| c == '+' || c == '-').unwrap_or(s);
    s.bytes().next().is_some_and(|b| b.is_ascii_digit())
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum KeyPathError {
    #[error("UNBALANCED_BRACKETS: {0}")]
    UnbalancedBrackets(String),
    #[error("MISSING_BRACKET: {0}")]
    MissingBracket(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_to_bracketed() {
        assert_eq!(to_bracketed("a", false), "a");
        assert_eq!(to_bracketed("a.b", false), "a[b]");
        assert_eq!(to_bracketed("a.0.b", false), "a[0][b]");

        // Wrapped first segment
        assert_eq!(to_bracketed("a", true), "[a]");
        assert_eq!(to_bracketed("a.0", true), "[a][0]");

        // Empty segments are kept
        assert_eq!(to_bracketed("a..b", false), "a[][b]");
    }

    #[test]
    fn test_to_dotted() {
        assert_eq!(to_dotted("a").unwrap(), "a");
        assert_eq!(to_dotted("a[b]").unwrap(), "a.b");
        assert_eq!(to_dotted("a[0][b]").unwrap(), "a.0.b");
        assert_eq!(to_dotted("[a][0]").unwrap(), "a.0");
    }

    #[test]
    fn test_to_dotted_malformed() {
        assert_eq!(
            to_dotted("a[b"),
            Err(KeyPathError::UnbalancedBrackets("a[b".to_string()))
        );
        assert!(to_dotted("a]b").is_err());
    }

    #[test]
    fn test_to_generic() {
        assert_eq!(to_generic("a"), "a");
        assert_eq!(to_generic("a.b"), "a.b");
        assert_eq!(to_generic("a.0"), "a.$");
        assert_eq!(to_generic("a.0.b"), "a.$.b");
        assert_eq!(to_generic("a.10.b.2"), "a.$.b.$");

        // Adjacent array levels
        assert_eq!(to_generic("a.0.1.b"), "a.$.$.b");
        assert_eq!(to_generic("a.0.1.2"), "a.$.$.$");
    }

    #[test]
    fn test_to_generic_positional_operators() {
        assert_eq!(to_generic("a.$[elem].b"), "a.$.b");
        assert_eq!(to_generic("a.$[].b"), "a.$.b");
        assert_eq!(to_generic("a.$[x].$[y]"), "a.$.$");
    }

    #[test]
    fn test_to_generic_leaves_other_segments() {
        // Leading numeric segment has no dot before it
        assert_eq!(to_generic("0.a"), "0.a");
        // Digits followed by something other than a dot
        assert_eq!(to_generic("a.0x.b"), "a.0x.b");
        assert_eq!(to_generic("a.1b2.3"), "a.1b2.$");
        // Operator-like but not positional
        assert_eq!(to_generic("a.$set.b"), "a.$set.b");
    }

    #[test]
    fn test_to_generic_idempotent() {
        for key in ["a.0.b", "a.$[id].0", "a.$.b", "x.1.2.y.3"] {
            let once = to_generic(key);
            assert_eq!(to_generic(&once), once, "not idempotent for {:?}", key);
        }
    }

    #[test]
    fn test_to_generic_value() {
        assert_eq!(to_generic_value(&json!("a.0")), Some("a.$".to_string()));
        assert_eq!(to_generic_value(&json!(null)), None);
        assert_eq!(to_generic_value(&json!(["a.0"])), None);
        assert_eq!(to_generic_value(&json!({"a": 1})), None);
    }

    #[test]
    fn test_append_segment() {
        assert_eq!(append_segment(Some("a"), "b"), Some("a.b".to_string()));
        assert_eq!(append_segment(Some("a.b"), "0"), Some("a.b.0".to_string()));
        assert_eq!(append_segment(None, "b"), Some("b".to_string()));
        assert_eq!(append_segment(Some(""), "b"), Some("b".to_string()));

        // $each never becomes part of the key
        assert_eq!(append_segment(Some("a"), "$each"), Some("a".to_string()));
        assert_eq!(append_segment(None, "$each"), None);
    }

    #[test]
    fn test_extract_leading_operator() {
        assert_eq!(extract_leading_operator("$push[a]"), Ok(Some("$push")));
        assert_eq!(extract_leading_operator("$set[a][0]"), Ok(Some("$set")));
        assert_eq!(extract_leading_operator("a[b]"), Ok(None));
        assert_eq!(extract_leading_operator("[a]"), Ok(None));
        assert_eq!(
            extract_leading_operator("$set"),
            Err(KeyPathError::MissingBracket("$set".to_string()))
        );
    }

    #[test]
    fn test_implies_key() {
        // Self
        assert!(implies_key("a", "a"));
        assert!(implies_key("a.$.b", "a.$.b"));

        // Ancestor
        assert!(implies_key("a", "a.b"));
        assert!(implies_key("a", "a.b.c"));
        assert!(!implies_key("a.b", "a"));

        // Prefix that is not a whole segment
        assert!(!implies_key("a", "ab"));
        assert!(!implies_key("a", "ab.c"));

        // Array elements
        assert!(implies_key("a.$", "a"));
        assert!(implies_key("a.$", "a.0"));
        assert!(implies_key("a.$.b", "a.3.b"));
        assert!(!implies_key("a.0", "a.$"));
        assert!(!implies_key("a.$.b", "a"));

        // Specific candidates match literally
        assert!(implies_key("a.0", "a.0"));
        assert!(implies_key("a.0", "a.0.b"));
        assert!(implies_key("a.0.b", "a.0.b.1"));
        assert!(!implies_key("a.0", "a.1"));
        assert!(!implies_key("a.0", "a.0b"));
    }

    #[test]
    fn test_is_operator() {
        assert!(is_operator("$set"));
        assert!(is_operator("$"));
        assert!(!is_operator("set"));
        assert!(!is_operator(""));
    }

    #[test]
    fn test_starts_with_integer() {
        assert!(starts_with_integer("0"));
        assert!(starts_with_integer("123"));
        assert!(starts_with_integer(" 4"));
        assert!(starts_with_integer("+4"));
        assert!(starts_with_integer("-1"));
        assert!(starts_with_integer("12abc"));
        assert!(!starts_with_integer(""));
        assert!(!starts_with_integer("-"));
        assert!(!starts_with_integer("abc"));
        assert!(!starts_with_integer("$"));
        assert!(!starts_with_integer("$[id]"));
    }
}
