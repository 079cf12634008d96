//! Splitting and validation of bracketed positions.

use crate::KeyPathError;

/// Split a bracketed position into its segments.
///
/// The position is split on `[`. Every segment after the first must end
/// with `]` and may not contain another `]`. The head (everything before
/// the first `[`) is taken literally, so mixed forms such as `a.b[c]` yield
/// `["a.b", "c"]`. A position that starts with `[` has a wrapped first
/// segment and no head.
///
/// # Errors
///
/// Returns [`KeyPathError::UnbalancedBrackets`] for a missing or stray `]`.
///
/// # Example
///
/// ```
/// use docpath_key::split_position;
///
/// assert_eq!(split_position("a[0][b]").unwrap(), vec!["a", "0", "b"]);
/// assert_eq!(split_position("[a][b]").unwrap(), vec!["a", "b"]);
/// assert_eq!(split_position("a[b.0.c]").unwrap(), vec!["a", "b.0.c"]);
/// assert!(split_position("a[b").is_err());
/// ```
pub fn split_position(position: &str) -> Result<Vec<&str>, KeyPathError> {
    let unbalanced = || KeyPathError::UnbalancedBrackets(position.to_owned());

    let (head, rest) = match position.find('[') {
        Some(idx) => (&position[..idx], &position[idx..]),
        None => (position, ""),
    };
    if head.contains(']') {
        return Err(unbalanced());
    }

    let mut segments = Vec::new();
    if !head.is_empty() || rest.is_empty() {
        segments.push(head);
    }
    for piece in rest.split('[').skip(1) {
        let segment = piece.strip_suffix(']').ok_or_else(unbalanced)?;
        if segment.contains(']') {
            return Err(unbalanced());
        }
        segments.push(segment);
    }
    Ok(segments)
}

/// Validate a bracketed position.
///
/// # Errors
///
/// Returns [`KeyPathError::UnbalancedBrackets`] if [`split_position`] would
/// reject the position.
///
/// # Example
///
/// ```
/// use docpath_key::validate_position;
///
/// validate_position("a[0][b]").unwrap();
/// validate_position("a").unwrap();
/// validate_position("a[0]b").unwrap_err();
/// ```
pub fn validate_position(position: &str) -> Result<(), KeyPathError> {
    split_position(position).map(|_| ())
}
