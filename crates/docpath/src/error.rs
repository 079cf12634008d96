//! Errors raised while walking or building documents.

use docpath_key::KeyPathError;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DocumentError {
    #[error(transparent)]
    KeyPath(#[from] KeyPathError),
    /// A segment addresses a child of a scalar.
    #[error("NOT_CONTAINER: {0}")]
    NotContainer(String),
    /// A segment addressing an array element is not an index.
    #[error("INVALID_INDEX: {0}")]
    InvalidIndex(String),
}
