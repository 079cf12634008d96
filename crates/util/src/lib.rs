//! docpath-util - Value predicates shared by the docpath crates.

pub mod is_empty;

pub use is_empty::{is_empty_value, is_null_like};
