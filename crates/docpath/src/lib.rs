//! docpath - rebuild, clean and report on nested documents addressed by
//! key paths.
//!
//! Documents are `serde_json::Value` trees with insertion-ordered objects.
//! Locations are named with the key path forms from [`docpath_key`]:
//! dotted keys (`a.0.b`), bracketed positions (`a[0][b]`) and generic keys
//! (`a.$.b`).
//!
//! # Example
//!
//! ```
//! use docpath::{report_nulls, sanitize, set_at_path, SanitizeOptions};
//! use serde_json::json;
//!
//! let mut doc = json!({});
//! set_at_path(&mut doc, "a[b][0]", Some(json!(1))).unwrap();
//! assert_eq!(doc, json!({"a": {"b": [1]}}));
//!
//! let cleaned = sanitize(&json!({"a": null, "e": [null, 1]}), SanitizeOptions::default());
//! assert_eq!(cleaned, json!({"e": [1]}));
//!
//! let flat = json!({"a": null, "b": "x", "c": []});
//! let nulls = report_nulls(flat.as_object().unwrap(), SanitizeOptions::default());
//! assert_eq!(serde_json::Value::Object(nulls), json!({"a": "", "c": ""}));
//! ```

pub mod document;
pub mod error;
pub mod flatten;
pub mod report;
pub mod sanitize;

pub use docpath_key as key;

pub use document::{get_at_key, get_at_path, set_at_key, set_at_path, MAX_ARRAY_PADDING};
pub use error::DocumentError;
pub use flatten::{expand, flatten, FlattenOptions};
pub use report::{report_document_nulls, report_nulls};
pub use sanitize::{sanitize, sanitize_array, sanitize_object, SanitizeOptions};
