//! Core types for docassert
//!
//! This crate holds the pieces every other layer builds on:
//!
//! - [`Path`]: ordered property/index steps locating a value in a document
//! - [`Value`]: the generic document value tree
//! - [`resolve`]: walks a path through a value tree
//! - [`PathError`] and [`ResolveError`]: what can go wrong doing so
//!
//! ## Example
//!
//! ```
//! use docassert_core::{path, resolve, Path, Value};
//!
//! let doc = Value::from(serde_json::json!({"items": [{"id": 7}]}));
//! let id = resolve(&doc, &path!["items", 0usize, "id"]).unwrap();
//! assert_eq!(id.as_i64(), Some(7));
//! assert_eq!(path!["items", 0usize, "id"].to_string(), "items[0].id");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod path;
pub mod resolve;
pub mod value;

pub use error::{PathError, ResolveError};
pub use path::{IntoPath, Path, PathElement};
pub use resolve::resolve;
pub use value::Value;
