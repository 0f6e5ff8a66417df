//! Value resolution
//!
//! Walks a [`Path`] through a [`Value`] tree, one element at a time. The walk
//! stops at the first failing step and reports that element together with the
//! path up to and including it.

use crate::error::ResolveError;
use crate::path::{Path, PathElement};
use crate::value::Value;

/// Resolve `path` inside `root`
///
/// The empty path resolves to `root` itself.
///
/// # Example
///
/// ```
/// use docassert_core::{path, resolve, Value};
///
/// let doc = Value::from(serde_json::json!({"a": {"b": ["x", "y"]}}));
/// let found = resolve(&doc, &path!["a", "b", 1usize]).unwrap();
/// assert_eq!(found.as_str(), Some("y"));
/// ```
pub fn resolve<'a>(root: &'a Value, path: &Path) -> Result<&'a Value, ResolveError> {
    tracing::trace!(path = %path, "resolving JSON node");

    let mut current = root;
    for (depth, element) in path.elements().iter().enumerate() {
        let at = || path.prefix(depth + 1);
        current = match element {
            PathElement::Property(name) => match current {
                Value::Object(map) => map.get(name).ok_or_else(|| {
                    ResolveError::PropertyNotFound {
                        property: name.clone(),
                        at: at(),
                    }
                })?,
                other => {
                    return Err(ResolveError::NotAssignable {
                        element: element.clone(),
                        actual: other.type_name(),
                        at: at(),
                    })
                }
            },
            PathElement::Index(index) => match current {
                Value::Array(items) => {
                    items
                        .get(*index)
                        .ok_or_else(|| ResolveError::IndexOutOfRange {
                            index: *index,
                            length: items.len(),
                            at: at(),
                        })?
                }
                other => {
                    return Err(ResolveError::NotIndexable {
                        index: *index,
                        actual: other.type_name(),
                        at: at(),
                    })
                }
            },
        };
    }

    Ok(current)
}
