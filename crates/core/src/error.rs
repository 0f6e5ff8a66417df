//! Error types for path construction and value resolution

use crate::path::{Path, PathElement};
use thiserror::Error;

/// Invalid path syntax
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PathError {
    /// Pointer does not start with `/`
    #[error("invalid JSON pointer \"{0}\": must start with '/'")]
    MissingLeadingSlash(String),

    /// `~` not followed by `0` or `1`
    #[error("invalid JSON pointer \"{0}\": bad escape sequence")]
    InvalidEscape(String),
}

/// Failure to locate a value for a path
///
/// Every variant records the failing element and the path up to and
/// including it (`at`).
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ResolveError {
    /// Object has no such key
    #[error("property \"{property}\" not found at \"{at}\"")]
    PropertyNotFound {
        /// Missing key
        property: String,
        /// Path of the missing value
        at: Path,
    },

    /// Property step applied to a non-object value
    #[error("{element} is not assignable to {actual} at \"{at}\"")]
    NotAssignable {
        /// Failing step
        element: PathElement,
        /// Type of the container
        actual: &'static str,
        /// Path of the failing step
        at: Path,
    },

    /// Index step past the end of an array
    #[error("index {index} is out of range (length {length}) at \"{at}\"")]
    IndexOutOfRange {
        /// Requested index
        index: usize,
        /// Array length
        length: usize,
        /// Path of the failing step
        at: Path,
    },

    /// Index step applied to a non-array value
    #[error("index {index} cannot be applied to {actual} at \"{at}\"")]
    NotIndexable {
        /// Requested index
        index: usize,
        /// Type of the container
        actual: &'static str,
        /// Path of the failing step
        at: Path,
    },

    /// Path could not be built from the call arguments
    #[error(transparent)]
    InvalidPath(#[from] PathError),
}

impl ResolveError {
    /// Path of the failing step, if resolution got that far
    pub fn at(&self) -> Option<&Path> {
        match self {
            ResolveError::PropertyNotFound { at, .. }
            | ResolveError::NotAssignable { at, .. }
            | ResolveError::IndexOutOfRange { at, .. }
            | ResolveError::NotIndexable { at, .. } => Some(at),
            ResolveError::InvalidPath(_) => None,
        }
    }

    /// Prefix the recorded path with `base`
    ///
    /// Used when the resolved document is itself a sub-tree located at `base`.
    pub fn rebase(self, base: &Path) -> Self {
        match self {
            ResolveError::PropertyNotFound { property, at } => ResolveError::PropertyNotFound {
                property,
                at: base.join(&at),
            },
            ResolveError::NotAssignable {
                element,
                actual,
                at,
            } => ResolveError::NotAssignable {
                element,
                actual,
                at: base.join(&at),
            },
            ResolveError::IndexOutOfRange { index, length, at } => {
                ResolveError::IndexOutOfRange {
                    index,
                    length,
                    at: base.join(&at),
                }
            }
            ResolveError::NotIndexable { index, actual, at } => ResolveError::NotIndexable {
                index,
                actual,
                at: base.join(&at),
            },
            ResolveError::InvalidPath(err) => ResolveError::InvalidPath(err),
        }
    }

    /// True when the location simply does not exist in the document
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            ResolveError::PropertyNotFound { .. } | ResolveError::IndexOutOfRange { .. }
        )
    }
}
