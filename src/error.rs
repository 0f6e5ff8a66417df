//! Unified error types for docassert.
//!
//! Assertion failures never surface here: they go to the
//! [`FailureSink`](crate::FailureSink). These errors belong to the fallible
//! helpers that load and look up documents outside an assertion run.

use docassert_core::{PathError, ResolveError};
use docassert_wire::DecodeError;
use thiserror::Error;

/// All docassert errors.
#[derive(Debug, Error)]
pub enum Error {
    /// I/O error reading a document
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Document is not valid JSON
    #[error("invalid JSON: {0}")]
    Decode(#[from] DecodeError),

    /// Path argument could not be parsed
    #[error("invalid path: {0}")]
    Path(#[from] PathError),

    /// Path does not lead to a value
    #[error("failed to find JSON node: {0}")]
    Resolve(#[from] ResolveError),
}

/// Result type for docassert operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Check if this is a not-found error.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::Resolve(err) if err.is_not_found())
    }
}
