//! Shared state of a node or typed assertion
//!
//! Every failure is rendered through [`Context`], so all messages follow one
//! template:
//!
//! ```text
//! <prefix>failed asserting that JSON node "<path>" <condition>
//! <prefix>failed to find JSON node "<path>": <reason>
//! ```

use crate::sink::FailureSink;
use docassert_core::{Path, ResolveError};
use std::fmt;

/// Sink, path and message prefix of one assertion chain
#[derive(Clone)]
pub(crate) struct Context<'a> {
    pub(crate) sink: &'a dyn FailureSink,
    pub(crate) path: Path,
    pub(crate) message: String,
}

impl<'a> Context<'a> {
    pub(crate) fn new(sink: &'a dyn FailureSink, path: Path, message: String) -> Self {
        Context {
            sink,
            path,
            message,
        }
    }

    /// Same sink and prefix, different path
    pub(crate) fn at(&self, path: Path) -> Self {
        Context {
            sink: self.sink,
            path,
            message: self.message.clone(),
        }
    }

    /// Report a failed condition on this node
    pub(crate) fn fail(&self, condition: fmt::Arguments<'_>) {
        self.sink.helper();
        self.sink.error(format_args!(
            "{}failed asserting that JSON node \"{}\" {}",
            self.message, self.path, condition
        ));
    }

    /// Report that this node could not be resolved
    pub(crate) fn fail_not_found(&self, err: &ResolveError) {
        self.sink.helper();
        self.sink.error(format_args!(
            "{}failed to find JSON node \"{}\": {}",
            self.message, self.path, err
        ));
    }

    /// Prefix for a document nested inside this node's value
    pub(crate) fn nested_message(&self, subject: fmt::Arguments<'_>) -> String {
        format!("{}JSON node \"{}\" {}: ", self.message, self.path, subject)
    }
}

impl fmt::Debug for Context<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Context")
            .field("path", &self.path.to_string())
            .field("message", &self.message)
            .finish_non_exhaustive()
    }
}

/// A typed value with the context it came from
#[derive(Debug, Clone)]
pub(crate) struct Stage<'a, T> {
    pub(crate) ctx: Context<'a>,
    pub(crate) value: T,
}

impl<'a, T> Stage<'a, T> {
    pub(crate) fn new(ctx: Context<'a>, value: T) -> Self {
        Stage { ctx, value }
    }
}

/// Quote every item and join with `", "`
pub(crate) fn quote_all<S: AsRef<str>>(items: &[S]) -> String {
    items
        .iter()
        .map(|s| format!("{:?}", s.as_ref()))
        .collect::<Vec<_>>()
        .join(", ")
}
