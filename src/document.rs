//! Entry points and document contexts
//!
//! A top-level call loads the raw bytes, builds a private value tree and hands
//! an [`AssertJson`] to the caller's callback. The tree is dropped when the
//! call returns.

use crate::assertions::context::Context;
use crate::config::Config;
use crate::error::Result;
use crate::node::Node;
use crate::sink::{FailureSink, PanickingSink};
use docassert_core::{resolve, IntoPath, Path, ResolveError, Value};
use docassert_wire::{decode_slice, DEFAULT_MAX_DEPTH};
use std::borrow::Cow;

/// A document (or sub-document) under assertion
///
/// Handed to assertion callbacks; look values up with [`node`](Self::node).
pub struct AssertJson<'a> {
    sink: &'a dyn FailureSink,
    message: String,
    path: Path,
    data: Cow<'a, Value>,
}

impl<'a> AssertJson<'a> {
    pub(crate) fn new(
        sink: &'a dyn FailureSink,
        message: String,
        path: Path,
        data: Cow<'a, Value>,
    ) -> Self {
        AssertJson {
            sink,
            message,
            path,
            data,
        }
    }

    /// Look up the node at `path`, relative to this context
    ///
    /// Resolution failures are not reported here; the node reports them the
    /// first time it is asserted on.
    pub fn node(&self, path: impl IntoPath) -> Node<'_> {
        let (path, value) = self.lookup(path);
        Node::new(
            Context::new(self.sink, path, self.message.clone()),
            value,
        )
    }

    /// Move the context to the sub-document at `path`
    ///
    /// A failed resolution is reported at once; the returned context then
    /// holds `null`, so later type assertions on it report again.
    pub fn at(&self, path: impl IntoPath) -> AssertJson<'_> {
        let (path, value) = self.lookup(path);
        let data = match value {
            Ok(value) => Cow::Borrowed(value),
            Err(err) => {
                Context::new(self.sink, path.clone(), self.message.clone()).fail_not_found(&err);
                Cow::Owned(Value::Null)
            }
        };
        AssertJson::new(self.sink, self.message.clone(), path, data)
    }

    /// Same document with `message` prepended to every failure
    pub fn with_message(&self, message: impl AsRef<str>) -> AssertJson<'_> {
        AssertJson::new(
            self.sink,
            format!("{}{}", self.message, message.as_ref()),
            self.path.clone(),
            Cow::Borrowed(self.data.as_ref()),
        )
    }

    /// The whole value of this context
    pub fn value(&self) -> &Value {
        &self.data
    }

    /// Location of this context inside the top-level document
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The sink failures are reported to
    pub fn sink(&self) -> &dyn FailureSink {
        self.sink
    }

    fn lookup(&self, path: impl IntoPath) -> (Path, std::result::Result<&Value, ResolveError>) {
        match path.into_path() {
            Ok(relative) => {
                let value = resolve(&self.data, &relative).map_err(|err| err.rebase(&self.path));
                (self.path.join(&relative), value)
            }
            Err(err) => (self.path.clone(), Err(ResolveError::InvalidPath(err))),
        }
    }
}

/// Load `data` and run `assert` against it
///
/// Returns `false` when the sink has recorded any failure. Invalid JSON is
/// reported once and `assert` is not called.
///
/// # Example
///
/// ```
/// use docassert::{has, Recorder};
///
/// let recorder = Recorder::new();
/// let passed = has(&recorder, br#"{"items": [1, 2]}"#, |json| {
///     json.node("items").is_array().with_length(2);
/// });
/// assert!(passed);
/// ```
pub fn has<S: FailureSink>(sink: &S, data: impl AsRef<[u8]>, assert: impl FnOnce(&AssertJson<'_>)) -> bool {
    has_with(&Config::default(), sink, data, assert)
}

/// [`has`] with explicit settings
pub fn has_with<S: FailureSink>(
    config: &Config,
    sink: &S,
    data: impl AsRef<[u8]>,
    assert: impl FnOnce(&AssertJson<'_>),
) -> bool {
    sink.helper();
    run_document(
        sink,
        config.message().to_string(),
        data.as_ref(),
        config.max_depth(),
        assert,
    );
    !sink.failed()
}

/// Read a file and run [`has`] on its contents
///
/// A read error is reported once as `failed to read file '<path>': <error>`.
pub fn file_has<S: FailureSink>(
    sink: &S,
    path: impl AsRef<std::path::Path>,
    assert: impl FnOnce(&AssertJson<'_>),
) -> bool {
    sink.helper();
    let path = path.as_ref();
    tracing::debug!(path = %path.display(), "reading JSON file");
    match std::fs::read(path) {
        Ok(data) => has(sink, data, assert),
        Err(err) => {
            sink.error(format_args!(
                "failed to read file '{}': {}",
                path.display(),
                err
            ));
            false
        }
    }
}

/// Run `assert` against an already built value
pub fn has_value<S: FailureSink>(sink: &S, value: &Value, assert: impl FnOnce(&AssertJson<'_>)) -> bool {
    sink.helper();
    let json = AssertJson::new(sink, String::new(), Path::root(), Cow::Borrowed(value));
    assert(&json);
    !sink.failed()
}

/// Run assertions in a plain `#[test]` and panic if any fails
///
/// All failures are collected first; the panic message lists every one.
///
/// ```
/// docassert::assert_json(r#"{"id": 7}"#, |json| {
///     json.node("id").is_integer().equal_to(7);
/// });
/// ```
#[track_caller]
pub fn assert_json(data: impl AsRef<[u8]>, assert: impl FnOnce(&AssertJson<'_>)) {
    let sink = PanickingSink::new();
    has(&sink, data, assert);
    sink.finish();
}

/// Load a document without a sink
pub fn load(data: impl AsRef<[u8]>) -> Result<Value> {
    load_with(&Config::default(), data)
}

/// Load a document with explicit settings
pub fn load_with(config: &Config, data: impl AsRef<[u8]>) -> Result<Value> {
    let data = data.as_ref();
    let value = decode_slice(data, config.max_depth())?;
    tracing::debug!(bytes = data.len(), kind = value.type_name(), "loaded JSON document");
    Ok(value)
}

/// Read and load a document file
pub fn load_file(path: impl AsRef<std::path::Path>) -> Result<Value> {
    let path = path.as_ref();
    tracing::debug!(path = %path.display(), "reading JSON file");
    let data = std::fs::read(path)?;
    load(data)
}

/// Look up a value without a sink
///
/// ```
/// use docassert::{load, lookup};
///
/// let doc = load(r#"{"a": [10, 20]}"#).unwrap();
/// assert_eq!(lookup(&doc, "/a/1").unwrap().as_i64(), Some(20));
/// assert!(lookup(&doc, "missing").unwrap_err().is_not_found());
/// ```
pub fn lookup(value: &Value, path: impl IntoPath) -> Result<&Value> {
    let path = path.into_path()?;
    Ok(resolve(value, &path)?)
}

/// Parse `data` as a fresh document under `message` and run `assert`
///
/// Parse errors are reported as `<message>data has invalid JSON: <reason>`.
pub(crate) fn run_document(
    sink: &dyn FailureSink,
    message: String,
    data: &[u8],
    max_depth: usize,
    assert: impl FnOnce(&AssertJson<'_>),
) {
    match decode_slice(data, max_depth) {
        Ok(value) => {
            tracing::debug!(bytes = data.len(), kind = value.type_name(), "loaded JSON document");
            let json = AssertJson::new(sink, message, Path::root(), Cow::Owned(value));
            assert(&json);
        }
        Err(err) => {
            sink.helper();
            sink.error(format_args!("{}data has invalid JSON: {}", message, err));
        }
    }
}

/// [`run_document`] with the default nesting limit
pub(crate) fn run_nested(
    sink: &dyn FailureSink,
    message: String,
    data: &[u8],
    assert: impl FnOnce(&AssertJson<'_>),
) {
    run_document(sink, message, data, DEFAULT_MAX_DEPTH, assert)
}
