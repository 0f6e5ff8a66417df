//! Failure sinks
//!
//! Every assertion reports through a [`FailureSink`]: the test-runner side of
//! the engine. Two implementations are provided:
//!
//! - [`Recorder`] keeps messages for inspection (used by this crate's tests)
//! - [`PanickingSink`] collects messages and panics once in [`PanickingSink::finish`]

use parking_lot::Mutex;
use std::fmt;

/// Receiver of assertion failures
///
/// Implementations must be usable through a shared reference; the provided
/// sinks guard their state with a mutex.
pub trait FailureSink {
    /// Mark the calling frame as a helper (may no-op)
    fn helper(&self) {}

    /// Record one failure and mark the run failed
    fn error(&self, args: fmt::Arguments<'_>);

    /// Record an informational message
    fn log(&self, args: fmt::Arguments<'_>);

    /// Whether any failure was recorded
    fn failed(&self) -> bool;
}

impl<S: FailureSink + ?Sized> FailureSink for &S {
    fn helper(&self) {
        (**self).helper()
    }

    fn error(&self, args: fmt::Arguments<'_>) {
        (**self).error(args)
    }

    fn log(&self, args: fmt::Arguments<'_>) {
        (**self).log(args)
    }

    fn failed(&self) -> bool {
        (**self).failed()
    }
}

/// Sink that records every message
///
/// # Example
///
/// ```
/// use docassert::{has, Recorder};
///
/// let recorder = Recorder::new();
/// has(&recorder, br#"{"key": "value"}"#, |json| {
///     json.node("key").is_string().equal_to("other");
/// });
/// recorder.assert_messages(&[r#"failed asserting that JSON node "key" equal to "other""#]);
/// ```
#[derive(Debug, Default)]
pub struct Recorder {
    messages: Mutex<Vec<String>>,
    logs: Mutex<Vec<String>>,
}

impl Recorder {
    /// Create an empty recorder
    pub fn new() -> Self {
        Self::default()
    }

    /// Recorded failure messages, in order
    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().clone()
    }

    /// Recorded informational messages, in order
    pub fn logs(&self) -> Vec<String> {
        self.logs.lock().clone()
    }

    /// Number of recorded failures
    pub fn len(&self) -> usize {
        self.messages.lock().len()
    }

    /// True when no failure was recorded
    pub fn is_empty(&self) -> bool {
        self.messages.lock().is_empty()
    }

    /// Check the recorded failures against expected fragments
    ///
    /// Panics unless there are exactly `expected.len()` failures and failure
    /// `i` contains `expected[i]`.
    #[track_caller]
    pub fn assert_messages(&self, expected: &[&str]) {
        let messages = self.messages.lock();
        if messages.len() != expected.len() {
            panic!(
                "failed asserting that recorder has messages count {}, actual count is {}:\n{}",
                expected.len(),
                messages.len(),
                messages.join("\n")
            );
        }
        for (i, (actual, fragment)) in messages.iter().zip(expected).enumerate() {
            if !actual.contains(fragment) {
                panic!(
                    "failed asserting that recorder message {} contains {:?}, actual:\n{}",
                    i, fragment, actual
                );
            }
        }
    }

    /// Check that nothing failed
    #[track_caller]
    pub fn assert_no_messages(&self) {
        self.assert_messages(&[]);
    }
}

impl FailureSink for Recorder {
    fn error(&self, args: fmt::Arguments<'_>) {
        self.messages.lock().push(args.to_string());
    }

    fn log(&self, args: fmt::Arguments<'_>) {
        self.logs.lock().push(args.to_string());
    }

    fn failed(&self) -> bool {
        !self.messages.lock().is_empty()
    }
}

/// Sink for plain `#[test]` functions
///
/// Failures are logged with `tracing` as they arrive and collected;
/// [`finish`](Self::finish) panics once with all of them.
#[derive(Debug, Default)]
pub struct PanickingSink {
    messages: Mutex<Vec<String>>,
}

impl PanickingSink {
    /// Create an empty sink
    pub fn new() -> Self {
        Self::default()
    }

    /// Panic if any failure was recorded
    #[track_caller]
    pub fn finish(self) {
        let messages = self.messages.into_inner();
        if !messages.is_empty() {
            panic!(
                "{} JSON assertion(s) failed:\n{}",
                messages.len(),
                messages.join("\n")
            );
        }
    }
}

impl FailureSink for PanickingSink {
    fn error(&self, args: fmt::Arguments<'_>) {
        let message = args.to_string();
        tracing::error!(target: "docassert", "{}", message);
        self.messages.lock().push(message);
    }

    fn log(&self, args: fmt::Arguments<'_>) {
        tracing::info!(target: "docassert", "{}", args);
    }

    fn failed(&self) -> bool {
        !self.messages.lock().is_empty()
    }
}
