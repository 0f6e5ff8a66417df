//! Line diff between canonical encodings
//!
//! Renders a unified-style diff of two pretty encodings, used to explain why
//! two documents are not structurally equal. Lines are aligned with Myers'
//! algorithm from `similar`.

use super::encode::encode_pretty;
use docassert_core::Value;
use similar::{Algorithm, ChangeTag, TextDiff};

/// One line of a diff
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiffLine<'a> {
    /// Present in both
    Same(&'a str),
    /// Only in the expected text
    Removed(&'a str),
    /// Only in the actual text
    Added(&'a str),
}

/// Align the lines of `expected` and `actual`
pub fn diff_lines<'a>(expected: &'a str, actual: &'a str) -> Vec<DiffLine<'a>> {
    // Split without terminators so a missing final newline is not a change
    let old: Vec<&'a str> = expected.lines().collect();
    let new: Vec<&'a str> = actual.lines().collect();

    let diff = TextDiff::configure()
        .algorithm(Algorithm::Myers)
        .diff_slices(&old, &new);

    let lines = diff
        .iter_all_changes()
        .map(|change| match change.tag() {
            ChangeTag::Equal => DiffLine::Same(change.value()),
            ChangeTag::Delete => DiffLine::Removed(change.value()),
            ChangeTag::Insert => DiffLine::Added(change.value()),
        })
        .collect();
    lines
}

/// Render a diff of two texts with `--- Expected` / `+++ Actual` headers
pub fn unified_diff(expected: &str, actual: &str) -> String {
    let mut out = String::from("--- Expected\n+++ Actual\n");
    for line in diff_lines(expected, actual) {
        let (marker, text) = match line {
            DiffLine::Same(text) => (' ', text),
            DiffLine::Removed(text) => ('-', text),
            DiffLine::Added(text) => ('+', text),
        };
        out.push(marker);
        out.push_str(text);
        out.push('\n');
    }
    out
}

/// Diff two values through their canonical pretty encodings
pub fn diff_values(expected: &Value, actual: &Value) -> String {
    unified_diff(&encode_pretty(expected), &encode_pretty(actual))
}
