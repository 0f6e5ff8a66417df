//! Array assertions

use super::context::{Context, Stage};
use crate::sink::FailureSink;
use docassert_core::Value;
use docassert_wire::encode_json;
use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt::Debug;

/// Assertions on an array node
#[derive(Debug)]
pub struct ArrayAssertion<'a>(Option<Stage<'a, &'a [Value]>>);

impl<'a> ArrayAssertion<'a> {
    pub(crate) fn new(ctx: Context<'a>, items: &'a [Value]) -> Self {
        ArrayAssertion(Some(Stage::new(ctx, items)))
    }

    pub(crate) fn poisoned() -> Self {
        ArrayAssertion(None)
    }

    /// Assert the number of elements
    pub fn with_length(self, count: usize) -> Self {
        self.check_count("", count, |ord| ord == Ordering::Equal)
    }

    /// Assert more than `count` elements
    pub fn with_length_greater_than(self, count: usize) -> Self {
        self.check_count("greater than ", count, |ord| ord == Ordering::Greater)
    }

    /// Assert at least `count` elements
    pub fn with_length_greater_than_or_equal(self, count: usize) -> Self {
        self.check_count("greater than or equal to ", count, |ord| {
            ord != Ordering::Less
        })
    }

    /// Assert fewer than `count` elements
    pub fn with_length_less_than(self, count: usize) -> Self {
        self.check_count("less than ", count, |ord| ord == Ordering::Less)
    }

    /// Assert at most `count` elements
    pub fn with_length_less_than_or_equal(self, count: usize) -> Self {
        self.check_count("less than or equal to ", count, |ord| {
            ord != Ordering::Greater
        })
    }

    fn check_count(self, relation: &str, count: usize, holds: fn(Ordering) -> bool) -> Self {
        if let Some(s) = &self.0 {
            let actual = s.value.len();
            if !holds(actual.cmp(&count)) {
                s.ctx.fail(format_args!(
                    "is array with elements count {}{}, actual is {}",
                    relation, count, actual
                ));
            }
        }
        self
    }

    /// Assert that no two elements are structurally equal
    ///
    /// The failure names every duplicated value with all of its indices.
    pub fn with_unique_elements(self) -> Self {
        if let Some(s) = &self.0 {
            let duplicates = find_duplicates(s.value.iter().enumerate());
            if !duplicates.is_empty() {
                s.ctx.fail(format_args!(
                    "has unique elements, duplicated elements: {}",
                    duplicates
                ));
            }
        }
        self
    }

    /// Hand the elements to a callback that reports through the sink itself
    pub fn assert(self, f: impl FnOnce(&dyn FailureSink, &[Value])) -> Self {
        if let Some(s) = &self.0 {
            f(s.ctx.sink, s.value);
        }
        self
    }

    /// The elements, empty after a failure
    pub fn value(&self) -> &'a [Value] {
        self.0.as_ref().map(|s| s.value).unwrap_or_default()
    }
}

/// Group positions by the canonical encoding of their value
///
/// Groups keep first-seen order; only groups with more than one position are
/// rendered, as `<value> at [<positions>]` joined with `", "`.
pub(crate) fn find_duplicates<'v, K: Debug>(
    items: impl Iterator<Item = (K, &'v Value)>,
) -> String {
    let mut order: Vec<String> = Vec::new();
    let mut groups: HashMap<String, Vec<K>> = HashMap::new();
    for (position, value) in items {
        let key = encode_json(value);
        let group = groups.entry(key.clone()).or_default();
        if group.is_empty() {
            order.push(key);
        }
        group.push(position);
    }

    order
        .into_iter()
        .filter_map(|key| {
            let positions = groups.remove(&key)?;
            (positions.len() > 1).then(|| format!("{} at {:?}", key, positions))
        })
        .collect::<Vec<_>>()
        .join(", ")
}
