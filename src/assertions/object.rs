//! Object assertions

use super::array::find_duplicates;
use super::context::{Context, Stage};
use crate::sink::FailureSink;
use docassert_core::value::sorted_entries;
use docassert_core::Value;
use std::cmp::Ordering;
use std::collections::HashMap;

/// Assertions on an object node
#[derive(Debug)]
pub struct ObjectAssertion<'a>(Option<Stage<'a, &'a HashMap<String, Value>>>);

impl<'a> ObjectAssertion<'a> {
    pub(crate) fn new(ctx: Context<'a>, map: &'a HashMap<String, Value>) -> Self {
        ObjectAssertion(Some(Stage::new(ctx, map)))
    }

    pub(crate) fn poisoned() -> Self {
        ObjectAssertion(None)
    }

    /// Assert the number of properties
    pub fn with_properties_count(self, count: usize) -> Self {
        self.check_count("", count, |ord| ord == Ordering::Equal)
    }

    /// Assert more than `count` properties
    pub fn with_properties_count_greater_than(self, count: usize) -> Self {
        self.check_count("greater than ", count, |ord| ord == Ordering::Greater)
    }

    /// Assert at least `count` properties
    pub fn with_properties_count_greater_than_or_equal(self, count: usize) -> Self {
        self.check_count("greater than or equal to ", count, |ord| {
            ord != Ordering::Less
        })
    }

    /// Assert fewer than `count` properties
    pub fn with_properties_count_less_than(self, count: usize) -> Self {
        self.check_count("less than ", count, |ord| ord == Ordering::Less)
    }

    /// Assert at most `count` properties
    pub fn with_properties_count_less_than_or_equal(self, count: usize) -> Self {
        self.check_count("less than or equal to ", count, |ord| {
            ord != Ordering::Greater
        })
    }

    fn check_count(self, relation: &str, count: usize, holds: fn(Ordering) -> bool) -> Self {
        if let Some(s) = &self.0 {
            let actual = s.value.len();
            if !holds(actual.cmp(&count)) {
                s.ctx.fail(format_args!(
                    "is object with properties count {}{}, actual is {}",
                    relation, count, actual
                ));
            }
        }
        self
    }

    /// Assert that no two property values are structurally equal
    ///
    /// Keys are visited in ascending order; the failure names the keys of
    /// every duplicated value.
    pub fn with_unique_elements(self) -> Self {
        if let Some(s) = &self.0 {
            let duplicates = find_duplicates(sorted_entries(s.value).into_iter());
            if !duplicates.is_empty() {
                s.ctx.fail(format_args!(
                    "has unique elements, duplicated elements: {}",
                    duplicates
                ));
            }
        }
        self
    }

    /// Hand the properties to a callback that reports through the sink itself
    pub fn assert(self, f: impl FnOnce(&dyn FailureSink, &HashMap<String, Value>)) -> Self {
        if let Some(s) = &self.0 {
            f(s.ctx.sink, s.value);
        }
        self
    }

    /// The properties, `None` after a failure
    pub fn value(&self) -> Option<&'a HashMap<String, Value>> {
        self.0.as_ref().map(|s| s.value)
    }
}
