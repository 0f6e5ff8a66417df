//! Number (`f64`) and integer (`i64`) assertions

use super::context::{Context, Stage};
use crate::sink::FailureSink;
use docassert_wire::encode_number;
use std::cmp::Ordering;

/// Assertions on a numeric node
#[derive(Debug)]
pub struct NumberAssertion<'a>(Option<Stage<'a, f64>>);

impl<'a> NumberAssertion<'a> {
    pub(crate) fn new(ctx: Context<'a>, value: f64) -> Self {
        NumberAssertion(Some(Stage::new(ctx, value)))
    }

    pub(crate) fn poisoned() -> Self {
        NumberAssertion(None)
    }

    /// Assert exact equality
    pub fn equal_to(self, expected: f64) -> Self {
        self.compare("equal to", expected, |ord| ord == Some(Ordering::Equal))
    }

    /// Assert inequality
    pub fn not_equal_to(self, expected: f64) -> Self {
        if let Some(s) = &self.0 {
            if s.value == expected {
                s.ctx
                    .fail(format_args!("not equal to {}", encode_number(expected)));
            }
        }
        self
    }

    /// Assert that the value lies within `delta` of `expected` (inclusive)
    pub fn equal_to_with_delta(self, expected: f64, delta: f64) -> Self {
        if let Some(s) = &self.0 {
            if !((s.value - expected).abs() <= delta) {
                s.ctx.fail(format_args!(
                    "equal to {} with delta {}, actual is {}",
                    encode_number(expected),
                    encode_number(delta),
                    encode_number(s.value)
                ));
            }
        }
        self
    }

    /// Assert `value > expected`
    pub fn greater_than(self, expected: f64) -> Self {
        self.compare("greater than", expected, |ord| ord == Some(Ordering::Greater))
    }

    /// Assert `value >= expected`
    pub fn greater_than_or_equal(self, expected: f64) -> Self {
        self.compare("greater than or equal to", expected, |ord| {
            matches!(ord, Some(Ordering::Greater | Ordering::Equal))
        })
    }

    /// Assert `value < expected`
    pub fn less_than(self, expected: f64) -> Self {
        self.compare("less than", expected, |ord| ord == Some(Ordering::Less))
    }

    /// Assert `value <= expected`
    pub fn less_than_or_equal(self, expected: f64) -> Self {
        self.compare("less than or equal to", expected, |ord| {
            matches!(ord, Some(Ordering::Less | Ordering::Equal))
        })
    }

    fn compare(self, relation: &str, expected: f64, holds: fn(Option<Ordering>) -> bool) -> Self {
        if let Some(s) = &self.0 {
            if !holds(s.value.partial_cmp(&expected)) {
                s.ctx.fail(format_args!(
                    "{} {}, actual is {}",
                    relation,
                    encode_number(expected),
                    encode_number(s.value)
                ));
            }
        }
        self
    }

    /// Hand the number to a callback that reports through the sink itself
    pub fn assert(self, f: impl FnOnce(&dyn FailureSink, f64)) -> Self {
        if let Some(s) = &self.0 {
            f(s.ctx.sink, s.value);
        }
        self
    }

    /// The number, `0.0` after a failure
    pub fn value(&self) -> f64 {
        self.0.as_ref().map_or(0.0, |s| s.value)
    }
}

/// Assertions on an integral node
#[derive(Debug)]
pub struct IntegerAssertion<'a>(Option<Stage<'a, i64>>);

impl<'a> IntegerAssertion<'a> {
    pub(crate) fn new(ctx: Context<'a>, value: i64) -> Self {
        IntegerAssertion(Some(Stage::new(ctx, value)))
    }

    pub(crate) fn poisoned() -> Self {
        IntegerAssertion(None)
    }

    /// Assert exact equality
    pub fn equal_to(self, expected: i64) -> Self {
        self.compare("equal to", expected, |ord| ord == Ordering::Equal)
    }

    /// Assert inequality
    pub fn not_equal_to(self, expected: i64) -> Self {
        if let Some(s) = &self.0 {
            if s.value == expected {
                s.ctx.fail(format_args!("not equal to {}", expected));
            }
        }
        self
    }

    /// Assert `value > expected`
    pub fn greater_than(self, expected: i64) -> Self {
        self.compare("greater than", expected, |ord| ord == Ordering::Greater)
    }

    /// Assert `value >= expected`
    pub fn greater_than_or_equal(self, expected: i64) -> Self {
        self.compare("greater than or equal to", expected, |ord| {
            ord != Ordering::Less
        })
    }

    /// Assert `value < expected`
    pub fn less_than(self, expected: i64) -> Self {
        self.compare("less than", expected, |ord| ord == Ordering::Less)
    }

    /// Assert `value <= expected`
    pub fn less_than_or_equal(self, expected: i64) -> Self {
        self.compare("less than or equal to", expected, |ord| {
            ord != Ordering::Greater
        })
    }

    fn compare(self, relation: &str, expected: i64, holds: fn(Ordering) -> bool) -> Self {
        if let Some(s) = &self.0 {
            if !holds(s.value.cmp(&expected)) {
                s.ctx.fail(format_args!(
                    "{} {}, actual is {}",
                    relation, expected, s.value
                ));
            }
        }
        self
    }

    /// Hand the integer to a callback that reports through the sink itself
    pub fn assert(self, f: impl FnOnce(&dyn FailureSink, i64)) -> Self {
        if let Some(s) = &self.0 {
            f(s.ctx.sink, s.value);
        }
        self
    }

    /// The integer, `0` after a failure
    pub fn value(&self) -> i64 {
        self.0.as_ref().map_or(0, |s| s.value)
    }
}
