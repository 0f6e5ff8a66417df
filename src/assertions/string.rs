//! String assertions and upgrades to richer string-encoded types

use super::context::{quote_all, Context, Stage};
use super::validate;
use super::{JwtAssertion, TimeAssertion, UrlAssertion, UuidAssertion, DATE_LAYOUT, RFC3339};
use crate::document::{run_nested, AssertJson};
use crate::jwt::{self, Token, VerificationKey};
use crate::sink::FailureSink;
use regex::Regex;
use std::borrow::Cow;
use std::cmp::Ordering;
use std::fmt::Display;
use uuid::Uuid;

/// A regular expression, precompiled or given as source text
pub trait RegexPattern {
    /// Compile (or borrow) the expression
    fn to_regex(&self) -> Result<Cow<'_, Regex>, regex::Error>;

    /// Source text, used in failure messages
    fn as_pattern(&self) -> &str;
}

impl RegexPattern for Regex {
    fn to_regex(&self) -> Result<Cow<'_, Regex>, regex::Error> {
        Ok(Cow::Borrowed(self))
    }

    fn as_pattern(&self) -> &str {
        self.as_str()
    }
}

impl RegexPattern for str {
    fn to_regex(&self) -> Result<Cow<'_, Regex>, regex::Error> {
        Regex::new(self).map(Cow::Owned)
    }

    fn as_pattern(&self) -> &str {
        self
    }
}

impl RegexPattern for String {
    fn to_regex(&self) -> Result<Cow<'_, Regex>, regex::Error> {
        self.as_str().to_regex()
    }

    fn as_pattern(&self) -> &str {
        self
    }
}

impl<T: RegexPattern + ?Sized> RegexPattern for &T {
    fn to_regex(&self) -> Result<Cow<'_, Regex>, regex::Error> {
        (**self).to_regex()
    }

    fn as_pattern(&self) -> &str {
        (**self).as_pattern()
    }
}

/// Assertions on a string node
#[derive(Debug)]
pub struct StringAssertion<'a>(Option<Stage<'a, &'a str>>);

impl<'a> StringAssertion<'a> {
    pub(crate) fn new(ctx: Context<'a>, value: &'a str) -> Self {
        StringAssertion(Some(Stage::new(ctx, value)))
    }

    pub(crate) fn poisoned() -> Self {
        StringAssertion(None)
    }

    /// Assert that the string is empty
    pub fn is_empty(self) -> Self {
        if let Some(s) = &self.0 {
            if !s.value.is_empty() {
                s.ctx
                    .fail(format_args!("is empty string, actual is {:?}", s.value));
            }
        }
        self
    }

    /// Assert that the string is not empty
    pub fn is_not_empty(self) -> Self {
        if let Some(s) = &self.0 {
            if s.value.is_empty() {
                s.ctx.fail(format_args!("is not empty string"));
            }
        }
        self
    }

    /// Assert that the string equals `expected`
    pub fn equal_to(self, expected: impl AsRef<str>) -> Self {
        if let Some(s) = &self.0 {
            let expected = expected.as_ref();
            if s.value != expected {
                s.ctx.fail(format_args!(
                    "equal to {:?}, actual is {:?}",
                    expected, s.value
                ));
            }
        }
        self
    }

    /// Assert that the string differs from `expected`
    pub fn not_equal_to(self, expected: impl AsRef<str>) -> Self {
        if let Some(s) = &self.0 {
            let expected = expected.as_ref();
            if s.value == expected {
                s.ctx.fail(format_args!("not equal to {:?}", expected));
            }
        }
        self
    }

    /// Assert that the string equals one of `expected`
    pub fn equal_to_one_of<S: AsRef<str>>(self, expected: &[S]) -> Self {
        if let Some(s) = &self.0 {
            if !expected.iter().any(|e| e.as_ref() == s.value) {
                s.ctx.fail(format_args!(
                    "equal to one of values ({}), actual is {:?}",
                    quote_all(expected),
                    s.value
                ));
            }
        }
        self
    }

    /// Assert that the string matches `pattern`
    ///
    /// A pattern given as text is compiled here; an invalid one is reported
    /// as a failure.
    pub fn matches(self, pattern: impl RegexPattern) -> Self {
        if let Some(s) = &self.0 {
            match pattern.to_regex() {
                Ok(regex) if !regex.is_match(s.value) => s.ctx.fail(format_args!(
                    "matches {:?}, actual is {:?}",
                    pattern.as_pattern(),
                    s.value
                )),
                Ok(_) => {}
                Err(err) => s.ctx.fail(format_args!(
                    "matches {:?}: invalid regular expression: {}",
                    pattern.as_pattern(),
                    err
                )),
            }
        }
        self
    }

    /// Assert that the string does not match `pattern`
    pub fn not_matches(self, pattern: impl RegexPattern) -> Self {
        if let Some(s) = &self.0 {
            match pattern.to_regex() {
                Ok(regex) if regex.is_match(s.value) => s.ctx.fail(format_args!(
                    "does not match {:?}, actual is {:?}",
                    pattern.as_pattern(),
                    s.value
                )),
                Ok(_) => {}
                Err(err) => s.ctx.fail(format_args!(
                    "does not match {:?}: invalid regular expression: {}",
                    pattern.as_pattern(),
                    err
                )),
            }
        }
        self
    }

    /// Assert that the string contains `needle`
    pub fn contains(self, needle: impl AsRef<str>) -> Self {
        if let Some(s) = &self.0 {
            let needle = needle.as_ref();
            if !s.value.contains(needle) {
                s.ctx
                    .fail(format_args!("contains {:?}, actual is {:?}", needle, s.value));
            }
        }
        self
    }

    /// Assert that the string does not contain `needle`
    pub fn not_contains(self, needle: impl AsRef<str>) -> Self {
        if let Some(s) = &self.0 {
            let needle = needle.as_ref();
            if s.value.contains(needle) {
                s.ctx.fail(format_args!(
                    "does not contain {:?}, actual is {:?}",
                    needle, s.value
                ));
            }
        }
        self
    }

    /// Assert the length in Unicode code points
    pub fn with_length(self, length: usize) -> Self {
        self.check_length("", length, |ord| ord == Ordering::Equal)
    }

    /// Assert a length strictly greater than `length`
    pub fn with_length_greater_than(self, length: usize) -> Self {
        self.check_length("greater than ", length, |ord| ord == Ordering::Greater)
    }

    /// Assert a length of at least `length`
    pub fn with_length_greater_than_or_equal(self, length: usize) -> Self {
        self.check_length("greater than or equal to ", length, |ord| {
            ord != Ordering::Less
        })
    }

    /// Assert a length strictly less than `length`
    pub fn with_length_less_than(self, length: usize) -> Self {
        self.check_length("less than ", length, |ord| ord == Ordering::Less)
    }

    /// Assert a length of at most `length`
    pub fn with_length_less_than_or_equal(self, length: usize) -> Self {
        self.check_length("less than or equal to ", length, |ord| {
            ord != Ordering::Greater
        })
    }

    fn check_length(self, relation: &str, length: usize, holds: fn(Ordering) -> bool) -> Self {
        if let Some(s) = &self.0 {
            let actual = s.value.chars().count();
            if !holds(actual.cmp(&length)) {
                s.ctx.fail(format_args!(
                    "is string with length {}{}, actual is {}",
                    relation, length, actual
                ));
            }
        }
        self
    }

    /// Assert with a custom predicate; an `Err` is reported as the reason
    pub fn that<E: Display>(self, predicate: impl FnOnce(&str) -> Result<(), E>) -> Self {
        if let Some(s) = &self.0 {
            if let Err(err) = predicate(s.value) {
                s.ctx.fail(format_args!("is string: {}", err));
            }
        }
        self
    }

    /// Hand the string to a callback that reports through the sink itself
    pub fn assert(self, f: impl FnOnce(&dyn FailureSink, &str)) -> Self {
        if let Some(s) = &self.0 {
            f(s.ctx.sink, s.value);
        }
        self
    }

    /// The string value, empty after a failure
    pub fn value(&self) -> &'a str {
        self.0.as_ref().map_or("", |s| s.value)
    }

    // ------------------------------------------------------------------------
    // Upgrades
    // ------------------------------------------------------------------------

    /// Parse the string as a UUID
    pub fn with_uuid(self) -> UuidAssertion<'a> {
        let Some(s) = self.0 else {
            return UuidAssertion::poisoned();
        };
        match Uuid::parse_str(s.value) {
            Ok(uuid) => UuidAssertion::new(s.ctx, uuid),
            Err(_) => {
                s.ctx.fail(format_args!("is UUID, actual is {:?}", s.value));
                UuidAssertion::poisoned()
            }
        }
    }

    /// Check the simplified email format; the chain continues either way
    pub fn with_email(self) -> Self {
        if let Some(s) = &self.0 {
            if !validate::is_email(s.value) {
                s.ctx.fail(format_args!("is email, actual is {:?}", s.value));
            }
        }
        self
    }

    /// Check the HTML5 email format; the chain continues either way
    pub fn with_html5_email(self) -> Self {
        if let Some(s) = &self.0 {
            if !validate::is_html5_email(s.value) {
                s.ctx.fail(format_args!(
                    "is email (HTML5 format), actual is {:?}",
                    s.value
                ));
            }
        }
        self
    }

    /// Parse the string as an absolute URL with a host
    pub fn with_url(self) -> UrlAssertion<'a> {
        let Some(s) = self.0 else {
            return UrlAssertion::poisoned();
        };
        match validate::parse_url(s.value) {
            Some(url) => UrlAssertion::new(s.ctx, url),
            None => {
                s.ctx.fail(format_args!("is URL, actual is {:?}", s.value));
                UrlAssertion::poisoned()
            }
        }
    }

    /// Parse the string as an RFC 3339 time
    pub fn with_time(self) -> TimeAssertion<'a> {
        self.with_time_with_layout(RFC3339)
    }

    /// Parse the string as a time in `layout` (chrono format syntax)
    pub fn with_time_with_layout(self, layout: &str) -> TimeAssertion<'a> {
        let Some(s) = self.0 else {
            return TimeAssertion::poisoned();
        };
        match super::time::parse_time(s.value, layout) {
            Ok(time) => TimeAssertion::new(s.ctx, time),
            Err(err) => {
                s.ctx.fail(format_args!("is time: {}", err));
                TimeAssertion::poisoned()
            }
        }
    }

    /// Parse the string as a `YYYY-MM-DD` date at midnight UTC
    pub fn with_date(self) -> TimeAssertion<'a> {
        self.with_time_with_layout(DATE_LAYOUT)
    }

    /// Load the string as an embedded JSON document and assert on it
    ///
    /// Failures inside `f` are prefixed with
    /// `JSON node "<path>" is string with JSON: `.
    pub fn with_json(self, f: impl FnOnce(&AssertJson<'_>)) -> Self {
        if let Some(s) = &self.0 {
            let message = s.ctx.nested_message(format_args!("is string with JSON"));
            run_nested(s.ctx.sink, message, s.value.as_bytes(), f);
        }
        self
    }

    /// Decode and verify the string as a JWT
    ///
    /// `key` picks the verification key after the token is decoded.
    pub fn with_jwt<F, E>(self, key: F) -> JwtAssertion<'a>
    where
        F: FnOnce(&Token) -> Result<VerificationKey, E>,
        E: Display,
    {
        let Some(s) = self.0 else {
            return JwtAssertion::poisoned();
        };
        match jwt::parse(s.value, key) {
            Ok(token) => JwtAssertion::new(s.ctx, token),
            Err(err) => {
                s.ctx.fail(format_args!("is JWT: {}", err));
                JwtAssertion::poisoned()
            }
        }
    }
}
