//! Node: typed-view gateway over one resolved location
//!
//! A [`Node`] binds the outcome of a lookup (value or resolution error) to its
//! path, message prefix and sink. Typed accessors check existence first, then
//! the runtime type, and hand out the matching typed assertion. A failed check
//! yields the poisoned assertion, which reports nothing further.

use crate::assertions::context::Context;
use crate::assertions::{
    ArrayAssertion, IntegerAssertion, JwtAssertion, NumberAssertion, ObjectAssertion,
    StringAssertion, TimeAssertion, UrlAssertion, UuidAssertion, RFC3339,
};
use crate::document::AssertJson;
use crate::jwt::{Token, VerificationKey};
use chrono::{DateTime, FixedOffset};
use docassert_core::value::{is_integral, sorted_entries, to_i64};
use docassert_core::{Path, ResolveError, Value};
use docassert_wire::{decode_json, diff_values, encode_json, encode_number};
use std::borrow::Cow;
use std::fmt::Display;
use uuid::Uuid;

/// One location in a document, resolved or not
pub struct Node<'a> {
    ctx: Context<'a>,
    value: Result<&'a Value, ResolveError>,
}

impl<'a> Node<'a> {
    pub(crate) fn new(ctx: Context<'a>, value: Result<&'a Value, ResolveError>) -> Self {
        Node { ctx, value }
    }

    /// Full path of this node
    pub fn path(&self) -> &Path {
        &self.ctx.path
    }

    /// Resolved value, reporting the resolution failure if there is none
    fn found(&self) -> Option<&'a Value> {
        match &self.value {
            Ok(value) => Some(value),
            Err(err) => {
                self.ctx.fail_not_found(err);
                None
            }
        }
    }

    // ========================================================================
    // Existence and literals
    // ========================================================================

    /// Assert that the node exists
    pub fn exists(&self) {
        if self.value.is_err() {
            self.ctx.fail(format_args!("exists"));
        }
    }

    /// Assert that the node does not exist
    pub fn does_not_exist(&self) {
        if self.value.is_ok() {
            self.ctx.fail(format_args!("does not exist"));
        }
    }

    /// Assert that the node is `null`
    pub fn is_null(&self) {
        if let Some(value) = self.found() {
            if !value.is_null() {
                self.ctx.fail(format_args!("is null, actual is {}", value.type_name()));
            }
        }
    }

    /// Assert that the node exists and is not `null`
    pub fn is_not_null(&self) {
        if let Some(Value::Null) = self.found() {
            self.ctx.fail(format_args!("is not null"));
        }
    }

    /// Assert that the node is boolean `true`
    pub fn is_true(&self) {
        if let Some(b) = self.boolean() {
            if !b {
                self.ctx.fail(format_args!("is true"));
            }
        }
    }

    /// Assert that the node is boolean `false`
    pub fn is_false(&self) {
        if let Some(b) = self.boolean() {
            if b {
                self.ctx.fail(format_args!("is false"));
            }
        }
    }

    fn boolean(&self) -> Option<bool> {
        match self.found()? {
            Value::Bool(b) => Some(*b),
            _ => {
                self.ctx.fail(format_args!("is boolean"));
                None
            }
        }
    }

    // ========================================================================
    // Direct conversions
    // ========================================================================

    /// Node value, or `None` (after reporting) when it does not exist
    pub fn value(&self) -> Option<&'a Value> {
        self.found()
    }

    /// Node value as a string
    ///
    /// Integral numbers render without a decimal point, other numbers with six
    /// decimals. Anything else fails and returns an empty string.
    pub fn string(&self) -> String {
        match self.found() {
            Some(Value::String(s)) => s.clone(),
            Some(Value::Number(n)) if is_integral(*n) => encode_number(*n),
            Some(Value::Number(n)) => format!("{:.6}", n),
            Some(_) => {
                self.ctx.fail(format_args!("cannot be converted into string"));
                String::new()
            }
            None => String::new(),
        }
    }

    /// Node value as a float; non-numbers fail and return `0.0`
    pub fn float(&self) -> f64 {
        self.is_number().value()
    }

    /// Node value as an integer; non-integers fail and return `0`
    pub fn integer(&self) -> i64 {
        self.is_integer().value()
    }

    /// Canonical compact JSON of the node value (empty when missing)
    pub fn json(&self) -> Vec<u8> {
        self.found()
            .map(|value| encode_json(value).into_bytes())
            .unwrap_or_default()
    }

    // ========================================================================
    // Type checks
    // ========================================================================

    /// Assert that the node is a string
    pub fn is_string(&self) -> StringAssertion<'a> {
        match self.found() {
            Some(Value::String(s)) => StringAssertion::new(self.ctx.clone(), s),
            Some(_) => {
                self.ctx.fail(format_args!("is string"));
                StringAssertion::poisoned()
            }
            None => StringAssertion::poisoned(),
        }
    }

    /// Assert that the node is a number
    pub fn is_number(&self) -> NumberAssertion<'a> {
        match self.found() {
            Some(Value::Number(n)) => NumberAssertion::new(self.ctx.clone(), *n),
            Some(_) => {
                self.ctx.fail(format_args!("is number"));
                NumberAssertion::poisoned()
            }
            None => NumberAssertion::poisoned(),
        }
    }

    /// Alias of [`is_number`](Self::is_number)
    pub fn is_float(&self) -> NumberAssertion<'a> {
        self.is_number()
    }

    /// Assert that the node is a number without fractional part
    pub fn is_integer(&self) -> IntegerAssertion<'a> {
        match self.found() {
            Some(Value::Number(n)) => match to_i64(*n) {
                Some(i) => IntegerAssertion::new(self.ctx.clone(), i),
                None if is_integral(*n) => {
                    self.ctx
                        .fail(format_args!("is integer: value is out of int64 range"));
                    IntegerAssertion::poisoned()
                }
                None => {
                    self.ctx
                        .fail(format_args!("is integer: value is float, not integer"));
                    IntegerAssertion::poisoned()
                }
            },
            Some(_) => {
                self.ctx.fail(format_args!("is integer: value is not numeric"));
                IntegerAssertion::poisoned()
            }
            None => IntegerAssertion::poisoned(),
        }
    }

    /// Assert that the node is an array
    pub fn is_array(&self) -> ArrayAssertion<'a> {
        match self.found() {
            Some(Value::Array(items)) => ArrayAssertion::new(self.ctx.clone(), items),
            Some(_) => {
                self.ctx.fail(format_args!("is array"));
                ArrayAssertion::poisoned()
            }
            None => ArrayAssertion::poisoned(),
        }
    }

    /// Assert that the node is an object
    pub fn is_object(&self) -> ObjectAssertion<'a> {
        match self.found() {
            Some(Value::Object(map)) => ObjectAssertion::new(self.ctx.clone(), map),
            Some(_) => {
                self.ctx.fail(format_args!("is object"));
                ObjectAssertion::poisoned()
            }
            None => ObjectAssertion::poisoned(),
        }
    }

    /// Assert that the node is a string holding a UUID
    pub fn is_uuid(&self) -> UuidAssertion<'a> {
        self.is_string().with_uuid()
    }

    /// Assert that the node is a string holding an email (simplified check)
    pub fn is_email(&self) -> StringAssertion<'a> {
        self.is_string().with_email()
    }

    /// Assert that the node is a string holding an HTML5-valid email
    pub fn is_html5_email(&self) -> StringAssertion<'a> {
        self.is_string().with_html5_email()
    }

    /// Assert that the node is a string holding an RFC 3339 time
    pub fn is_time(&self) -> TimeAssertion<'a> {
        self.is_string().with_time()
    }

    /// Assert that the node is a string holding a time in `layout`
    pub fn is_time_with_layout(&self, layout: &str) -> TimeAssertion<'a> {
        self.is_string().with_time_with_layout(layout)
    }

    /// Assert that the node is a string holding a `YYYY-MM-DD` date
    pub fn is_date(&self) -> TimeAssertion<'a> {
        self.is_string().with_date()
    }

    /// Assert that the node is a string holding an absolute URL with a host
    pub fn is_url(&self) -> UrlAssertion<'a> {
        self.is_string().with_url()
    }

    /// Assert that the node is a string holding a verified JWT
    pub fn is_jwt<F, E>(&self, key: F) -> JwtAssertion<'a>
    where
        F: FnOnce(&Token) -> Result<VerificationKey, E>,
        E: Display,
    {
        self.is_string().with_jwt(key)
    }

    // ========================================================================
    // Value shortcuts
    // ========================================================================

    /// UUID value, nil after a failure
    pub fn uuid(&self) -> Uuid {
        self.is_uuid().value()
    }

    /// RFC 3339 time value, Unix epoch after a failure
    pub fn time(&self) -> DateTime<FixedOffset> {
        self.is_time_with_layout(RFC3339).value()
    }

    /// Time value in `layout`, Unix epoch after a failure
    pub fn time_with_layout(&self, layout: &str) -> DateTime<FixedOffset> {
        self.is_time_with_layout(layout).value()
    }

    /// Decoded JWT, empty token after a failure
    pub fn jwt<F, E>(&self, key: F) -> Token
    where
        F: FnOnce(&Token) -> Result<VerificationKey, E>,
        E: Display,
    {
        self.is_jwt(key).value()
    }

    // ========================================================================
    // Structure
    // ========================================================================

    /// Assert that the node is structurally equal to the `expected` document
    ///
    /// Object key order is ignored. A mismatch reports a line diff of the
    /// canonical pretty encodings.
    pub fn equal_json(&self, expected: impl AsRef<str>) {
        let Some(actual) = self.found() else {
            return;
        };
        let expected = match decode_json(expected.as_ref()) {
            Ok(expected) => expected,
            Err(err) => {
                self.ctx.fail(format_args!(
                    "is equal to JSON: expected value has invalid JSON: {}",
                    err
                ));
                return;
            }
        };
        if &expected != actual {
            self.ctx.fail(format_args!(
                "is equal to JSON, diff:\n{}",
                diff_values(&expected, actual)
            ));
        }
    }

    /// Call `f` for every element (arrays) or property (objects)
    ///
    /// Objects are visited in ascending key order.
    pub fn for_each(&self, mut f: impl FnMut(Node<'a>)) {
        match self.found() {
            Some(Value::Array(items)) => {
                for (i, item) in items.iter().enumerate() {
                    f(Node::new(self.ctx.at(self.ctx.path.with_index(i)), Ok(item)));
                }
            }
            Some(Value::Object(map)) => {
                for (key, item) in sorted_entries(map) {
                    f(Node::new(
                        self.ctx.at(self.ctx.path.with_property(key.as_str())),
                        Ok(item),
                    ));
                }
            }
            Some(_) => self
                .ctx
                .fail(format_args!("is iterable (array or object)")),
            None => {}
        }
    }

    /// Run document assertions on this node's value
    ///
    /// Paths inside `f` are relative to this node; failures carry the full
    /// path and the inherited prefix. A missing node skips `f`.
    pub fn assert(&self, f: impl FnOnce(&AssertJson<'_>)) {
        if let Some(value) = self.found() {
            let json = AssertJson::new(
                self.ctx.sink,
                self.ctx.message.clone(),
                self.ctx.path.clone(),
                Cow::Borrowed(value),
            );
            f(&json);
        }
    }

    // ========================================================================
    // Deprecated aliases
    // ========================================================================

    /// Use `is_string().equal_to()` instead
    #[deprecated(note = "use is_string().equal_to()")]
    pub fn equal_to_the_string(&self, expected: &str) {
        self.is_string().equal_to(expected);
    }

    /// Use `is_string().matches()` instead
    #[deprecated(note = "use is_string().matches()")]
    pub fn matches(&self, pattern: &str) {
        self.is_string().matches(pattern);
    }

    /// Use `is_string().not_matches()` instead
    #[deprecated(note = "use is_string().not_matches()")]
    pub fn does_not_match(&self, pattern: &str) {
        self.is_string().not_matches(pattern);
    }

    /// Use `is_string().contains()` instead
    #[deprecated(note = "use is_string().contains()")]
    pub fn contains(&self, needle: &str) {
        self.is_string().contains(needle);
    }

    /// Use `is_string().not_contains()` instead
    #[deprecated(note = "use is_string().not_contains()")]
    pub fn does_not_contain(&self, needle: &str) {
        self.is_string().not_contains(needle);
    }

    /// Use `is_string().with_length()` instead
    #[deprecated(note = "use is_string().with_length()")]
    pub fn is_string_with_length(&self, length: usize) {
        self.is_string().with_length(length);
    }

    /// Use `is_string().with_length_greater_than_or_equal().with_length_less_than_or_equal()` instead
    #[deprecated(
        note = "use is_string().with_length_greater_than_or_equal().with_length_less_than_or_equal()"
    )]
    pub fn is_string_with_length_in_range(&self, min: usize, max: usize) {
        self.is_string()
            .with_length_greater_than_or_equal(min)
            .with_length_less_than_or_equal(max);
    }

    /// Use `is_integer().equal_to()` instead
    #[deprecated(note = "use is_integer().equal_to()")]
    pub fn equal_to_the_integer(&self, expected: i64) {
        self.is_integer().equal_to(expected);
    }

    /// Use `is_number().equal_to()` instead
    #[deprecated(note = "use is_number().equal_to()")]
    pub fn equal_to_the_float(&self, expected: f64) {
        self.is_number().equal_to(expected);
    }

    /// Use `is_number().greater_than()` instead
    #[deprecated(note = "use is_number().greater_than()")]
    pub fn is_number_greater_than(&self, expected: f64) {
        self.is_number().greater_than(expected);
    }

    /// Use `is_number().greater_than_or_equal()` instead
    #[deprecated(note = "use is_number().greater_than_or_equal()")]
    pub fn is_number_greater_than_or_equal(&self, expected: f64) {
        self.is_number().greater_than_or_equal(expected);
    }

    /// Use `is_number().less_than()` instead
    #[deprecated(note = "use is_number().less_than()")]
    pub fn is_number_less_than(&self, expected: f64) {
        self.is_number().less_than(expected);
    }

    /// Use `is_number().less_than_or_equal()` instead
    #[deprecated(note = "use is_number().less_than_or_equal()")]
    pub fn is_number_less_than_or_equal(&self, expected: f64) {
        self.is_number().less_than_or_equal(expected);
    }

    /// Use `is_number().greater_than_or_equal().less_than_or_equal()` instead
    #[deprecated(note = "use is_number().greater_than_or_equal().less_than_or_equal()")]
    pub fn is_number_in_range(&self, min: f64, max: f64) {
        self.is_number()
            .greater_than_or_equal(min)
            .less_than_or_equal(max);
    }

    /// Use `is_array().with_length()` instead
    #[deprecated(note = "use is_array().with_length()")]
    pub fn is_array_with_elements_count(&self, count: usize) {
        self.is_array().with_length(count);
    }

    /// Use `is_object().with_properties_count()` instead
    #[deprecated(note = "use is_object().with_properties_count()")]
    pub fn is_object_with_properties_count(&self, count: usize) {
        self.is_object().with_properties_count(count);
    }
}
