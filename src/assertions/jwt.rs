//! Assertions on a verified JWT

use super::context::{quote_all, Context, Stage};
use super::TimeAssertion;
use crate::document::AssertJson;
use crate::jwt::Token;
use crate::sink::FailureSink;
use chrono::DateTime;
use docassert_core::{Path, Value};
use std::borrow::Cow;

/// Assertions on a string node holding a verified JWT
#[derive(Debug)]
pub struct JwtAssertion<'a>(Option<Stage<'a, Token>>);

impl<'a> JwtAssertion<'a> {
    pub(crate) fn new(ctx: Context<'a>, token: Token) -> Self {
        JwtAssertion(Some(Stage::new(ctx, token)))
    }

    pub(crate) fn poisoned() -> Self {
        JwtAssertion(None)
    }

    /// Assert the header's `alg`
    pub fn with_algorithm(self, expected: &str) -> Self {
        if let Some(s) = &self.0 {
            if s.value.algorithm != expected {
                s.ctx.fail(format_args!(
                    "is JWT with algorithm {:?}, actual is {:?}",
                    expected, s.value.algorithm
                ));
            }
        }
        self
    }

    /// Run document assertions on the decoded header
    pub fn with_header(self, f: impl FnOnce(&AssertJson<'_>)) -> Self {
        if let Some(s) = &self.0 {
            run_section(&s.ctx, "is JWT with header", &s.value.header, f);
        }
        self
    }

    /// Run document assertions on the decoded payload
    pub fn with_payload(self, f: impl FnOnce(&AssertJson<'_>)) -> Self {
        if let Some(s) = &self.0 {
            run_section(&s.ctx, "is JWT with payload", &s.value.claims, f);
        }
        self
    }

    /// Assert the `jti` claim
    pub fn with_id(self, expected: &str) -> Self {
        self.string_claim("ID", "jti", expected)
    }

    /// Assert the `iss` claim
    pub fn with_issuer(self, expected: &str) -> Self {
        self.string_claim("issuer", "iss", expected)
    }

    /// Assert the `sub` claim
    pub fn with_subject(self, expected: &str) -> Self {
        self.string_claim("subject", "sub", expected)
    }

    /// Assert the `aud` claim: equal to `expected`, or an array containing it
    pub fn with_audience(self, expected: &str) -> Self {
        if let Some(s) = &self.0 {
            let condition = format!("is JWT with audience (\"aud\") {:?}", expected);
            match s.value.claim("aud") {
                None => s.ctx.fail(format_args!("{}: field does not exist", condition)),
                Some(Value::String(actual)) => {
                    if actual != expected {
                        s.ctx
                            .fail(format_args!("{}, actual is {:?}", condition, actual));
                    }
                }
                Some(Value::Array(items)) => {
                    let audiences: Option<Vec<&str>> = items.iter().map(Value::as_str).collect();
                    match audiences {
                        Some(audiences) if audiences.contains(&expected) => {}
                        Some(audiences) => s.ctx.fail(format_args!(
                            "{}, actual is [{}]",
                            condition,
                            quote_all(audiences.as_slice())
                        )),
                        None => s.ctx.fail(format_args!(
                            "{}: string or array of strings expected",
                            condition
                        )),
                    }
                }
                Some(_) => s.ctx.fail(format_args!(
                    "{}: string or array of strings expected",
                    condition
                )),
            }
        }
        self
    }

    fn string_claim(self, title: &str, claim: &str, expected: &str) -> Self {
        if let Some(s) = &self.0 {
            match s.value.claim(claim) {
                None => s.ctx.fail(format_args!(
                    "is JWT with {} ({:?}) {:?}: field does not exist",
                    title, claim, expected
                )),
                Some(Value::String(actual)) => {
                    if actual != expected {
                        s.ctx.fail(format_args!(
                            "is JWT with {} ({:?}) {:?}, actual is {:?}",
                            title, claim, expected, actual
                        ));
                    }
                }
                Some(_) => s.ctx.fail(format_args!(
                    "is JWT with {} ({:?}) {:?}: string is expected",
                    title, claim, expected
                )),
            }
        }
        self
    }

    /// Time assertion on the `exp` claim
    pub fn with_expires_at(self) -> TimeAssertion<'a> {
        self.time_claim("exp", "is JWT with expires at (\"exp\")")
    }

    /// Time assertion on the `nbf` claim
    pub fn with_not_before(self) -> TimeAssertion<'a> {
        self.time_claim("nbf", "is JWT with not before (\"nbf\")")
    }

    /// Time assertion on the `iat` claim
    pub fn with_issued_at(self) -> TimeAssertion<'a> {
        self.time_claim("iat", "is JWT with issued at (\"iat\")")
    }

    fn time_claim(self, claim: &str, subject: &'static str) -> TimeAssertion<'a> {
        let Some(s) = self.0 else {
            return TimeAssertion::poisoned();
        };
        let seconds = match s.value.claim(claim) {
            Some(Value::Number(n)) => *n,
            Some(_) => {
                s.ctx.fail(format_args!("{}: number is expected", subject));
                return TimeAssertion::poisoned();
            }
            None => {
                s.ctx.fail(format_args!("{}: field does not exist", subject));
                return TimeAssertion::poisoned();
            }
        };
        match epoch_time(seconds) {
            Some(time) => TimeAssertion::with_subject(s.ctx, time.fixed_offset(), subject),
            None => {
                s.ctx
                    .fail(format_args!("{}: time is out of range", subject));
                TimeAssertion::poisoned()
            }
        }
    }

    /// Hand the token to a callback that reports through the sink itself
    pub fn assert(self, f: impl FnOnce(&dyn FailureSink, &Token)) -> Self {
        if let Some(s) = &self.0 {
            f(s.ctx.sink, &s.value);
        }
        self
    }

    /// The decoded token, empty after a failure
    pub fn value(self) -> Token {
        self.0.map(|s| s.value).unwrap_or_default()
    }
}

/// Seconds since the Unix epoch, with fractional part, as UTC time
fn epoch_time(seconds: f64) -> Option<DateTime<chrono::Utc>> {
    if !seconds.is_finite() {
        return None;
    }
    let whole = seconds.floor();
    let nanos = ((seconds - whole) * 1e9).round().min(999_999_999.0) as u32;
    DateTime::from_timestamp(whole as i64, nanos)
}

fn run_section(ctx: &Context<'_>, section: &str, value: &Value, f: impl FnOnce(&AssertJson<'_>)) {
    let message = ctx.nested_message(format_args!("{}", section));
    let json = AssertJson::new(ctx.sink, message, Path::root(), Cow::Borrowed(value));
    f(&json);
}
