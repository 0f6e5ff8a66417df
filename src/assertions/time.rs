//! Time assertions
//!
//! Layouts use chrono's `strftime`-style syntax. [`RFC3339`] selects strict
//! RFC 3339 parsing. A layout without an offset parses as UTC; a layout
//! without time fields parses as midnight UTC.

use super::context::{Context, Stage};
use chrono::format::{ParseError, ParseErrorKind};
use chrono::{DateTime, Duration, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, SecondsFormat};
use std::fmt;

/// RFC 3339 layout (`2006-01-02T15:04:05Z07:00` style)
pub const RFC3339: &str = "%+";

/// Calendar date layout (`YYYY-MM-DD`)
pub const DATE_LAYOUT: &str = "%Y-%m-%d";

const DEFAULT_SUBJECT: &str = "is time";

/// Parse `value` with `layout`
pub(crate) fn parse_time(value: &str, layout: &str) -> Result<DateTime<FixedOffset>, ParseError> {
    if layout == RFC3339 {
        return DateTime::parse_from_rfc3339(value);
    }
    match DateTime::parse_from_str(value, layout) {
        Err(err) if err.kind() == ParseErrorKind::NotEnough => {
            match NaiveDateTime::parse_from_str(value, layout) {
                Err(err) if err.kind() == ParseErrorKind::NotEnough => {
                    NaiveDate::parse_from_str(value, layout)
                        .map(|date| date.and_time(NaiveTime::MIN).and_utc().fixed_offset())
                }
                other => other.map(|time| time.and_utc().fixed_offset()),
            }
        }
        other => other,
    }
}

fn render(time: &DateTime<FixedOffset>) -> String {
    time.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}

fn start_of_day(year: i32, month: u32, day: u32) -> Option<DateTime<FixedOffset>> {
    NaiveDate::from_ymd_opt(year, month, day)
        .map(|date| date.and_time(NaiveTime::MIN).and_utc().fixed_offset())
}

#[derive(Debug, Clone, Copy)]
enum Relation {
    Equal,
    NotEqual,
    After,
    AfterOrEqual,
    Before,
    BeforeOrEqual,
}

impl Relation {
    fn holds(self, actual: &DateTime<FixedOffset>, expected: &DateTime<FixedOffset>) -> bool {
        match self {
            Relation::Equal => actual == expected,
            Relation::NotEqual => actual != expected,
            Relation::After => actual > expected,
            Relation::AfterOrEqual => actual >= expected,
            Relation::Before => actual < expected,
            Relation::BeforeOrEqual => actual <= expected,
        }
    }
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Relation::Equal => "equal to",
            Relation::NotEqual => "not equal to",
            Relation::After => "after",
            Relation::AfterOrEqual => "after or equal to",
            Relation::Before => "before",
            Relation::BeforeOrEqual => "before or equal to",
        })
    }
}

/// Assertions on a time value
///
/// Comparisons are by instant, so differing offsets of the same moment are
/// equal.
#[derive(Debug)]
pub struct TimeAssertion<'a> {
    state: Option<Stage<'a, DateTime<FixedOffset>>>,
    subject: &'static str,
}

impl<'a> TimeAssertion<'a> {
    pub(crate) fn new(ctx: Context<'a>, time: DateTime<FixedOffset>) -> Self {
        Self::with_subject(ctx, time, DEFAULT_SUBJECT)
    }

    /// Time assertion whose failures read `<subject> <relation> ...`
    pub(crate) fn with_subject(
        ctx: Context<'a>,
        time: DateTime<FixedOffset>,
        subject: &'static str,
    ) -> Self {
        TimeAssertion {
            state: Some(Stage::new(ctx, time)),
            subject,
        }
    }

    pub(crate) fn poisoned() -> Self {
        TimeAssertion {
            state: None,
            subject: DEFAULT_SUBJECT,
        }
    }

    fn compare(self, relation: Relation, expected: DateTime<FixedOffset>) -> Self {
        if let Some(s) = &self.state {
            if !relation.holds(&s.value, &expected) {
                match relation {
                    Relation::NotEqual => s.ctx.fail(format_args!(
                        "{} {} \"{}\"",
                        self.subject,
                        relation,
                        render(&expected)
                    )),
                    _ => s.ctx.fail(format_args!(
                        "{} {} \"{}\", actual is \"{}\"",
                        self.subject,
                        relation,
                        render(&expected),
                        render(&s.value)
                    )),
                }
            }
        }
        self
    }

    fn compare_date(self, relation: Relation, year: i32, month: u32, day: u32) -> Self {
        if self.state.is_none() {
            return self;
        }
        match start_of_day(year, month, day) {
            Some(expected) => self.compare(relation, expected),
            None => {
                self.fail_invalid_date(year, month, day);
                self
            }
        }
    }

    fn fail_invalid_date(&self, year: i32, month: u32, day: u32) {
        if let Some(s) = &self.state {
            s.ctx.fail(format_args!(
                "{}: invalid date {:04}-{:02}-{:02}",
                self.subject, year, month, day
            ));
        }
    }

    /// Assert the same instant as `expected`
    pub fn equal_to(self, expected: impl Into<DateTime<FixedOffset>>) -> Self {
        self.compare(Relation::Equal, expected.into())
    }

    /// Assert a different instant from `expected`
    pub fn not_equal_to(self, expected: impl Into<DateTime<FixedOffset>>) -> Self {
        self.compare(Relation::NotEqual, expected.into())
    }

    /// Assert an instant strictly after `expected`
    pub fn after(self, expected: impl Into<DateTime<FixedOffset>>) -> Self {
        self.compare(Relation::After, expected.into())
    }

    /// Assert an instant at or after `expected`
    pub fn after_or_equal_to(self, expected: impl Into<DateTime<FixedOffset>>) -> Self {
        self.compare(Relation::AfterOrEqual, expected.into())
    }

    /// Assert an instant strictly before `expected`
    pub fn before(self, expected: impl Into<DateTime<FixedOffset>>) -> Self {
        self.compare(Relation::Before, expected.into())
    }

    /// Assert an instant at or before `expected`
    pub fn before_or_equal_to(self, expected: impl Into<DateTime<FixedOffset>>) -> Self {
        self.compare(Relation::BeforeOrEqual, expected.into())
    }

    /// Assert exactly the start (UTC) of the given day
    pub fn equal_to_date(self, year: i32, month: u32, day: u32) -> Self {
        self.compare_date(Relation::Equal, year, month, day)
    }

    /// Assert anything but the start (UTC) of the given day
    pub fn not_equal_to_date(self, year: i32, month: u32, day: u32) -> Self {
        self.compare_date(Relation::NotEqual, year, month, day)
    }

    /// Assert an instant after the start (UTC) of the given day
    pub fn after_date(self, year: i32, month: u32, day: u32) -> Self {
        self.compare_date(Relation::After, year, month, day)
    }

    /// Assert an instant at or after the start (UTC) of the given day
    pub fn after_or_equal_to_date(self, year: i32, month: u32, day: u32) -> Self {
        self.compare_date(Relation::AfterOrEqual, year, month, day)
    }

    /// Assert an instant before the start (UTC) of the given day
    pub fn before_date(self, year: i32, month: u32, day: u32) -> Self {
        self.compare_date(Relation::Before, year, month, day)
    }

    /// Assert an instant at or before the start (UTC) of the given day
    pub fn before_or_equal_to_date(self, year: i32, month: u32, day: u32) -> Self {
        self.compare_date(Relation::BeforeOrEqual, year, month, day)
    }

    /// Assert an instant within the given UTC day
    pub fn at_date(self, year: i32, month: u32, day: u32) -> Self {
        let Some(s) = &self.state else {
            return self;
        };
        let Some(start) = start_of_day(year, month, day) else {
            self.fail_invalid_date(year, month, day);
            return self;
        };
        let end = start + Duration::days(1);
        if s.value < start || s.value >= end {
            s.ctx.fail(format_args!(
                "{} at date \"{:04}-{:02}-{:02}\", actual is \"{}\"",
                self.subject,
                year,
                month,
                day,
                render(&s.value)
            ));
        }
        self
    }

    /// The time, Unix epoch after a failure
    pub fn value(&self) -> DateTime<FixedOffset> {
        self.state.as_ref().map(|s| s.value).unwrap_or_default()
    }
}
