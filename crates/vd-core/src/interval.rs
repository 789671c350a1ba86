//! Inclusive calendar-day intervals with validation.

use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Validation errors for core types.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The interval ends before it starts.
    #[error("interval ends before it starts: {from} > {to}")]
    Reversed { from: NaiveDate, to: NaiveDate },

    /// A date field could not be read as a calendar date.
    #[error("{field} is not a valid date: {value:?}")]
    InvalidDate { field: &'static str, value: String },

    /// Unknown window rule name.
    #[error("invalid window rule: {value}")]
    UnknownWindowRule { value: String },
}

/// A single continuous stay, inclusive of both endpoints.
///
/// `from <= to` always holds; a one-day stay has `from == to`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawInterval")]
pub struct DateInterval {
    from: NaiveDate,
    to: NaiveDate,
}

impl DateInterval {
    /// Creates a new interval, rejecting reversed endpoints.
    pub fn new(from: NaiveDate, to: NaiveDate) -> Result<Self, ValidationError> {
        if from > to {
            return Err(ValidationError::Reversed { from, to });
        }
        Ok(Self { from, to })
    }

    /// Creates a one-day interval.
    pub const fn single_day(day: NaiveDate) -> Self {
        Self { from: day, to: day }
    }

    /// Parses both endpoints from strings and validates the result.
    pub fn parse(from: &str, to: &str) -> Result<Self, ValidationError> {
        let from = parse_calendar_date("from", from)?;
        let to = parse_calendar_date("to", to)?;
        Self::new(from, to)
    }

    pub const fn from(&self) -> NaiveDate {
        self.from
    }

    pub const fn to(&self) -> NaiveDate {
        self.to
    }

    /// Number of calendar days covered, counting both endpoints.
    pub fn len_days(&self) -> i64 {
        self.to.signed_duration_since(self.from).num_days() + 1
    }
}

impl fmt::Display for DateInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} .. {}", self.from, self.to)
    }
}

/// Wire shape accepted on deserialization.
///
/// Dates are strings so that browser-style date-times are normalized through
/// [`parse_calendar_date`] instead of failing outright.
#[derive(Deserialize)]
struct RawInterval {
    from: String,
    to: String,
}

impl TryFrom<RawInterval> for DateInterval {
    type Error = ValidationError;

    fn try_from(raw: RawInterval) -> Result<Self, Self::Error> {
        Self::parse(&raw.from, &raw.to)
    }
}

/// Reads an ISO-8601 string as a calendar date.
///
/// Accepts `YYYY-MM-DD`, RFC 3339 date-times (the date is taken in the
/// string's own offset), and offset-less `YYYY-MM-DDTHH:MM:SS` date-times.
/// Time of day is discarded.
pub fn parse_calendar_date(field: &'static str, value: &str) -> Result<NaiveDate, ValidationError> {
    let trimmed = value.trim();

    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Ok(date);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(dt.date_naive());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S%.f") {
        return Ok(dt.date());
    }

    Err(ValidationError::InvalidDate {
        field,
        value: value.to_string(),
    })
}
