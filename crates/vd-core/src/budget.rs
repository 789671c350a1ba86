//! Day-budget computation under the 90/180 rule.
//!
//! The computation anchors on a single reference date and sums the lengths of
//! every stay whose start the [`WindowRule`] admits. It is an approximation of
//! the rolling-window rule: each stay is counted in full or not at all, and
//! overlapping stays are not merged.

use std::fmt;

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::interval::{DateInterval, ValidationError};

/// Maximum days of stay allowed within the window.
pub const MAX_DAYS: i64 = 90;

/// Length of the window, in days, measured from the reference date.
pub const LOOKBACK_DAYS: i64 = 180;

/// Errors raised while computing a budget.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BudgetError {
    /// The projected date does not fit in the supported calendar range.
    #[error("projected date out of range: {reference} {offset_days:+} days")]
    DateOutOfRange {
        reference: NaiveDate,
        offset_days: i64,
    },
}

/// Which stays count toward consumption for a given reference date.
///
/// Both rules look at the signed distance from the reference date to the
/// start of a stay (`from - reference`, negative for past starts).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WindowRule {
    /// Counts every stay starting no later than [`LOOKBACK_DAYS`] after the
    /// reference date, including arbitrarily old ones.
    #[default]
    ForwardReach,
    /// Counts stays starting at most [`LOOKBACK_DAYS`] before or after the
    /// reference date.
    Span,
}

impl WindowRule {
    /// String representation used in config files and on the command line.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Span => "span",
            Self::ForwardReach => "forward-reach",
        }
    }

    /// Whether a stay starting `days_from_reference` days after the reference
    /// date counts.
    #[must_use]
    pub const fn admits(self, days_from_reference: i64) -> bool {
        match self {
            Self::Span => days_from_reference.abs() <= LOOKBACK_DAYS,
            Self::ForwardReach => days_from_reference <= LOOKBACK_DAYS,
        }
    }
}

impl fmt::Display for WindowRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for WindowRule {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "span" => Ok(Self::Span),
            "forward-reach" => Ok(Self::ForwardReach),
            _ => Err(ValidationError::UnknownWindowRule {
                value: s.to_string(),
            }),
        }
    }
}

/// Result of a budget computation.
///
/// `remaining_days` and `available_from` are passed through unclamped: a
/// negative remainder and an `available_from` before the reference date both
/// mean the traveler is over the allowance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Budget {
    /// `MAX_DAYS - consumed_days`.
    pub remaining_days: i64,
    /// Reference date shifted by `remaining_days`.
    pub available_from: NaiveDate,
    /// Sum of the lengths of all counted stays.
    pub consumed_days: i64,
    /// How many stays were counted.
    pub counted_intervals: usize,
}

impl Budget {
    pub const fn is_over_allowance(&self) -> bool {
        self.remaining_days < 0
    }
}

/// Computes the budget for `reference` using the default [`WindowRule`].
pub fn compute_budget(
    intervals: &[DateInterval],
    reference: NaiveDate,
) -> Result<Budget, BudgetError> {
    compute_budget_with(intervals, reference, WindowRule::default())
}

/// Computes the budget for `reference` using an explicit [`WindowRule`].
///
/// Input may be unsorted and overlapping; every admitted stay contributes its
/// full inclusive length.
pub fn compute_budget_with(
    intervals: &[DateInterval],
    reference: NaiveDate,
    rule: WindowRule,
) -> Result<Budget, BudgetError> {
    let mut consumed_days = 0;
    let mut counted_intervals = 0;

    for interval in intervals {
        let days_from_reference = interval.from().signed_duration_since(reference).num_days();
        if rule.admits(days_from_reference) {
            consumed_days += interval.len_days();
            counted_intervals += 1;
        }
    }

    let remaining_days = MAX_DAYS - consumed_days;
    let offset = Days::new(remaining_days.unsigned_abs());
    let available_from = if remaining_days >= 0 {
        reference.checked_add_days(offset)
    } else {
        reference.checked_sub_days(offset)
    }
    .ok_or(BudgetError::DateOutOfRange {
        reference,
        offset_days: remaining_days,
    })?;

    tracing::debug!(
        %reference,
        %rule,
        intervals = intervals.len(),
        counted_intervals,
        consumed_days,
        remaining_days,
        "computed budget"
    );

    Ok(Budget {
        remaining_days,
        available_from,
        consumed_days,
        counted_intervals,
    })
}
