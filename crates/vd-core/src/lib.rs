//! Core domain logic for the stay-budget calculator.
//!
//! This crate contains the fundamental types and logic for:
//! - Intervals: validated, inclusive calendar-day stays
//! - Budget: days remaining under the 90/180 rule for a reference date
//! - Records: the `{"from", "to"}` JSON shape used for import and storage

mod budget;
pub mod interval;
pub mod record;

pub use budget::{
    Budget, BudgetError, LOOKBACK_DAYS, MAX_DAYS, WindowRule, compute_budget, compute_budget_with,
};
pub use interval::{DateInterval, ValidationError, parse_calendar_date};
pub use record::{InputShapeError, parse_records};
