//! Shared utilities for CLI commands.

use std::fmt::Write as _;
use std::sync::LazyLock;

use anyhow::Context;
use chrono::{Days, Local, NaiveDate};
use regex::Regex;

/// Pre-compiled regex for relative date parsing.
static RELATIVE_DATE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:(\d+)\s+(day|week)s?\s+ago|in\s+(\d+)\s+(day|week)s?)$").unwrap()
});

/// Conservative bound for relative dates (~1000 years in days).
const MAX_RELATIVE_DAYS: u64 = 1000 * 366;

/// Today's date in the local timezone.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Parse a date string as ISO 8601 or relative to `today`.
///
/// Supports:
/// - ISO 8601: "2024-01-15", "2024-01-15T00:00:00.000Z"
/// - Keywords: "today", "tomorrow", "yesterday"
/// - Relative: "3 days ago", "2 weeks ago", "in 10 days", "in 1 week"
pub fn parse_date(s: &str, today: NaiveDate) -> anyhow::Result<NaiveDate> {
    let s = s.trim();

    if let Ok(date) = vd_core::parse_calendar_date("date", s) {
        return Ok(date);
    }

    let lowered = s.to_ascii_lowercase();
    match lowered.as_str() {
        "today" => return Ok(today),
        "tomorrow" => return shift(today, 1),
        "yesterday" => return shift(today, -1),
        _ => {}
    }

    let Some(caps) = RELATIVE_DATE_RE.captures(&lowered) else {
        anyhow::bail!(
            "Invalid date: {s}. Use ISO 8601 (e.g., 2024-01-15), 'today', or relative (e.g., '3 days ago', 'in 2 weeks')"
        );
    };

    let (n, unit, sign) = match (caps.get(1), caps.get(2), caps.get(3), caps.get(4)) {
        (Some(n), Some(unit), _, _) => (n, unit, -1),
        (_, _, Some(n), Some(unit)) => (n, unit, 1),
        _ => anyhow::bail!("Invalid date: {s}"),
    };

    let n: u64 = n
        .as_str()
        .parse()
        .context("failed to parse number in relative date")?;
    let days_per_unit = if unit.as_str() == "week" { 7 } else { 1 };
    let days = n.saturating_mul(days_per_unit);

    if days > MAX_RELATIVE_DAYS {
        anyhow::bail!("Relative date too far away: {s}");
    }

    let days = i64::try_from(days).context("relative date out of range")?;
    shift(today, sign * days)
}

fn shift(date: NaiveDate, days: i64) -> anyhow::Result<NaiveDate> {
    let offset = Days::new(days.unsigned_abs());
    if days >= 0 {
        date.checked_add_days(offset)
    } else {
        date.checked_sub_days(offset)
    }
    .with_context(|| format!("date out of range: {date} {days:+} days"))
}

/// Formats a date with a user-supplied `strftime` pattern.
///
/// Invalid patterns are reported as errors instead of panicking.
pub fn format_date(date: NaiveDate, format: &str) -> anyhow::Result<String> {
    let mut out = String::new();
    write!(out, "{}", date.format(format))
        .map_err(|_| anyhow::anyhow!("invalid date_format: {format:?}"))?;
    Ok(out)
}

/// Singular/plural day count, e.g. "1 day", "30 days".
pub fn days_label(n: i64) -> String {
    if n.abs() == 1 {
        format!("{n} day")
    } else {
        format!("{n} days")
    }
}

/// Singular/plural stay count, e.g. "1 stay", "2 stays".
pub fn stays_label(n: usize) -> String {
    if n == 1 {
        format!("{n} stay")
    } else {
        format!("{n} stays")
    }
}
