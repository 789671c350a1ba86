//! Calc command for computing the remaining day budget.
//!
//! Loads the recorded stays, runs them through [`vd_core::compute_budget_with`]
//! for the requested reference date, and prints the result either as two
//! human-readable lines or as JSON.

use std::io::Write;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::Serialize;
use vd_core::{Budget, WindowRule};
use vd_store::IntervalRepository;

use super::util::{days_label, format_date};

/// Options for a single calculation.
#[derive(Debug, Clone)]
pub struct CalcOptions<'a> {
    pub reference: NaiveDate,
    pub rule: WindowRule,
    pub json: bool,
    pub date_format: &'a str,
}

/// JSON output: the budget plus the inputs that produced it.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CalcReport {
    reference_date: NaiveDate,
    rule: WindowRule,
    #[serde(flatten)]
    budget: Budget,
}

pub fn run<W: Write>(
    writer: &mut W,
    repo: &dyn IntervalRepository,
    options: &CalcOptions<'_>,
) -> Result<Budget> {
    let intervals = repo.load().context("failed to load stays")?;
    let budget = vd_core::compute_budget_with(&intervals, options.reference, options.rule)
        .context("failed to compute budget")?;

    if options.json {
        let report = CalcReport {
            reference_date: options.reference,
            rule: options.rule,
            budget,
        };
        serde_json::to_writer_pretty(&mut *writer, &report)?;
        writeln!(writer)?;
    } else {
        write_human(writer, &budget, options.date_format)?;
    }

    Ok(budget)
}

fn write_human<W: Write>(writer: &mut W, budget: &Budget, date_format: &str) -> Result<()> {
    writeln!(
        writer,
        "You have {} available.",
        days_label(budget.remaining_days)
    )?;
    writeln!(
        writer,
        "You can return at {}.",
        format_date(budget.available_from, date_format)?
    )?;
    if budget.is_over_allowance() {
        writeln!(
            writer,
            "You are {} over the allowance.",
            days_label(-budget.remaining_days)
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use insta::assert_snapshot;
    use vd_core::DateInterval;
    use vd_store::MemoryStore;

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn january() -> MemoryStore {
        MemoryStore::new(vec![
            DateInterval::new(d("2024-01-01"), d("2024-01-30")).unwrap(),
        ])
    }

    fn options(reference: &str) -> CalcOptions<'static> {
        CalcOptions {
            reference: d(reference),
            rule: WindowRule::default(),
            json: false,
            date_format: "%Y-%m-%d",
        }
    }

    fn render(repo: &MemoryStore, options: &CalcOptions<'_>) -> String {
        let mut output = Vec::new();
        run(&mut output, repo, options).unwrap();
        String::from_utf8(output).unwrap()
    }

    #[test]
    fn test_calc_human_output() {
        assert_snapshot!(render(&january(), &options("2024-01-01")).trim_end(), @r"
        You have 60 days available.
        You can return at 2024-03-01.
        ");
    }

    #[test]
    fn test_calc_empty_store_gives_full_budget() {
        assert_snapshot!(render(&MemoryStore::default(), &options("2024-09-01")).trim_end(), @r"
        You have 90 days available.
        You can return at 2024-09-01.
        ");
    }

    #[test]
    fn test_calc_over_allowance() {
        let repo = MemoryStore::new(vec![
            DateInterval::new(d("2024-01-01"), d("2024-04-09")).unwrap(),
        ]);
        assert_snapshot!(render(&repo, &options("2024-04-01")).trim_end(), @r"
        You have -10 days available.
        You can return at 2024-03-22.
        You are 10 days over the allowance.
        ");
    }

    #[test]
    fn test_calc_rule_changes_result() {
        let mut opts = options("2024-09-01");
        assert!(render(&january(), &opts).starts_with("You have 60 days"));

        opts.rule = WindowRule::Span;
        assert!(render(&january(), &opts).starts_with("You have 90 days"));
    }

    #[test]
    fn test_calc_json_output() {
        let mut opts = options("2024-01-01");
        opts.json = true;
        assert_snapshot!(render(&january(), &opts).trim_end(), @r#"
        {
          "referenceDate": "2024-01-01",
          "rule": "forward-reach",
          "remainingDays": 60,
          "availableFrom": "2024-03-01",
          "consumedDays": 30,
          "countedIntervals": 1
        }
        "#);
    }

    #[test]
    fn test_calc_uses_date_format() {
        let mut opts = options("2024-01-01");
        opts.date_format = "%d.%m.%Y";
        assert!(render(&january(), &opts).contains("You can return at 01.03.2024."));
    }
}
