//! List command for showing recorded stays.

use std::io::Write;

use anyhow::{Context, Result};
use vd_core::DateInterval;
use vd_store::IntervalRepository;

use super::util::{days_label, format_date};

pub fn run<W: Write>(
    writer: &mut W,
    repo: &dyn IntervalRepository,
    json: bool,
    date_format: &str,
) -> Result<()> {
    let intervals = repo.load().context("failed to load stays")?;

    if json {
        serde_json::to_writer_pretty(&mut *writer, &intervals)?;
        writeln!(writer)?;
        return Ok(());
    }

    write_human(writer, &intervals, date_format)
}

fn write_human<W: Write>(
    writer: &mut W,
    intervals: &[DateInterval],
    date_format: &str,
) -> Result<()> {
    if intervals.is_empty() {
        writeln!(writer, "No stays recorded.")?;
        return Ok(());
    }

    writeln!(writer, "Stays ({}):", intervals.len())?;
    for (idx, interval) in intervals.iter().enumerate() {
        writeln!(
            writer,
            "{:>3}. {} .. {} ({})",
            idx + 1,
            format_date(interval.from(), date_format)?,
            format_date(interval.to(), date_format)?,
            days_label(interval.len_days())
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use chrono::NaiveDate;
    use insta::assert_snapshot;
    use vd_store::MemoryStore;

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn store() -> MemoryStore {
        MemoryStore::new(vec![
            DateInterval::new(d("2024-01-01"), d("2024-01-30")).unwrap(),
            DateInterval::single_day(d("2024-03-15")),
        ])
    }

    fn render(repo: &MemoryStore, json: bool, date_format: &str) -> String {
        let mut output = Vec::new();
        run(&mut output, repo, json, date_format).unwrap();
        String::from_utf8(output).unwrap()
    }

    #[test]
    fn test_list_human_output() {
        assert_snapshot!(render(&store(), false, "%Y-%m-%d").trim_end(), @r"
        Stays (2):
          1. 2024-01-01 .. 2024-01-30 (30 days)
          2. 2024-03-15 .. 2024-03-15 (1 day)
        ");
    }

    #[test]
    fn test_list_respects_date_format() {
        let output = render(&store(), false, "%d/%m/%Y");
        assert!(output.contains("01/01/2024 .. 30/01/2024"));
    }

    #[test]
    fn test_list_empty() {
        assert_eq!(
            render(&MemoryStore::default(), false, "%Y-%m-%d"),
            "No stays recorded.\n"
        );
    }

    #[test]
    fn test_list_json_matches_import_shape() {
        let output = render(&store(), true, "%Y-%m-%d");
        let parsed = vd_core::parse_records(&output).unwrap();
        assert_eq!(parsed, store().load().unwrap());
    }
}
