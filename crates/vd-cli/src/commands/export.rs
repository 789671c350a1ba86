//! Export command for writing recorded stays to a JSON file.

use std::io::{self, Write};
use std::path::Path;

use anyhow::{Context, Result};
use vd_core::DateInterval;
use vd_store::IntervalRepository;

use super::util::stays_label;

/// Exports to `path`, or to `writer` when `path` is `-`.
pub fn run<W: Write>(writer: &mut W, repo: &dyn IntervalRepository, path: &Path) -> Result<usize> {
    let intervals = repo.load().context("failed to load stays")?;

    if path == Path::new("-") {
        write_intervals(writer, &intervals)?;
    } else {
        let mut file = std::fs::File::create(path)
            .with_context(|| format!("failed to create {}", path.display()))?;
        write_intervals(&mut file, &intervals)
            .with_context(|| format!("failed to write {}", path.display()))?;
        tracing::info!(path = %path.display(), count = intervals.len(), "exported stays");
        writeln!(
            writer,
            "Exported {} to {}.",
            stays_label(intervals.len()),
            path.display()
        )?;
    }

    Ok(intervals.len())
}

fn write_intervals<W: Write>(writer: &mut W, intervals: &[DateInterval]) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *writer, intervals)?;
    writeln!(writer)
}

#[cfg(test)]
mod tests {
    use super::*;

    use chrono::NaiveDate;
    use insta::assert_snapshot;
    use vd_store::MemoryStore;

    fn store() -> MemoryStore {
        let day = |m, d| NaiveDate::from_ymd_opt(2024, m, d).unwrap();
        MemoryStore::new(vec![
            DateInterval::new(day(1, 1), day(1, 30)).unwrap(),
            DateInterval::single_day(day(3, 15)),
        ])
    }

    #[test]
    fn test_export_to_stdout() {
        let mut output = Vec::new();
        assert_eq!(run(&mut output, &store(), Path::new("-")).unwrap(), 2);
        assert_snapshot!(String::from_utf8(output).unwrap().trim_end(), @r#"
        [
          {
            "from": "2024-01-01",
            "to": "2024-01-30"
          },
          {
            "from": "2024-03-15",
            "to": "2024-03-15"
          }
        ]
        "#);
    }

    #[test]
    fn test_export_to_file_can_be_imported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dates.json");
        let mut output = Vec::new();

        run(&mut output, &store(), &path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(vd_core::parse_records(&content).unwrap(), store().load().unwrap());
        assert!(String::from_utf8(output).unwrap().starts_with("Exported 2 stays to "));
    }

    #[test]
    fn test_export_single_stay_is_singular() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dates.json");
        let repo = MemoryStore::new(vec![DateInterval::single_day(
            NaiveDate::from_ymd_opt(2024, 3, 15).unwrap(),
        )]);
        let mut output = Vec::new();

        run(&mut output, &repo, &path).unwrap();
        assert!(String::from_utf8(output).unwrap().starts_with("Exported 1 stay to "));
    }
}
