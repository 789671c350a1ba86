//! Reset command for deleting every recorded stay.

use std::io::Write;

use anyhow::{Context, Result};
use vd_store::IntervalRepository;

use super::util::stays_label;

/// Clears the stored list. Returns how many stays were removed.
///
/// An unreadable store is overwritten rather than reported, so a corrupt file
/// can always be reset.
pub fn run<W: Write>(writer: &mut W, repo: &dyn IntervalRepository) -> Result<usize> {
    let previous = repo.load().map(|intervals| intervals.len()).unwrap_or_else(|e| {
        tracing::warn!(error = %e, "discarding unreadable stays");
        0
    });
    repo.save(&[]).context("failed to save stays")?;

    tracing::info!(previous, "reset stays");
    writeln!(writer, "Removed {}.", stays_label(previous))?;
    Ok(previous)
}

#[cfg(test)]
mod tests {
    use super::*;

    use chrono::NaiveDate;
    use vd_core::DateInterval;
    use vd_store::{JsonFileStore, MemoryStore};

    #[test]
    fn test_reset_clears_all_stays() {
        let day = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let repo = MemoryStore::new(vec![DateInterval::single_day(day); 3]);
        let mut output = Vec::new();

        assert_eq!(run(&mut output, &repo).unwrap(), 3);
        assert!(repo.load().unwrap().is_empty());
        assert_eq!(String::from_utf8(output).unwrap(), "Removed 3 stays.\n");
    }

    #[test]
    fn test_reset_single_stay_is_singular() {
        let day = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let repo = MemoryStore::new(vec![DateInterval::single_day(day)]);
        let mut output = Vec::new();

        run(&mut output, &repo).unwrap();
        assert_eq!(String::from_utf8(output).unwrap(), "Removed 1 stay.\n");
    }

    #[test]
    fn test_reset_recovers_corrupt_store() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("intervals.json");
        std::fs::write(&path, "{ broken").unwrap();
        let repo = JsonFileStore::new(&path);
        let mut output = Vec::new();

        assert_eq!(run(&mut output, &repo).unwrap(), 0);
        assert!(repo.load().unwrap().is_empty());
    }
}
