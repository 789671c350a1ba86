//! Remove command for deleting a single stay.

use std::io::Write;

use anyhow::{Context, Result};
use vd_core::DateInterval;
use vd_store::IntervalRepository;

/// Removes the stay at 1-based `index` and saves the remaining list.
pub fn run<W: Write>(
    writer: &mut W,
    repo: &dyn IntervalRepository,
    index: usize,
) -> Result<DateInterval> {
    let mut intervals = repo.load().context("failed to load stays")?;
    if index == 0 || index > intervals.len() {
        anyhow::bail!(
            "no stay at position {index}; {} recorded (see `vd list`)",
            intervals.len()
        );
    }

    let removed = intervals.remove(index - 1);
    repo.save(&intervals).context("failed to save stays")?;

    tracing::info!(%removed, index, "removed stay");
    writeln!(writer, "Removed stay {index}: {removed}")?;
    Ok(removed)
}
