//! Add command for recording a stay.

use std::io::Write;

use anyhow::{Context, Result};
use vd_core::DateInterval;
use vd_store::IntervalRepository;

use super::util::days_label;

/// Appends `interval` to the stored list and saves it.
///
/// Returns the 1-based position of the new stay.
pub fn run<W: Write>(
    writer: &mut W,
    repo: &dyn IntervalRepository,
    interval: DateInterval,
) -> Result<usize> {
    let mut intervals = repo.load().context("failed to load stays")?;
    intervals.push(interval);
    repo.save(&intervals).context("failed to save stays")?;

    let position = intervals.len();
    tracing::info!(%interval, position, "added stay");
    writeln!(
        writer,
        "Added stay {position}: {interval} ({})",
        days_label(interval.len_days())
    )?;
    Ok(position)
}
