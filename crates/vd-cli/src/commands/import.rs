//! Import command for replacing recorded stays from a JSON file.

use std::io::{self, Read, Write};
use std::path::Path;

use anyhow::{Context, Result};
use vd_store::IntervalRepository;

use super::util::stays_label;

/// Imports from `path`, or stdin when `path` is `-`.
pub fn run<W: Write>(writer: &mut W, repo: &dyn IntervalRepository, path: &Path) -> Result<usize> {
    let count = if path == Path::new("-") {
        import_from(io::stdin().lock(), repo).context("invalid interval data on stdin")?
    } else {
        let file = std::fs::File::open(path)
            .with_context(|| format!("failed to open {}", path.display()))?;
        import_from(file, repo).with_context(|| format!("invalid interval file {}", path.display()))?
    };

    writeln!(writer, "Imported {}.", stays_label(count))?;
    Ok(count)
}

/// Parses a JSON array of `{"from", "to"}` records and replaces the stored list.
///
/// Every record is validated first; nothing is saved if any record is bad.
fn import_from<R: Read>(mut reader: R, repo: &dyn IntervalRepository) -> Result<usize> {
    let mut content = String::new();
    reader
        .read_to_string(&mut content)
        .context("failed to read input")?;

    let intervals = vd_core::parse_records(&content)?;
    repo.save(&intervals).context("failed to save stays")?;

    tracing::info!(count = intervals.len(), "imported stays");
    Ok(intervals.len())
}
