//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use vd_core::WindowRule;

/// Short-stay day calculator.
///
/// Tracks past and planned stays and reports how many days remain under the
/// 90-days-in-180 rule as of a given date.
#[derive(Debug, Parser)]
#[command(name = "vd", version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to config file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Record a stay.
    Add {
        /// First day of the stay (e.g., 2024-01-01, "today", "3 days ago").
        #[arg(long)]
        from: String,

        /// Last day of the stay, inclusive. Defaults to the first day.
        #[arg(long)]
        to: Option<String>,
    },

    /// Delete a recorded stay by its position in `vd list`.
    Remove {
        /// 1-based position.
        index: usize,
    },

    /// Show recorded stays.
    List {
        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Delete all recorded stays.
    Reset,

    /// Calculate the remaining day budget.
    Calc {
        /// Date of the next trip. Defaults to today.
        #[arg(long)]
        next: Option<String>,

        /// Output as JSON.
        #[arg(long)]
        json: bool,

        /// Counting rule: `forward-reach` (default) or `span`. Overrides the config.
        #[arg(long)]
        rule: Option<WindowRule>,
    },

    /// Replace recorded stays with those from a JSON file.
    Import {
        /// File to read, or `-` for stdin.
        file: PathBuf,
    },

    /// Write recorded stays to a JSON file.
    Export {
        /// File to write, or `-` for stdout.
        #[arg(default_value = "dates.json")]
        file: PathBuf,
    },
}
