//! CLI subcommand implementations.

pub mod add;
pub mod calc;
pub mod export;
pub mod import;
pub mod list;
pub mod remove;
pub mod reset;
pub mod util;
