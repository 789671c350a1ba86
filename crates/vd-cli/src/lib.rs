//! Stay-budget calculator CLI library.
//!
//! This crate provides the CLI interface for the 90/180 day-budget engine.

mod cli;
pub mod commands;
mod config;

pub use cli::{Cli, Commands};
pub use config::Config;
