use std::io::{self, Write};
use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use vd_cli::commands::{add, calc, export, import, list, remove, reset, util};
use vd_cli::{Cli, Commands, Config};
use vd_core::DateInterval;
use vd_store::JsonFileStore;

/// Load config and open the interval store.
fn open_store(config_path: Option<&Path>) -> Result<(JsonFileStore, Config)> {
    let config = Config::load_from(config_path).context("failed to load configuration")?;
    tracing::debug!(?config, "loaded configuration");

    let store = JsonFileStore::new(&config.store_path);
    Ok((store, config))
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    // Logs go to stderr so JSON on stdout stays machine-readable.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();

    let Some(command) = &cli.command else {
        use clap::CommandFactory;
        Cli::command().print_help()?;
        println!();
        return Ok(());
    };

    let (store, config) = open_store(cli.config.as_deref())?;
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match command {
        Commands::Add { from, to } => {
            let today = util::today();
            let from = util::parse_date(from, today)?;
            let to = match to {
                Some(to) => util::parse_date(to, today)?,
                None => from,
            };
            let interval = DateInterval::new(from, to)?;
            add::run(&mut out, &store, interval)?;
        }
        Commands::Remove { index } => {
            remove::run(&mut out, &store, *index)?;
        }
        Commands::List { json } => {
            list::run(&mut out, &store, *json, &config.date_format)?;
        }
        Commands::Reset => {
            reset::run(&mut out, &store)?;
        }
        Commands::Calc { next, json, rule } => {
            let today = util::today();
            let reference = match next {
                Some(next) => util::parse_date(next, today)?,
                None => today,
            };
            let options = calc::CalcOptions {
                reference,
                rule: rule.unwrap_or(config.window_rule),
                json: *json,
                date_format: &config.date_format,
            };
            calc::run(&mut out, &store, &options)?;
        }
        Commands::Import { file } => {
            import::run(&mut out, &store, file)?;
        }
        Commands::Export { file } => {
            export::run(&mut out, &store, file)?;
        }
    }

    out.flush()?;
    Ok(())
}
