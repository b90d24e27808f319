//! bmcwatch binary entry point.
//!
//! Parses arguments, brings up logging, then dispatches to the command
//! handlers in [`commands`]. Operator subcommands map failures to the
//! `CliError::exit_code()` table; the scheduled `run` subcommand reports
//! monitor aborts in its output and still exits 0.

mod cli;
mod commands;
mod error;
mod logging;
mod output;

use anyhow::Result;
use clap::Parser;

use bmcwatch_core::config::{BmcwatchConfig, GeneralConfig};

use crate::cli::{Cli, Commands};
use crate::output::OutputWriter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let general = effective_general(&cli).await;
    logging::init_tracing(&general)?;

    tracing::debug!(config = %cli.config.display(), "bmcwatch starting");

    let writer = OutputWriter::new(cli.format);

    let result = match cli.command {
        Commands::Run(args) => commands::run::execute(args, &cli.config, &writer).await,
        Commands::SyncClock => commands::sync_clock::execute(&cli.config, &writer).await,
        Commands::History => commands::history::execute(&cli.config, &writer).await,
        Commands::Classify(args) => commands::classify::execute(args, &writer).await,
        Commands::Config(args) => commands::config::execute(args, &cli.config, &writer).await,
    };

    if let Err(err) = result {
        tracing::error!(error = %err, "command failed");
        eprintln!("bmcwatch: {err}");
        std::process::exit(err.exit_code());
    }

    Ok(())
}

/// Resolve the logging settings before any command runs.
///
/// The `[general]` config section supplies defaults when the file is
/// readable; CLI flags take precedence. A broken or missing config file
/// falls back to built-in defaults here so that `config validate` can
/// still run and report the real error through its own strict load.
async fn effective_general(cli: &Cli) -> GeneralConfig {
    let mut general = match BmcwatchConfig::load(&cli.config).await {
        Ok(config) => config.general,
        Err(_) => GeneralConfig::default(),
    };

    if let Some(level) = &cli.log_level {
        general.log_level = level.clone();
    }
    if let Some(format) = &cli.log_format {
        general.log_format = format.clone();
    }

    general
}
