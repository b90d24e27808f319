//! CLI argument parsing using clap derive API
//!
//! This module defines the command-line interface structure using clap's derive macros.
//! It is purely declarative with no side effects or I/O.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

/// bmcwatch -- BMC System Event Log monitor.
///
/// Use `bmcwatch <COMMAND> --help` for subcommand details.
#[derive(Parser, Debug)]
#[command(name = "bmcwatch", version, about, long_about = None)]
pub struct Cli {
    /// Path to the bmcwatch.toml configuration file.
    #[arg(short, long, default_value = "/etc/bmcwatch/bmcwatch.toml")]
    pub config: PathBuf,

    /// Override log level (trace, debug, info, warn, error).
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Override log format (json, pretty).
    #[arg(long, global = true)]
    pub log_format: Option<String>,

    /// Output format.
    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,

    #[command(subcommand)]
    pub command: Commands,
}

/// Supported output formats.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output.
    Text,
    /// Machine-readable JSON.
    Json,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run one monitor cycle (the scheduled entry point, always exits 0).
    Run(RunArgs),

    /// Reconcile the BMC clock against the host clock.
    SyncClock,

    /// Print the alert history reconstructed from the sink file.
    History,

    /// Parse and classify a single raw SEL line without touching the BMC.
    Classify(ClassifyArgs),

    /// Manage configuration.
    Config(ConfigArgs),
}

// ---- run ----

/// Run one full monitor cycle.
#[derive(Args, Debug)]
pub struct RunArgs {
    /// Classify and report without writing to the alert sink.
    #[arg(long)]
    pub dry_run: bool,
}

// ---- classify ----

/// Classify a single raw SEL line.
#[derive(Args, Debug)]
pub struct ClassifyArgs {
    /// Raw SEL record line (`<id> | <date> | <time> | <title> | <message> | <state>`).
    #[arg(long)]
    pub line: String,
}

// ---- config ----

/// Manage bmcwatch configuration.
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Validate the configuration file and report errors.
    Validate,
    /// Show the effective configuration (file + env overrides + defaults).
    Show {
        /// Show only a specific section (general, bmc, sel, sink).
        #[arg(long)]
        section: Option<String>,
    },
}
