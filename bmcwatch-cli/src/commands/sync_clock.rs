//! `bmcwatch sync-clock` command handler

use std::io::Write;
use std::path::Path;

use serde::Serialize;
use tracing::info;

use bmcwatch_core::config::BmcwatchConfig;
use bmcwatch_core::types::format_sel_timestamp;
use bmcwatch_sel_pipeline::{IpmiSelSource, reconcile};

use crate::error::CliError;
use crate::output::{OutputWriter, Render};

/// Execute the `sync-clock` command.
///
/// Reads the BMC clock, compares it against the host clock, and issues one
/// set command when the rounded drift is non-zero. This is the same
/// reconciliation step every monitor run performs first; exposed here so an
/// operator can check and fix the clock without touching the SEL.
pub async fn execute(config_path: &Path, writer: &OutputWriter) -> Result<(), CliError> {
    let config = BmcwatchConfig::load(config_path).await?;
    let source = IpmiSelSource::new(&config.bmc.ipmitool_path);

    info!(ipmitool = %config.bmc.ipmitool_path, "reconciling bmc clock");

    let sync = reconcile(&source).await?;

    let report = ClockSyncReport {
        bmc_time: format_sel_timestamp(sync.bmc_time),
        drift_minutes: sync.drift_minutes,
        corrected: sync.corrected,
    };

    writer.render(&report)?;

    Ok(())
}

/// Clock reconciliation result.
#[derive(Serialize)]
pub struct ClockSyncReport {
    /// BMC-reported time (`MM/DD/YYYY HH:MM:SS`)
    pub bmc_time: String,
    /// Rounded drift against the host clock, positive when the BMC is ahead
    pub drift_minutes: i64,
    /// Whether a set command was issued
    pub corrected: bool,
}

impl Render for ClockSyncReport {
    fn render_text(&self, w: &mut dyn Write) -> std::io::Result<()> {
        use colored::Colorize;

        writeln!(w, "BMC clock: {}", self.bmc_time.bold())?;
        writeln!(w, "  Drift: {} min", self.drift_minutes)?;

        if self.corrected {
            writeln!(w, "  Action: {}", "clock set to host time".yellow().bold())?;
        } else {
            writeln!(w, "  Action: {}", "none (within tolerance)".green())?;
        }

        Ok(())
    }
}
