//! `bmcwatch run` command handler

use std::io::Write;
use std::path::Path;

use serde::Serialize;
use tracing::{error, info};

use bmcwatch_core::config::BmcwatchConfig;
use bmcwatch_sel_pipeline::{
    FileAlertSink, IpmiSelSource, RunOutcome, RunReport, RunStage, SelPipeline, SelPipelineConfig,
};

use crate::cli::RunArgs;
use crate::error::CliError;
use crate::output::{OutputWriter, Render};

/// Execute the `run` command.
///
/// This is the scheduled entry point. Whatever happens to the monitor run,
/// the command renders the outcome and returns success: cron must never see
/// a non-zero exit from a monitor failure. Aborts land in the report and in
/// the tracing stream, nowhere else.
pub async fn execute(
    args: RunArgs,
    config_path: &Path,
    writer: &OutputWriter,
) -> Result<(), CliError> {
    let outcome = run_monitor(args, config_path).await;

    let report = RunCommandReport::from_outcome(outcome);
    writer.render(&report)?;

    Ok(())
}

/// Run one monitor cycle, folding setup failures into an aborted outcome.
async fn run_monitor(args: RunArgs, config_path: &Path) -> RunOutcome {
    let config = match BmcwatchConfig::load(config_path).await {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "configuration load failed; monitor run aborted");
            return RunOutcome::Aborted {
                stage: RunStage::Start,
                reason: format!("configuration: {e}"),
            };
        }
    };

    let mut pipeline_config = SelPipelineConfig::from_core(&config);
    pipeline_config.dry_run = args.dry_run;

    let source = IpmiSelSource::new(&pipeline_config.ipmitool_path);
    let sink = FileAlertSink::new(&pipeline_config.sink_path, &pipeline_config.sink_ident);

    info!(
        dry_run = args.dry_run,
        ipmitool = %pipeline_config.ipmitool_path,
        sink = %pipeline_config.sink_path,
        "starting monitor run"
    );

    match SelPipeline::new(pipeline_config, source, sink) {
        Ok(pipeline) => pipeline.run().await,
        Err(e) => {
            error!(error = %e, "pipeline construction failed; monitor run aborted");
            RunOutcome::Aborted {
                stage: RunStage::Start,
                reason: e.to_string(),
            }
        }
    }
}

/// Rendered outcome of one monitor cycle.
#[derive(Serialize)]
pub struct RunCommandReport {
    /// Whether the run reached the final stage
    pub completed: bool,
    /// Stage reached when the run aborted (absent on completion)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aborted_stage: Option<String>,
    /// Abort reason (absent on completion)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aborted_reason: Option<String>,
    /// Full run report (absent on abort)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report: Option<RunReport>,
}

impl RunCommandReport {
    fn from_outcome(outcome: RunOutcome) -> Self {
        match outcome {
            RunOutcome::Completed(report) => Self {
                completed: true,
                aborted_stage: None,
                aborted_reason: None,
                report: Some(report),
            },
            RunOutcome::Aborted { stage, reason } => Self {
                completed: false,
                aborted_stage: Some(stage.name().to_owned()),
                aborted_reason: Some(reason),
                report: None,
            },
        }
    }
}

impl Render for RunCommandReport {
    fn render_text(&self, w: &mut dyn Write) -> std::io::Result<()> {
        use colored::Colorize;

        if self.completed {
            writeln!(w, "Monitor run: {}", "COMPLETED".green().bold())?;
        } else {
            writeln!(w, "Monitor run: {}", "ABORTED".red().bold())?;
            if let Some(ref stage) = self.aborted_stage {
                writeln!(w, "  Stage reached: {}", stage)?;
            }
            if let Some(ref reason) = self.aborted_reason {
                writeln!(w, "  Reason: {}", reason.red())?;
            }
            return Ok(());
        }

        let Some(ref report) = self.report else {
            return Ok(());
        };

        writeln!(w, "  Run ID: {}", report.run_id)?;

        if let Some(ref clock) = report.clock {
            let drift = format!("{} min", clock.drift_minutes);
            if clock.corrected {
                writeln!(w, "  Clock drift: {} ({})", drift.yellow(), "corrected".yellow())?;
            } else {
                writeln!(w, "  Clock drift: {}", drift)?;
            }
        }

        writeln!(
            w,
            "  Events fetched: {} ({} malformed lines skipped)",
            report.events_fetched, report.parse_skipped
        )?;
        writeln!(w, "  Already alerted: {}", report.already_alerted)?;
        writeln!(w, "  Suppressed: {}", report.suppressed)?;

        if report.dry_run {
            writeln!(
                w,
                "  Emitted: {} ({})",
                report.alerts.len(),
                "dry-run, nothing written".yellow()
            )?;
        } else {
            writeln!(w, "  Emitted: {}", report.emitted)?;
        }

        if !report.alerts.is_empty() {
            writeln!(w)?;
            writeln!(w, "Alerts:")?;
            for alert in &report.alerts {
                writeln!(w, "  {}", alert.sink_line())?;
            }
        }

        Ok(())
    }
}
