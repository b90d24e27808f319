//! `bmcwatch classify` command handler

use std::io::Write;

use serde::Serialize;

use bmcwatch_core::types::format_sel_timestamp;
use bmcwatch_sel_pipeline::{SelParser, classify};

use crate::cli::ClassifyArgs;
use crate::error::CliError;
use crate::output::{OutputWriter, Render};

/// Execute the `classify` command.
///
/// Parses one raw SEL line and runs it through the category rules without
/// touching the BMC, the sink, or the dedup history. Lets an operator
/// answer "what would this record turn into?" offline.
pub async fn execute(args: ClassifyArgs, writer: &OutputWriter) -> Result<(), CliError> {
    let parser = SelParser::new();
    let event = parser
        .parse_line(1, &args.line)
        .map_err(|e| CliError::Command(e.to_string()))?;

    let alert = classify(&event).map(|alert| ClassifiedAlert {
        code: alert.code.to_string(),
        severity: alert.severity.syslog_label().to_owned(),
        sink_line: alert.sink_line(),
    });

    let report = ClassifyReport {
        timestamp: format_sel_timestamp(event.timestamp),
        category: event.category.to_string(),
        title: event.title,
        message: event.message,
        state: event.state.to_string(),
        alert,
    };

    writer.render(&report)?;

    Ok(())
}

/// Classification result for one raw SEL line.
#[derive(Serialize)]
pub struct ClassifyReport {
    /// Parsed event timestamp (`MM/DD/YYYY HH:MM:SS`)
    pub timestamp: String,
    /// Category derived from the title's first token
    pub category: String,
    /// Parsed title field
    pub title: String,
    /// Parsed message field
    pub message: String,
    /// Parsed state field
    pub state: String,
    /// The alert this record would produce (None = suppressed)
    pub alert: Option<ClassifiedAlert>,
}

/// The alert a classified record would emit.
#[derive(Serialize)]
pub struct ClassifiedAlert {
    /// Normalized alert code (e.g. `TEMP_HIGH`)
    pub code: String,
    /// Severity label as written to the sink prefix
    pub severity: String,
    /// Exact line the sink would receive
    pub sink_line: String,
}

impl Render for ClassifyReport {
    fn render_text(&self, w: &mut dyn Write) -> std::io::Result<()> {
        use colored::Colorize;

        writeln!(
            w,
            "Record: {} | {} | {} | {}",
            self.timestamp, self.title, self.message, self.state
        )?;
        writeln!(w, "  Category: {}", self.category)?;

        match self.alert {
            Some(ref alert) => {
                writeln!(
                    w,
                    "  Outcome: {} ({})",
                    alert.code.yellow().bold(),
                    alert.severity
                )?;
                writeln!(w, "  Sink line: {}", alert.sink_line)?;
            }
            None => {
                writeln!(w, "  Outcome: {}", "suppressed".dimmed())?;
            }
        }

        Ok(())
    }
}
