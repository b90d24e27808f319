//! `bmcwatch history` command handler

use std::io::Write;
use std::path::Path;

use serde::Serialize;
use tracing::info;

use bmcwatch_core::config::BmcwatchConfig;
use bmcwatch_core::pipeline::AlertSink;
use bmcwatch_core::types::{ALERT_TAG_PREFIX, format_sel_timestamp};
use bmcwatch_sel_pipeline::{FileAlertSink, HistoryScanner};

use crate::error::CliError;
use crate::output::{OutputWriter, Render};

/// Execute the `history` command.
///
/// Reconstructs the dedup history exactly the way a monitor run does: read
/// the tagged lines back from the sink file, extract one timestamp per
/// line. Useful for checking why an event was (or was not) re-alerted.
pub async fn execute(config_path: &Path, writer: &OutputWriter) -> Result<(), CliError> {
    let config = BmcwatchConfig::load(config_path).await?;
    let sink = FileAlertSink::new(&config.sink.path, &config.sink.ident);

    info!(sink = %config.sink.path, "reconstructing alert history");

    let lines = sink.read_tagged(ALERT_TAG_PREFIX).await?;
    let scanner = HistoryScanner::new()?;
    let history = scanner.scan(&lines);

    let mut timestamps: Vec<_> = history.into_iter().collect();
    timestamps.sort();

    let report = HistoryReport {
        sink_path: config.sink.path.clone(),
        tagged_lines: lines.len(),
        entries: timestamps.into_iter().map(format_sel_timestamp).collect(),
    };

    writer.render(&report)?;

    Ok(())
}

/// Reconstructed alert history.
#[derive(Serialize)]
pub struct HistoryReport {
    /// Alert sink file the history was read from
    pub sink_path: String,
    /// Number of tagged alert lines found in the sink
    pub tagged_lines: usize,
    /// Distinct event timestamps, sorted ascending (`MM/DD/YYYY HH:MM:SS`)
    pub entries: Vec<String>,
}

impl Render for HistoryReport {
    fn render_text(&self, w: &mut dyn Write) -> std::io::Result<()> {
        use colored::Colorize;

        writeln!(w, "Alert history: {}", self.sink_path.bold())?;
        writeln!(w, "  Tagged lines: {}", self.tagged_lines)?;
        writeln!(w, "  Distinct timestamps: {}", self.entries.len())?;

        if self.entries.is_empty() {
            writeln!(w)?;
            writeln!(w, "{}", "No prior alerts found.".green())?;
        } else {
            for entry in &self.entries {
                writeln!(w, "    {}", entry)?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_history_report_render_with_entries() {
        let report = HistoryReport {
            sink_path: "/var/log/bmcwatch/alerts.log".to_owned(),
            tagged_lines: 3,
            entries: vec![
                "03/01/2024 10:00:00".to_owned(),
                "03/01/2024 10:00:01".to_owned(),
            ],
        };

        let mut buffer = Vec::new();
        report
            .render_text(&mut buffer)
            .expect("text rendering should succeed");

        let output = String::from_utf8(buffer).expect("valid UTF-8");
        assert!(output.contains("Tagged lines: 3"));
        assert!(output.contains("Distinct timestamps: 2"));
        assert!(output.contains("03/01/2024 10:00:00"));
        assert!(output.contains("03/01/2024 10:00:01"));
    }

    #[test]
    fn test_history_report_render_empty() {
        let report = HistoryReport {
            sink_path: "/tmp/alerts.log".to_owned(),
            tagged_lines: 0,
            entries: Vec::new(),
        };

        let mut buffer = Vec::new();
        report
            .render_text(&mut buffer)
            .expect("text rendering should succeed");

        let output = String::from_utf8(buffer).expect("valid UTF-8");
        assert!(output.contains("No prior alerts found."));
    }

    #[test]
    fn test_history_report_json_shape() {
        let report = HistoryReport {
            sink_path: "/tmp/alerts.log".to_owned(),
            tagged_lines: 2,
            entries: vec!["03/01/2024 10:00:00".to_owned()],
        };

        let json = serde_json::to_string(&report).expect("JSON serialization should succeed");
        let parsed: serde_json::Value = serde_json::from_str(&json).expect("should parse JSON");

        assert_eq!(parsed["tagged_lines"].as_u64(), Some(2));
        assert_eq!(
            parsed["entries"]
                .as_array()
                .expect("entries should be array")
                .len(),
            1
        );
    }
}
