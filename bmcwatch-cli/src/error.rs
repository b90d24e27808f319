//! CLI-specific error types and exit code mapping

use bmcwatch_core::error::BmcwatchError;

/// CLI-specific error type.
///
/// Each variant carries enough context for a user-friendly message.
/// The `exit_code()` method maps errors to standard Unix exit codes.
///
/// Note that the `run` subcommand never surfaces monitor failures through
/// this type: an aborted monitor run is rendered in the run report and the
/// process still exits 0 so schedulers do not flap on BMC hiccups.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Configuration loading or validation failure.
    #[error("configuration error: {0}")]
    Config(String),

    /// A subcommand-specific operation failed.
    #[error("{0}")]
    Command(String),

    /// JSON serialisation failed during output rendering.
    #[error("json output error: {0}")]
    JsonSerialize(#[from] serde_json::Error),

    /// IO error (file read, stdout write, etc.).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Wrapped domain error from bmcwatch-core.
    #[error("{0}")]
    Core(BmcwatchError),

    /// SEL pipeline domain error.
    #[error("pipeline error: {0}")]
    Pipeline(String),
}

impl CliError {
    /// Map the error to a process exit code.
    ///
    /// | Code | Meaning                  |
    /// |------|--------------------------|
    /// | 0    | Success                  |
    /// | 1    | General / command error  |
    /// | 2    | Configuration error      |
    /// | 10   | IO error                 |
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Config(_) => 2,
            Self::Io(_) => 10,
            Self::JsonSerialize(_) | Self::Command(_) | Self::Core(_) | Self::Pipeline(_) => 1,
        }
    }
}

impl From<BmcwatchError> for CliError {
    fn from(e: BmcwatchError) -> Self {
        // Config failures keep their dedicated exit code even when they
        // arrive wrapped in the workspace umbrella error.
        match e {
            BmcwatchError::Config(config_err) => Self::Config(config_err.to_string()),
            other => Self::Core(other),
        }
    }
}

impl From<bmcwatch_sel_pipeline::SelPipelineError> for CliError {
    fn from(e: bmcwatch_sel_pipeline::SelPipelineError) -> Self {
        Self::Pipeline(e.to_string())
    }
}
