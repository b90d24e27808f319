//! Command handlers -- one module per subcommand

pub mod classify;
pub mod config;
pub mod history;
pub mod run;
pub mod sync_clock;
