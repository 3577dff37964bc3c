pub mod cli;
pub mod core;

use crate::core::config::AppConfig;
use crate::core::projection::Horizon;
use anyhow::Result;
use std::path::PathBuf;
use tracing::{debug, info};

/// A user-invocable command, decoupled from the clap surface so integration
/// tests can drive the app directly.
#[derive(Debug, Clone)]
pub enum AppCommand {
    /// Full projection report: price chart, revenue chart, results table.
    Report {
        csv: Option<PathBuf>,
        credits_per_month: Option<f64>,
        years: Option<Horizon>,
    },
    /// Historical price series only.
    History { csv: Option<PathBuf> },
}

pub fn run_command(command: AppCommand, config_path: Option<&str>) -> Result<()> {
    info!("Credit revenue projector starting...");

    let config = match config_path {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };
    debug!("Loaded config: {config:#?}");

    match command {
        AppCommand::Report {
            csv,
            credits_per_month,
            years,
        } => cli::report::run(&config, csv.as_deref(), credits_per_month, years),
        AppCommand::History { csv } => cli::history::run(&config, csv.as_deref()),
    }
}
