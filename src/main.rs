use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use credcast::core::log::init_logging;
use credcast::core::projection::Horizon;
use std::path::PathBuf;

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to optional configuration file
    #[arg(short, long, global = true)]
    config_path: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

impl From<Commands> for credcast::AppCommand {
    fn from(cmd: Commands) -> credcast::AppCommand {
        match cmd {
            Commands::Report {
                csv,
                credits_per_month,
                years,
            } => credcast::AppCommand::Report {
                csv,
                credits_per_month,
                years,
            },
            Commands::History { csv } => credcast::AppCommand::History { csv },
            Commands::Setup => unreachable!("Setup command should be handled separately"),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration
    Setup,
    /// Project revenue distribution from a credit price history CSV
    Report {
        /// Path to the price history CSV (omit to run without data)
        csv: Option<PathBuf>,

        /// Override the configured monthly credit volume
        #[arg(long)]
        credits_per_month: Option<f64>,

        /// Override the configured projection horizon (1, 5, or 10)
        #[arg(long)]
        years: Option<Horizon>,
    },
    /// Display the historical price series from a CSV
    History {
        /// Path to the price history CSV
        csv: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let result = match cli.command {
        Some(Commands::Setup) => setup(),
        Some(cmd) => credcast::run_command(cmd.into(), cli.config_path.as_deref()),
        None => {
            Cli::command().print_help()?;
            Ok(())
        }
    };

    if let Err(e) = &result {
        tracing::error!(error = %e, "Application failed");
    }
    result
}

fn setup() -> anyhow::Result<()> {
    use anyhow::Context;

    let path = credcast::core::config::AppConfig::default_config_path()?;

    if path.exists() {
        anyhow::bail!("Configuration file already exists at {}", path.display());
    }

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    let default_config = r#"---
entities:
  - name: "Entity 1"
    percentage: 20.0
  - name: "Entity 2"
    percentage: 20.0
  - name: "Entity 3"
    percentage: 20.0
  - name: "Entity 4"
    percentage: 20.0
  - name: "Entity 5"
    percentage: 20.0

credits_per_month: 1000.0
years: 1
currency: "$"
"#;

    std::fs::write(&path, default_config)
        .with_context(|| format!("Failed to write config file to {}", path.display()))?;

    tracing::info!("Created default configuration at {}", path.display());
    Ok(())
}
