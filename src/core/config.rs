use crate::core::projection::{Entity, Horizon};
use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};
use tracing::debug;

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AppConfig {
    /// Participating entities. The list is fixed for the session; only
    /// names and percentages change after load.
    #[serde(default = "default_entities")]
    pub entities: Vec<Entity>,

    /// Credits generated per month.
    #[serde(default = "default_credits_per_month")]
    pub credits_per_month: f64,

    /// Projection horizon in years, one of 1, 5, or 10.
    #[serde(default)]
    pub years: Horizon,

    /// Currency prefix used when formatting revenue for display.
    #[serde(default = "default_currency")]
    pub currency: String,
}

fn default_entities() -> Vec<Entity> {
    (1..=5)
        .map(|i| Entity {
            name: format!("Entity {i}"),
            percentage: 20.0,
        })
        .collect()
}

fn default_credits_per_month() -> f64 {
    1000.0
}

fn default_currency() -> String {
    "$".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            entities: default_entities(),
            credits_per_month: default_credits_per_month(),
            years: Horizon::default(),
            currency: default_currency(),
        }
    }
}

impl AppConfig {
    pub fn load() -> Result<Self> {
        debug!("Loading default config");
        let config_path = Self::default_config_path()?;
        Self::load_from_path(&config_path)
    }

    pub fn default_config_path() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("dev", "credcast", "credcast")
            .context("Could not determine project directories")?;
        Ok(proj_dirs.config_dir().join("config.yaml"))
    }

    pub fn load_from_path<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let config_str = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: Self = serde_yaml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config file: {}", path.as_ref().display()))?;
        debug!("Successfully loaded config");
        Ok(config)
    }
}
