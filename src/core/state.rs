//! The session state record binding ingest to projection.

use crate::core::config::AppConfig;
use crate::core::ingest::{self, Observation};
use crate::core::projection::{self, Entity, Horizon, ProjectionInput, RevenueResult};
use anyhow::Result;
use std::path::Path;
use tracing::debug;

/// All session state, owned in one place with one update entry point per
/// field. Updates replace the value wholesale (`self -> Self`) and nothing
/// is cached, so the projection stays a pure derivation of current state.
#[derive(Debug, Clone)]
pub struct AppState {
    observations: Vec<Observation>,
    entities: Vec<Entity>,
    credits_per_month: f64,
    horizon: Horizon,
}

impl AppState {
    pub fn new(entities: Vec<Entity>, credits_per_month: f64, horizon: Horizon) -> Self {
        AppState {
            observations: Vec::new(),
            entities,
            credits_per_month,
            horizon,
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        AppState::new(
            config.entities.clone(),
            config.credits_per_month,
            config.years,
        )
    }

    pub fn observations(&self) -> &[Observation] {
        &self.observations
    }

    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    pub fn credits_per_month(&self) -> f64 {
        self.credits_per_month
    }

    pub fn horizon(&self) -> Horizon {
        self.horizon
    }

    /// Replaces the loaded dataset in full. There is no incremental merge.
    pub fn with_observations(mut self, observations: Vec<Observation>) -> Self {
        self.observations = observations;
        self
    }

    /// Ingests a price history file. `None` models "no file selected" and is
    /// a no-op: the existing dataset stays unchanged.
    pub fn ingest_file(self, path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            debug!("No file selected; keeping current dataset");
            return Ok(self);
        };
        let observations = ingest::load_file(path)?;
        debug!(
            rows = observations.len(),
            "Loaded observations from {}",
            path.display()
        );
        Ok(self.with_observations(observations))
    }

    /// Renames one entity. An out-of-range index leaves state unchanged.
    pub fn with_entity_name(mut self, index: usize, name: impl Into<String>) -> Self {
        if let Some(entity) = self.entities.get_mut(index) {
            entity.name = name.into();
        }
        self
    }

    /// Updates one entity's share. An out-of-range index leaves state
    /// unchanged; the value itself is not validated.
    pub fn with_entity_percentage(mut self, index: usize, percentage: f64) -> Self {
        if let Some(entity) = self.entities.get_mut(index) {
            entity.percentage = percentage;
        }
        self
    }

    pub fn with_credits_per_month(mut self, credits_per_month: f64) -> Self {
        self.credits_per_month = credits_per_month;
        self
    }

    pub fn with_horizon(mut self, horizon: Horizon) -> Self {
        self.horizon = horizon;
        self
    }

    /// Price of the last observation by sequence order, or `None` before any
    /// data is loaded.
    pub fn latest_price(&self) -> Option<f64> {
        self.observations.last().map(|o| o.price)
    }

    /// The ephemeral allocator input for the current state, absent while no
    /// data is loaded.
    pub fn projection_input(&self) -> Option<ProjectionInput> {
        self.latest_price().map(|latest_price| ProjectionInput {
            latest_price,
            credits_per_month: self.credits_per_month,
            horizon: self.horizon,
            entities: self.entities.clone(),
        })
    }

    /// Projected revenue per entity, re-derived on every call.
    pub fn projection(&self) -> Vec<RevenueResult> {
        projection::allocate(
            &self.observations,
            &self.entities,
            self.credits_per_month,
            self.horizon,
        )
    }

    pub fn percentage_warning(&self) -> Option<String> {
        projection::percentage_warning(&self.entities)
    }
}
