//! Revenue allocation over a projection horizon.
//!
//! Everything here is a pure function of its inputs: the projection is
//! re-derived on demand rather than cached, so any change to observations,
//! entities, credit volume, or horizon is reflected in the next computation
//! with no explicit recalculate step.

use crate::core::ingest::Observation;
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;

/// The number of years revenue is extrapolated over. Only 1, 5, and 10 are
/// valid horizons.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize,
)]
#[serde(try_from = "u32", into = "u32")]
pub enum Horizon {
    #[default]
    OneYear,
    FiveYears,
    TenYears,
}

impl Horizon {
    pub fn years(&self) -> u32 {
        match self {
            Horizon::OneYear => 1,
            Horizon::FiveYears => 5,
            Horizon::TenYears => 10,
        }
    }
}

impl Display for Horizon {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}y", self.years())
    }
}

impl TryFrom<u32> for Horizon {
    type Error = anyhow::Error;

    fn try_from(years: u32) -> Result<Self, Self::Error> {
        match years {
            1 => Ok(Horizon::OneYear),
            5 => Ok(Horizon::FiveYears),
            10 => Ok(Horizon::TenYears),
            _ => Err(anyhow::anyhow!(
                "Invalid projection horizon: {} (expected 1, 5, or 10)",
                years
            )),
        }
    }
}

impl From<Horizon> for u32 {
    fn from(horizon: Horizon) -> u32 {
        horizon.years()
    }
}

impl FromStr for Horizon {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let years: u32 = s
            .trim()
            .trim_end_matches(['y', 'Y'])
            .parse()
            .map_err(|_| anyhow::anyhow!("Invalid projection horizon: {}", s))?;
        Horizon::try_from(years)
    }
}

/// A stakeholder entitled to a percentage share of projected revenue.
/// Names need not be unique; percentages are not validated and may be
/// negative, zero, or sum to anything.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub name: String,
    pub percentage: f64,
}

/// One entity's projected revenue. Derived, never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RevenueResult {
    pub entity_name: String,
    pub revenue: f64,
}

/// Ephemeral input record for one projection, assembled per computation.
#[derive(Debug, Clone)]
pub struct ProjectionInput {
    pub latest_price: f64,
    pub credits_per_month: f64,
    pub horizon: Horizon,
    pub entities: Vec<Entity>,
}

impl ProjectionInput {
    pub fn monthly_revenue(&self) -> f64 {
        self.latest_price * self.credits_per_month
    }

    pub fn annual_revenue(&self) -> f64 {
        self.monthly_revenue() * 12.0
    }

    pub fn total_revenue(&self) -> f64 {
        self.annual_revenue() * f64::from(self.horizon.years())
    }

    /// Splits total revenue across the entities, in entity order. All
    /// arithmetic is plain f64: negative percentages, NaN prices, and
    /// sums away from 100 propagate without rounding or clamping.
    pub fn distribute(&self) -> Vec<RevenueResult> {
        let total = self.total_revenue();
        self.entities
            .iter()
            .map(|entity| RevenueResult {
                entity_name: entity.name.clone(),
                revenue: entity.percentage / 100.0 * total,
            })
            .collect()
    }
}

/// Projects revenue distribution from the latest observed price.
///
/// The latest price is the last observation by sequence order, not by date
/// comparison; callers keep the sequence chronological. With no observations
/// there is nothing to project and the result is empty.
pub fn allocate(
    observations: &[Observation],
    entities: &[Entity],
    credits_per_month: f64,
    horizon: Horizon,
) -> Vec<RevenueResult> {
    let Some(latest) = observations.last() else {
        return Vec::new();
    };
    ProjectionInput {
        latest_price: latest.price,
        credits_per_month,
        horizon,
        entities: entities.to_vec(),
    }
    .distribute()
}

/// Warning raised exactly when the percentages do not sum to 100, by exact
/// f64 comparison. Never blocks computation.
pub fn percentage_warning(entities: &[Entity]) -> Option<String> {
    let sum: f64 = entities.iter().map(|e| e.percentage).sum();
    if sum != 100.0 {
        Some(format!(
            "Entity percentages sum to {sum}%, not 100%; revenue will be over- or under-allocated"
        ))
    } else {
        None
    }
}
