//! Chart and table data for the presentation layer.
//!
//! The core generates these plain structures; the frontend just renders
//! them, however it likes.

use crate::core::ingest::Observation;
use crate::core::projection::RevenueResult;
use serde::{Deserialize, Serialize};

/// One labelled value in an ordered series, for both the historical price
/// chart (label = date) and the revenue bar chart (label = entity name).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesPoint {
    pub label: String,
    pub value: f64,
}

/// One row of the results table, revenue pre-formatted for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableRow {
    pub entity: String,
    pub revenue: String,
}

/// Time-series input for the historical price chart, in observation order.
/// Invalid dates keep their raw text as the label; NaN prices flow through.
pub fn price_series(observations: &[Observation]) -> Vec<SeriesPoint> {
    observations
        .iter()
        .map(|observation| SeriesPoint {
            label: observation.date.label(),
            value: observation.price,
        })
        .collect()
}

/// Categorical input for the per-entity revenue bar chart, in entity order.
pub fn revenue_breakdown(results: &[RevenueResult]) -> Vec<SeriesPoint> {
    results
        .iter()
        .map(|result| SeriesPoint {
            label: result.entity_name.clone(),
            value: result.revenue,
        })
        .collect()
}

/// Results-table rows: revenue formatted to two decimals with a currency
/// prefix. Formatting happens here and nowhere earlier.
pub fn revenue_rows(results: &[RevenueResult], currency_prefix: &str) -> Vec<TableRow> {
    results
        .iter()
        .map(|result| TableRow {
            entity: result.entity_name.clone(),
            revenue: format!("{currency_prefix}{:.2}", result.revenue),
        })
        .collect()
}
