//! Core business logic abstractions

pub mod chart;
pub mod config;
pub mod ingest;
pub mod log;
pub mod projection;
pub mod state;

// Re-export main types for cleaner imports
pub use ingest::{DateValue, Observation};
pub use projection::{Entity, Horizon, ProjectionInput, RevenueResult};
pub use state::AppState;
