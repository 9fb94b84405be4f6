//! Synthetic coral reef monitoring: generate daily sea-surface temperature,
//! heat-stress, and bleaching-risk observations for a fixed set of reefs,
//! upsert them into PostgreSQL, and serve a dashboard over the stored rows.
//!
//! Module boundaries follow the Explicit Module Boundary Pattern (EMBP):
//! binaries talk to the crate root, and siblings reach each other through
//! the re-exports here rather than through `config.rs` directly.

pub mod config;
pub mod db;
pub mod error;
pub mod generator;
pub mod models;
pub mod pipeline;
pub mod reefs;
pub mod routes;
pub mod schema;
pub mod store;
pub mod summary;
pub mod telemetry;

pub use config::{Config, DbConfig};
pub use error::{ReefError, Result};
pub use models::{BleachingRisk, ReefObservation, StoredObservation};
pub use pipeline::{run_pipeline, PipelineReport};
