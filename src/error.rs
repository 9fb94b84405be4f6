//! Error taxonomy for the reef pipeline, dashboard, and connectivity check.
//!
//! Everything below the binaries returns [`ReefError`]; the binaries wrap it
//! in `anyhow` at the top level.

use chrono::NaiveDate;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ReefError>;

#[derive(Error, Debug)]
pub enum ReefError {
    // ---
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to connect to database '{target}': {source}")]
    Connect {
        target: String,
        #[source]
        source: sqlx::Error,
    },

    #[error("SQL error: {0}")]
    Sql(#[from] sqlx::Error),

    #[error("Unknown bleaching risk label: {0:?}")]
    UnknownRiskLabel(String),

    #[error("Invalid noise model: {0}")]
    NoiseModel(#[from] rand_distr::NormalError),

    #[error("Duplicate observation for reef {reef_id} on {date} in a single batch")]
    DuplicateObservation { reef_id: String, date: NaiveDate },
}
