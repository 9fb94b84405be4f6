//! Entry point for the `reefwatch` pipeline.
//!
//! One run performs:
//! - Loading configuration from environment variables or `.env`
//! - Initializing structured logging/tracing
//! - Opening a single PostgreSQL connection (TLS required)
//! - Ensuring the `reef_data` schema (or resetting it when
//!   `REEF_SCHEMA_RESET=true`)
//! - Generating 31 days of observations for every registered reef
//! - Upserting them in one transaction
//!
//! # Environment Variables
//! - `NEON_HOST`, `NEON_DATABASE`, `NEON_USER`, `NEON_PASSWORD` (**required**)
//! - `NEON_PORT` (optional) – database port (default: 5432)
//! - `REEF_SCHEMA_RESET` (optional) – drop and recreate the table first
//! - `REEF_SEED` (optional) – seed for reproducible temperatures
//! - `REEF_LOG_LEVEL` (optional) – log verbosity (default: `info`)
//!
//! Any failure ends the process with a non-zero status.
use anyhow::Result;
use chrono::Local;
use dotenvy::dotenv;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use sqlx::Connection;

use reefwatch::{config, db, run_pipeline, telemetry};

// ---

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // ---
    dotenv().ok();
    telemetry::init_tracing();

    let cfg = config::load_from_env()?;
    cfg.log_config();

    let mut rng = match cfg.seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_entropy(),
    };

    let mut conn = db::connect(&cfg.db).await?;
    tracing::info!("Connected to {}", cfg.db.display_target());

    let today = Local::now().date_naive();
    let report = run_pipeline(&mut conn, &cfg, today, &mut rng).await?;

    conn.close().await?;

    tracing::info!(
        "Stored {} records for {} reefs ({} to {})",
        report.records_submitted,
        report.reefs,
        report.window_start,
        report.window_end
    );

    Ok(())
}
