//! Schema → generate → upsert, run once per invocation.

use chrono::NaiveDate;
use rand::Rng;
use sqlx::PgConnection;

use crate::error::Result;
use crate::reefs::REEF_REGISTRY;
use crate::{generator, schema, store, Config};

/// Outcome of one pipeline run.
#[derive(Debug, Clone)]
pub struct PipelineReport {
    pub reefs: usize,
    pub window_start: NaiveDate,
    pub window_end: NaiveDate,
    pub records_submitted: usize,
    pub schema_reset: bool,
}

/// Run the full pipeline on an open connection.
///
/// Any error aborts the run; nothing is retried. The upsert is a single
/// transaction, so a failure there leaves the table as it was (after the
/// schema step).
pub async fn run_pipeline<R>(
    conn: &mut PgConnection,
    cfg: &Config,
    today: NaiveDate,
    rng: &mut R,
) -> Result<PipelineReport>
where
    R: Rng + ?Sized,
{
    // ---
    tracing::info!("Starting coral reef data pipeline");

    if cfg.schema_reset {
        schema::reset_schema(conn).await?;
    } else {
        schema::ensure_schema(conn).await?;
    }

    tracing::info!("Generating reef data for window ending {}", today);
    let observations = generator::generate_observations(REEF_REGISTRY, today, rng)?;

    tracing::info!("Storing {} observations", observations.len());
    let records_submitted = store::upsert_observations(conn, &observations).await?;
    tracing::info!("Stored {} records", records_submitted);

    let window = generator::observation_window(today);
    let report = PipelineReport {
        reefs: REEF_REGISTRY.len(),
        window_start: window.first().copied().unwrap_or(today),
        window_end: today,
        records_submitted,
        schema_reset: cfg.schema_reset,
    };

    tracing::info!("Pipeline completed successfully");
    Ok(report)
}
