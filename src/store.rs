//! Upsert writer and reader for `reef_data`.

use std::collections::HashSet;

use sqlx::{Connection, PgConnection, Postgres, QueryBuilder};

use crate::error::{ReefError, Result};
use crate::models::{ObservationRow, ReefObservation, StoredObservation};

// ---

/// Bound parameters per observation in the INSERT.
const BINDS_PER_ROW: usize = 10;

/// Rows per statement; keeps each statement under the 65535 bind limit.
const MAX_ROWS_PER_STATEMENT: usize = 65_535 / BINDS_PER_ROW;

/// Insert-or-update every observation in a single transaction.
///
/// On a `(reef_id, date)` conflict only `sst_celsius`, `dhw_value`, and
/// `bleaching_risk` are overwritten; name, location, source, and
/// `created_at` keep their first-written values. Any failure rolls back the
/// whole batch. Returns the number of records submitted, which counts
/// updates as well as new rows.
pub async fn upsert_observations(
    conn: &mut PgConnection,
    observations: &[ReefObservation],
) -> Result<usize> {
    // ---
    if observations.is_empty() {
        tracing::debug!("Nothing to upsert");
        return Ok(0);
    }

    check_unique_keys(observations)?;

    let mut tx = conn.begin().await?;

    for chunk in observations.chunks(MAX_ROWS_PER_STATEMENT) {
        let mut builder = upsert_statement(chunk);
        let result = builder.build().execute(&mut *tx).await?;
        tracing::debug!(
            "Upserted chunk of {} observations ({} rows affected)",
            chunk.len(),
            result.rows_affected()
        );
    }

    tx.commit().await?;
    Ok(observations.len())
}

fn upsert_statement(chunk: &[ReefObservation]) -> QueryBuilder<'_, Postgres> {
    // ---
    let mut builder = QueryBuilder::<Postgres>::new(
        "INSERT INTO reef_data (\
            reef_id, reef_name, latitude, longitude, country, date, \
            sst_celsius, dhw_value, bleaching_risk, data_source\
        ) ",
    );

    builder.push_values(chunk, |mut row, o| {
        row.push_bind(&o.reef_id)
            .push_bind(&o.reef_name)
            .push_bind(o.latitude)
            .push_bind(o.longitude)
            .push_bind(&o.country)
            .push_bind(o.date)
            .push_bind(o.sst_celsius)
            .push_bind(o.dhw_value)
            .push_bind(o.bleaching_risk.as_str())
            .push_bind(&o.data_source);
    });

    builder.push(
        " ON CONFLICT (reef_id, date) DO UPDATE SET \
            sst_celsius = EXCLUDED.sst_celsius, \
            dhw_value = EXCLUDED.dhw_value, \
            bleaching_risk = EXCLUDED.bleaching_risk",
    );

    builder
}

/// Postgres refuses to update the same row twice in one statement, so a
/// batch must not repeat a `(reef_id, date)` key.
fn check_unique_keys(observations: &[ReefObservation]) -> Result<()> {
    // ---
    let mut seen = HashSet::with_capacity(observations.len());
    for o in observations {
        if !seen.insert((o.reef_id.as_str(), o.date)) {
            return Err(ReefError::DuplicateObservation {
                reef_id: o.reef_id.clone(),
                date: o.date,
            });
        }
    }
    Ok(())
}

// Decimals come back as float8. `created_at` is cast so tables created with
// a plain TIMESTAMP column (the pre-existing DDL) decode the same way.
const SELECT_OBSERVATIONS: &str = r#"
    SELECT
        id,
        reef_id,
        reef_name,
        latitude::DOUBLE PRECISION    AS latitude,
        longitude::DOUBLE PRECISION   AS longitude,
        country,
        date,
        sst_celsius::DOUBLE PRECISION AS sst_celsius,
        dhw_value::DOUBLE PRECISION   AS dhw_value,
        bleaching_risk,
        data_source,
        created_at::TIMESTAMPTZ       AS created_at
    FROM reef_data
    ORDER BY date DESC, reef_id
"#;

/// Read every stored observation, newest date first.
pub async fn fetch_observations(conn: &mut PgConnection) -> Result<Vec<StoredObservation>> {
    // ---
    let rows: Vec<ObservationRow> = sqlx::query_as(SELECT_OBSERVATIONS)
        .fetch_all(&mut *conn)
        .await?;

    tracing::debug!("Fetched {} rows from reef_data", rows.len());

    rows.into_iter().map(StoredObservation::try_from).collect()
}
