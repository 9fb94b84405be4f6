//! Database schema management for `reefwatch`.
//!
//! [`ensure_schema`] is idempotent and runs on every pipeline invocation.
//! [`reset_schema`] drops the table first and is only reached when the
//! operator opts in with `REEF_SCHEMA_RESET=true`.

use sqlx::PgConnection;

use crate::error::Result;

// ---

/// Name of the reef observation store.
pub const TABLE_NAME: &str = "reef_data";

const CREATE_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS reef_data (
        id             SERIAL PRIMARY KEY,
        reef_id        VARCHAR(50)    NOT NULL,
        reef_name      VARCHAR(255),
        latitude       DECIMAL(10, 6),
        longitude      DECIMAL(10, 6),
        country        VARCHAR(100),
        date           DATE           NOT NULL,
        sst_celsius    DECIMAL(5, 2),
        dhw_value      DECIMAL(5, 2),
        bleaching_risk VARCHAR(50),
        data_source    VARCHAR(50),
        created_at     TIMESTAMPTZ    DEFAULT CURRENT_TIMESTAMP,
        UNIQUE (reef_id, date)
    );
"#;

// Dashboard reads sort by date.
const CREATE_DATE_INDEX: &str = r#"
    CREATE INDEX IF NOT EXISTS idx_reef_data_date
        ON reef_data (date);
"#;

/// Create the `reef_data` table and its indexes if they do not exist.
///
/// Safe to call on every run; existing rows are untouched. Errors are
/// propagated if any SQL execution fails.
pub async fn ensure_schema(conn: &mut PgConnection) -> Result<()> {
    // ---
    let mut tx = sqlx::Connection::begin(&mut *conn).await?;

    sqlx::query(CREATE_TABLE).execute(&mut *tx).await?;
    sqlx::query(CREATE_DATE_INDEX).execute(&mut *tx).await?;

    tx.commit().await?;
    tracing::info!("Schema ready: {}", TABLE_NAME);
    Ok(())
}

/// Drop `reef_data` and recreate it empty.
///
/// Destroys every stored observation. Drop and create share one
/// transaction, so a failed create leaves the old table in place.
pub async fn reset_schema(conn: &mut PgConnection) -> Result<()> {
    // ---
    tracing::warn!("Dropping table {} (REEF_SCHEMA_RESET)", TABLE_NAME);

    let mut tx = sqlx::Connection::begin(&mut *conn).await?;

    sqlx::query("DROP TABLE IF EXISTS reef_data")
        .execute(&mut *tx)
        .await?;
    sqlx::query(CREATE_TABLE).execute(&mut *tx).await?;
    sqlx::query(CREATE_DATE_INDEX).execute(&mut *tx).await?;

    tx.commit().await?;
    tracing::info!("Schema recreated: {}", TABLE_NAME);
    Ok(())
}
