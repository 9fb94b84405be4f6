//! Single-connection access to the reef observation store.
//!
//! Each entry point opens exactly one connection, does its work, and closes
//! it. There is no pool and no retry.

use sqlx::{Connection, PgConnection};

use crate::config::DbConfig;
use crate::error::{ReefError, Result};

/// Open one TLS connection to the configured database.
pub async fn connect(cfg: &DbConfig) -> Result<PgConnection> {
    // ---
    tracing::debug!("Connecting to {}", cfg.display_target());

    PgConnection::connect_with(&cfg.connect_options())
        .await
        .map_err(|source| ReefError::Connect {
            target: cfg.display_target(),
            source,
        })
}

/// Report the server version string (`SELECT version()`).
pub async fn server_version(conn: &mut PgConnection) -> Result<String> {
    // ---
    let version: String = sqlx::query_scalar("SELECT version()")
        .fetch_one(&mut *conn)
        .await?;

    Ok(version)
}
