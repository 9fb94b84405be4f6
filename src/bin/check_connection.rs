//! Connectivity check: connect, print the server version, disconnect.
//!
//! Failures are reported on stdout and the process still exits with status
//! zero; this tool informs, it does not gate.
use dotenvy::dotenv;
use sqlx::Connection;

use reefwatch::{config, db, telemetry};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    // ---
    dotenv().ok();
    telemetry::init_tracing();

    match check().await {
        Ok(version) => {
            println!("Successfully connected to PostgreSQL");
            println!("PostgreSQL version: {}", version);
        }
        Err(e) => {
            tracing::error!("Connectivity check failed: {}", e);
            println!("Connection failed: {}", e);
        }
    }
}

async fn check() -> reefwatch::Result<String> {
    // ---
    let cfg = config::load_from_env()?;
    let mut conn = db::connect(&cfg.db).await?;
    let version = db::server_version(&mut conn).await?;
    conn.close().await?;
    Ok(version)
}
