//! Entry point for the reef dashboard.
//!
//! Serves the dashboard page and its JSON API over axum. The process holds
//! no database connection between requests; each `/api/dashboard` call
//! opens one, reads `reef_data`, and closes it. When the database is
//! unreachable the page shows an error banner instead of failing.
//!
//! # Environment Variables
//! - `NEON_HOST`, `NEON_DATABASE`, `NEON_USER`, `NEON_PASSWORD` (**required**)
//! - `NEON_PORT` (optional) – database port (default: 5432)
//! - `DASHBOARD_ADDR` (optional) – listen address (default: 0.0.0.0:8080)
use anyhow::Result;
use axum::Router;
use dotenvy::dotenv;

use reefwatch::{config, routes, telemetry};

// ---

#[tokio::main]
async fn main() -> Result<()> {
    // ---
    dotenv().ok();
    telemetry::init_tracing();

    let cfg = config::load_from_env()?;
    cfg.log_config();

    let addr = cfg.dashboard_addr;
    let app: Router = routes::router(cfg);

    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
