// src/routes/health.rs
//! Liveness endpoint for the reef dashboard.
//!
//! `GET /health` answers without touching the database, so it stays green
//! while the observation store is unreachable; the dashboard endpoints
//! report that case themselves.

use axum::{routing::get, Json, Router};
use serde::Serialize;

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

/// Subrouter with the `/health` route, generic over the gateway state.
pub fn router<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new().route("/health", get(health))
}
