//! `GET /api/dashboard`: filtered metrics, chart series, and raw rows.
//!
//! Each request opens and closes its own connection. A connection or query
//! failure becomes a `503` with an `error` message the page shows as a
//! banner; the process keeps serving.

use axum::{
    extract::Query, extract::State, http::StatusCode, response::IntoResponse, routing::get, Json,
    Router,
};
use serde::{Deserialize, Serialize};
use sqlx::Connection;
use tracing::{debug, error, info};

use crate::config::DbConfig;
use crate::models::StoredObservation;
use crate::summary::{self, DashboardMetrics, ReefFilter, ReefLocation, ReefOption, RiskCount, TrendPoint};
use crate::{db, store, Config};

// ---

pub fn router() -> Router<Config> {
    // ---
    Router::new().route("/api/dashboard", get(handler))
}

/// Query parameters for the dashboard view.
#[derive(Debug, Deserialize)]
pub struct DashboardQuery {
    /// Reef identifier, or `All` / absent for every reef.
    reef_id: Option<String>,
}

/// Everything the page needs to render, computed over the selected reef.
#[derive(Debug, Serialize)]
pub struct DashboardView<'a> {
    // ---
    /// Rows loaded from the database before filtering.
    pub record_count: usize,
    pub selected_reef: Option<String>,
    pub reefs: Vec<ReefOption>,
    pub metrics: DashboardMetrics,
    pub trend: Vec<TrendPoint>,
    pub risk_distribution: Vec<RiskCount>,
    pub locations: Vec<ReefLocation>,
    pub rows: Vec<&'a StoredObservation>,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

async fn handler(
    Query(params): Query<DashboardQuery>,
    State(config): State<Config>,
) -> impl IntoResponse {
    // ---
    info!("GET /api/dashboard - reef_id={:?}", params.reef_id);

    let rows = match load_rows(&config.db).await {
        Ok(rows) => rows,
        Err(e) => {
            error!("Dashboard query failed: {}", e);
            return (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(ErrorBody {
                    error: format!("Database connection failed: {}", e),
                }),
            )
                .into_response();
        }
    };

    let filter = ReefFilter::from_param(params.reef_id.as_deref());
    let view = build_view(&rows, &filter);

    debug!(
        "GET /api/dashboard - {} of {} rows selected",
        view.rows.len(),
        view.record_count
    );
    (StatusCode::OK, Json(view)).into_response()
}

/// One connection per request, closed before the response is built.
async fn load_rows(cfg: &DbConfig) -> crate::Result<Vec<StoredObservation>> {
    // ---
    let mut conn = db::connect(cfg).await?;
    let rows = store::fetch_observations(&mut conn).await?;
    conn.close().await?;
    Ok(rows)
}

pub fn build_view<'a>(rows: &'a [StoredObservation], filter: &ReefFilter) -> DashboardView<'a> {
    // ---
    let filtered = summary::filter_observations(rows, filter);

    DashboardView {
        record_count: rows.len(),
        selected_reef: match filter {
            ReefFilter::All => None,
            ReefFilter::Reef(id) => Some(id.clone()),
        },
        reefs: summary::reef_options(rows),
        metrics: summary::compute_metrics(&filtered),
        trend: summary::temperature_trend(&filtered),
        risk_distribution: summary::risk_distribution(&filtered),
        locations: summary::reef_locations(&filtered),
        rows: summary::recent_rows(&filtered),
    }
}
