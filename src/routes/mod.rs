use axum::Router;

use crate::Config;

mod dashboard_api;
mod health;
mod page;

pub use dashboard_api::{build_view, DashboardView};

// ---

pub fn router(config: Config) -> Router {
    // ---
    Router::new()
        .merge(page::router())
        .merge(dashboard_api::router())
        .merge(health::router())
        .with_state(config)
}
