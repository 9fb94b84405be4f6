//! `GET /`: the dashboard page.
//!
//! A static HTML shell; all data comes from `/api/dashboard`.

use axum::{response::Html, routing::get, Router};

const DASHBOARD_HTML: &str = include_str!("dashboard.html");

async fn index() -> Html<&'static str> {
    Html(DASHBOARD_HTML)
}

pub fn router<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new().route("/", get(index))
}
