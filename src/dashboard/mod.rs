//! Interactive analytics dashboard.
//!
//! The metric row set is loaded once at startup and shared read-only behind
//! an `Arc` for the lifetime of the process; every filter change is one
//! request/response cycle recomputing the aggregates over the full in-memory
//! dataset. No incremental refresh, no locking.

pub mod aggregate;
pub mod filters;
mod page;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    extract::{Query, State},
    response::Html,
    routing::get,
    Json, Router,
};
use chrono::{DateTime, Utc};
use tower_http::cors::CorsLayer;

use crate::error::PipelineError;
use crate::metrics::MetricRow;

use aggregate::DashboardView;
use filters::{FilterOptions, FilterParams};

/// Shared, read-only application state
#[derive(Clone)]
pub struct AppState {
    rows: Arc<Vec<MetricRow>>,
    loaded_at: DateTime<Utc>,
}

impl AppState {
    pub fn new(rows: Vec<MetricRow>) -> Self {
        AppState {
            rows: Arc::new(rows),
            loaded_at: Utc::now(),
        }
    }
}

/// Build the dashboard router
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/api/filters", get(get_filters))
        .route("/api/dashboard", get(get_dashboard))
        .route("/health", get(health))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Serve the dashboard until the process is stopped
pub async fn serve(port: u16, rows: Vec<MetricRow>) -> Result<(), PipelineError> {
    let state = AppState::new(rows);
    let app = router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("dashboard listening on http://{}", addr);

    axum::serve(listener, app).await?;
    Ok(())
}

async fn index() -> Html<&'static str> {
    Html(page::INDEX_HTML)
}

async fn get_filters(State(state): State<AppState>) -> Json<FilterOptions> {
    Json(filters::filter_options(&state.rows))
}

async fn get_dashboard(
    State(state): State<AppState>,
    Query(params): Query<FilterParams>,
) -> Json<DashboardView> {
    Json(aggregate::dashboard_view(&state.rows, &params))
}

async fn health(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "rows": state.rows.len(),
        "loaded_at": state.loaded_at,
    }))
}
