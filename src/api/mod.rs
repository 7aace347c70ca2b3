pub mod routes;
pub mod models;
pub mod errors;
pub mod guard;
pub mod stream;

use std::sync::Arc;

use axum::{middleware, routing::get, Router};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use crate::config::DashboardSettings;
use crate::errors::DashboardError;

#[derive(Clone)]
pub struct AppState {
    pub settings: Arc<DashboardSettings>,
}

impl AppState {
    pub fn new(settings: DashboardSettings) -> Self {
        Self { settings: Arc::new(settings) }
    }
}

/// Run filesystem work off the async worker threads.
pub async fn run_blocking<F, T>(task: F) -> Result<T, DashboardError>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(task)
        .await
        .map_err(|e| DashboardError::Internal(format!("Blocking task failed: {}", e)))
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(routes::health::landing))
        .route("/api/health", get(routes::health::health_check))
        .route("/api/reports", get(routes::reports::list_reports))
        .route("/reports/{file}", get(routes::reports::get_report_file))
        .route("/download/latest/{kind}", get(routes::downloads::download_latest))
        .route("/download/reports.zip", get(routes::downloads::download_zip))
        .fallback(routes::health::not_found)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(middleware::from_fn_with_state(state.clone(), guard::report_guard_middleware)),
        )
        .with_state(state)
}
