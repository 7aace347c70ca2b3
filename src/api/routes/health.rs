use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};

use crate::api::models::IndexQuery;
use crate::api::{run_blocking, AppState};
use crate::store::index;

pub async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "service": "guardtool-dashboard",
        "version": env!("CARGO_PKG_VERSION"),
        "git_hash": option_env!("GIT_HASH"),
        "built_at": option_env!("BUILD_TIMESTAMP"),
    }))
}

/// Landing endpoint; also the target of the empty-index redirect.
pub async fn landing(
    State(state): State<AppState>,
    Query(query): Query<IndexQuery>,
) -> Json<Value> {
    let dir = state.settings.reports_dir.clone();
    let has_reports = run_blocking(move || index::has_any(&dir)).await.unwrap_or(false);
    Json(json!({
        "service": "guardtool-dashboard",
        "hasReports": has_reports,
        "noreports": query.noreports.is_some(),
    }))
}

pub async fn not_found() -> StatusCode {
    StatusCode::NOT_FOUND
}
