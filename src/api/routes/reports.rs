use axum::{
    extract::{Path, State},
    response::Response,
    Json,
};

use crate::api::stream::file_response;
use crate::api::{run_blocking, AppState};
use crate::errors::DashboardError;
use crate::models::report::ReportListing;
use crate::store::{files, index};

pub async fn list_reports(
    State(state): State<AppState>,
) -> Result<Json<Vec<ReportListing>>, DashboardError> {
    let dir = state.settings.reports_dir.clone();
    let listings = run_blocking(move || index::list(&dir, index::API_LIST_LIMIT)).await??;
    Ok(Json(listings))
}

pub async fn get_report_file(
    State(state): State<AppState>,
    Path(file): Path<String>,
) -> Result<Response, DashboardError> {
    let dir = state.settings.reports_dir.clone();
    let path = run_blocking(move || files::resolve_within(&dir, &file)).await??;
    file_response(&path, files::content_type_for(&path), None).await
}
