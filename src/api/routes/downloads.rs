use std::time::Instant;

use axum::{
    body::Body,
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::Response,
};
use tracing::info;

use crate::api::models::TakeQuery;
use crate::api::stream::{attachment, file_response, DeleteOnDrop};
use crate::api::{run_blocking, AppState};
use crate::errors::DashboardError;
use crate::store::{bundle, clamp_take, index, linker, ArtifactKind, BundleRequest};

/// `/download/latest/{json|html|sarif}`
pub async fn download_latest(
    State(state): State<AppState>,
    Path(kind): Path<String>,
) -> Result<Response, DashboardError> {
    let kind = ArtifactKind::from_name(&kind)
        .ok_or_else(|| DashboardError::NotFound(format!("artifact kind {}", kind)))?;

    let dir = state.settings.reports_dir.clone();
    let artifact = run_blocking(move || {
        let latest = index::latest(&dir)?;
        match kind {
            ArtifactKind::Json => Some(latest),
            ArtifactKind::Html => linker::siblings(&latest).html,
            ArtifactKind::Sarif => linker::siblings(&latest).sarif,
        }
    })
    .await?
    .ok_or_else(|| DashboardError::NotFound(format!("latest {:?} artifact", kind)))?;

    let name = artifact
        .file_name()
        .and_then(|n| n.to_str())
        .map(str::to_string)
        .ok_or_else(|| DashboardError::NotFound(artifact.display().to_string()))?;
    file_response(&artifact, kind.content_type(), Some(&name)).await
}

/// `/download/reports.zip?take=N`
pub async fn download_zip(
    State(state): State<AppState>,
    Query(query): Query<TakeQuery>,
) -> Result<Response, DashboardError> {
    let dir = state.settings.reports_dir.clone();
    if !tokio::fs::metadata(&dir).await.map(|m| m.is_dir()).unwrap_or(false) {
        return Err(DashboardError::NotFound(dir.display().to_string()));
    }

    let take = clamp_take(query.take);
    let request = BundleRequest::new(take).with_deadline(Instant::now() + state.settings.bundle_timeout);
    let archive_dir = state.settings.archive_dir.clone();
    let archive = run_blocking(move || bundle::bundle_in(&dir, &request, &archive_dir))
        .await
        .map_err(|e| DashboardError::Bundle(e.to_string()))??;

    info!(take, entries = archive.entries.len(), "Serving report archive");

    let file = tokio::fs::File::open(archive.path())
        .await
        .map_err(|e| DashboardError::Bundle(format!("Failed to reopen archive: {}", e)))?;
    let len = file.metadata().await.map(|m| m.len()).ok();
    let body = Body::from_stream(DeleteOnDrop::new(file, archive.into_temp_path()));

    let mut builder = Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "application/zip")
        .header(header::CONTENT_DISPOSITION, attachment(&format!("GuardTool.Reports.latest{}.zip", take)));
    if let Some(len) = len {
        builder = builder.header(header::CONTENT_LENGTH, len);
    }
    builder
        .body(body)
        .map_err(|e| DashboardError::Internal(format!("Failed to build response: {}", e)))
}
