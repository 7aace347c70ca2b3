use axum::{
    extract::{Request, State},
    http::{header, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use tracing::debug;

use crate::api::{run_blocking, AppState};
use crate::store::guard::{self, GuardDecision, FALLBACK_LOCATION, REPORT_ROUTE_PREFIXES};

/// Redirect report routes to the landing page while no reports exist.
pub async fn report_guard_middleware(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    if !guard::is_guarded(request.uri().path(), REPORT_ROUTE_PREFIXES) {
        return next.run(request).await;
    }

    let path = request.uri().path().to_string();
    let dir = state.settings.reports_dir.clone();
    // A failed emptiness check counts as "no reports".
    let decision = run_blocking(move || guard::evaluate(&path, REPORT_ROUTE_PREFIXES, &dir))
        .await
        .unwrap_or(GuardDecision::Block);

    match decision {
        GuardDecision::Pass => next.run(request).await,
        GuardDecision::Block => {
            debug!(path = %request.uri().path(), "No reports yet, redirecting");
            (StatusCode::FOUND, [(header::LOCATION, FALLBACK_LOCATION)]).into_response()
        }
    }
}
