use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::json;
use tracing::error;

use crate::errors::DashboardError;

impl IntoResponse for DashboardError {
    fn into_response(self) -> axum::response::Response {
        if let DashboardError::NotFound(_) = self {
            return StatusCode::NOT_FOUND.into_response();
        }

        // Details stay in the log; paths are not echoed to clients.
        error!(error = %self, "Request failed");
        let message = if self.is_bundling_failure() {
            "Failed to create zip."
        } else {
            "Internal server error"
        };
        (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({"error": message}))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_status() {
        let response = DashboardError::NotFound("x_report.html".into()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_bundle_failure_status() {
        let response = DashboardError::Bundle("disk full".into()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_config_error_is_internal() {
        let response = DashboardError::Config("bad".into()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
