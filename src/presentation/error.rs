use crate::application::dashboard_service::DashboardError;
use crate::domain::upload::UploadError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

/// Handler-level error; renders as `{"error", "code"}` JSON.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Dashboard(#[from] DashboardError),

    #[error("Bad request: {0}")]
    BadRequest(String),
}

pub type ApiResult<T> = Result<T, ApiError>;

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = match &self {
            ApiError::Dashboard(err) => match err {
                DashboardError::MissingRequirements(_) => {
                    (StatusCode::UNPROCESSABLE_ENTITY, "MISSING_REQUIREMENTS")
                }
                DashboardError::AnalysisInProgress => (StatusCode::CONFLICT, "ANALYSIS_IN_PROGRESS"),
                DashboardError::NoAnalysisData => (StatusCode::CONFLICT, "NO_ANALYSIS_DATA"),
                DashboardError::InvalidLocation => (StatusCode::BAD_REQUEST, "INVALID_LOCATION"),
                DashboardError::Upload(UploadError::InvalidFileType(_)) => {
                    (StatusCode::UNSUPPORTED_MEDIA_TYPE, "INVALID_FILE_TYPE")
                }
                DashboardError::Upload(UploadError::FileTooLarge { .. }) => {
                    (StatusCode::PAYLOAD_TOO_LARGE, "FILE_TOO_LARGE")
                }
                DashboardError::Statistics(_) => (StatusCode::UNPROCESSABLE_ENTITY, "EMPTY_INPUT"),
                DashboardError::Analysis(e) => {
                    tracing::error!(error = %e, "Analysis error");
                    (StatusCode::INTERNAL_SERVER_ERROR, "ANALYSIS_FAILED")
                }
            },
            ApiError::BadRequest(_) => (StatusCode::BAD_REQUEST, "BAD_REQUEST"),
        };

        let body = json!({
            "error": self.to_string(),
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let response = ApiError::from(DashboardError::NoAnalysisData).into_response();
        assert_eq!(response.status(), StatusCode::CONFLICT);

        let response = ApiError::from(DashboardError::Upload(UploadError::FileTooLarge {
            size: 2,
            limit: 1,
        }))
        .into_response();
        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);

        let response = ApiError::BadRequest("unknown bound: mid".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
