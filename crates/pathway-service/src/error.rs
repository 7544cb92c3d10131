use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use pathway_common::ErrorBody;

/// Failure surfaced to clients as `{"detail": ...}`.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Processing error: {0}")]
    Processing(anyhow::Error),

    #[error("Query error: {0}")]
    Query(anyhow::Error),

    /// The body never reached a handler: unreadable, not JSON, or missing a
    /// required field.
    #[error("{message}")]
    InvalidBody { status: StatusCode, message: String },
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Processing(_) | ApiError::Query(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::InvalidBody { status, .. } => *status,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error=%self, "request failed");
        } else {
            tracing::warn!(status=%status, error=%self, "rejected request body");
        }

        let body = ErrorBody {
            detail: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}
