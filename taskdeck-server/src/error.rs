//! Error taxonomy for the HTTP surface.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use taskdeck_proto::api::ErrorResponse;
use taskdeck_proto::task::TaskId;

use crate::store::StoreError;

/// Errors a request handler can produce, each mapped to one status code.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Malformed or empty input — the client's fault (400).
    #[error("{0}")]
    Validation(String),

    /// The referenced task does not exist (404).
    #[error("task not found: {0}")]
    NotFound(TaskId),

    /// The underlying store failed (500).
    #[error("storage failure: {0}")]
    Storage(#[from] StoreError),
}

impl ApiError {
    /// The status code this error maps to.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        // Storage details go to the log; the body only carries a short
        // generic message.
        let message = match &self {
            Self::Storage(e) => {
                tracing::error!(error = %e, "store operation failed");
                "storage operation failed".to_string()
            }
            other => other.to_string(),
        };
        (self.status(), Json(ErrorResponse { message })).into_response()
    }
}
