//! Maps domain `AppError` to HTTP responses.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use eventpush_core::error::{AppError, ErrorKind};

/// Error body returned by every failing endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    /// Error kind: `invalid-argument` or `internal`.
    pub error: String,
    /// The error message, verbatim.
    pub message: String,
}

/// HTTP-facing wrapper around [`AppError`].
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let err = self.0;

        let status = match err.kind {
            ErrorKind::InvalidArgument => StatusCode::BAD_REQUEST,
            ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
            ErrorKind::Configuration => {
                tracing::error!(
                    kind = %err.kind,
                    error = %err.message,
                    "Unexpected error kind at HTTP boundary"
                );
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let kind = if err.is_invalid_argument() {
            ErrorKind::InvalidArgument
        } else {
            ErrorKind::Internal
        };

        let body = ApiErrorResponse {
            error: kind.code().to_string(),
            message: err.message,
        };

        (status, Json(body)).into_response()
    }
}
