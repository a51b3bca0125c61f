use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use summarizer_core::PipelineError;

#[derive(Debug, Clone, Serialize)]
pub struct SummaryResponse {
    pub summary: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub detail: String,
}

/// Failure of a request, rendered as `{"detail": ...}` with a matching status.
#[derive(Debug)]
pub enum ApiError {
    /// The client sent something we will not process.
    BadRequest(String),
    /// Anything else; the message is already user-facing.
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Wrap an unexpected fault.
    pub fn processing(err: impl std::fmt::Display) -> Self {
        ApiError::Internal(format!("Processing error: {}", err))
    }
}

impl From<PipelineError> for ApiError {
    fn from(err: PipelineError) -> Self {
        match err {
            PipelineError::EmptyText => ApiError::BadRequest(err.to_string()),
            other => ApiError::processing(other),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let detail = match self {
            ApiError::BadRequest(msg) | ApiError::Internal(msg) => msg,
        };
        (status, Json(ErrorResponse { detail })).into_response()
    }
}
