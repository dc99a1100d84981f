//! Error types for the ATS server

use ats_core::AnalyzeError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Server error types
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Extraction failed: {0}")]
    ExtractionFailed(String),

    #[error("Analysis cancelled: {0}")]
    Cancelled(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Error response body
#[derive(Serialize)]
struct ErrorResponse {
    success: bool,
    error: String,
    code: String,
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let (status, code, message) = match self {
            ServerError::InvalidRequest(msg) => (StatusCode::BAD_REQUEST, "INVALID_REQUEST", msg),
            ServerError::ExtractionFailed(msg) => {
                (StatusCode::UNPROCESSABLE_ENTITY, "EXTRACTION_FAILED", msg)
            }
            ServerError::Cancelled(msg) => (StatusCode::REQUEST_TIMEOUT, "CANCELLED", msg),
            ServerError::Internal(msg) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR", msg)
            }
        };

        let body = ErrorResponse {
            success: false,
            error: message,
            code: code.to_string(),
        };

        (status, Json(body)).into_response()
    }
}

impl From<AnalyzeError> for ServerError {
    fn from(err: AnalyzeError) -> Self {
        match err {
            AnalyzeError::Cancelled => ServerError::Cancelled("analysis was cancelled".to_string()),
            AnalyzeError::Extraction(e) => ServerError::ExtractionFailed(e.to_string()),
        }
    }
}
