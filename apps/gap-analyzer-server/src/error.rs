//! Error types for the gap analyzer server

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use checklist_engine::EngineError;
use serde::Serialize;
use thiserror::Error;

/// Server error types
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Unknown checklist: {0}")]
    UnknownChecklist(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

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
        let (status, code, message) = match &self {
            ServerError::UnknownChecklist(name) => (
                StatusCode::BAD_REQUEST,
                "UNKNOWN_CHECKLIST",
                format!(
                    "Checklist '{}' not found. Use GET /api/checklists for the list of standards.",
                    name
                ),
            ),
            ServerError::InvalidRequest(msg) => {
                (StatusCode::BAD_REQUEST, "INVALID_REQUEST", msg.clone())
            }
            ServerError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    msg.clone(),
                )
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

impl From<EngineError> for ServerError {
    fn from(err: EngineError) -> Self {
        match err {
            EngineError::UnknownChecklist(name) => ServerError::UnknownChecklist(name),
            other => ServerError::Internal(other.to_string()),
        }
    }
}
