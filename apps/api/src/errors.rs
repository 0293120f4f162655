use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Unknown filter mode: {0}")]
    InvalidMode(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Conversion failed with exit status {status}: {output}")]
    Conversion { status: i32, output: String },

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Resume data error: {0}")]
    ResumeData(#[from] serde_yaml::Error),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::InvalidMode(mode) => (
                StatusCode::BAD_REQUEST,
                "INVALID_MODE",
                format!("Unknown filter mode: {mode}"),
            ),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::Conversion { status, output } => {
                tracing::error!("Conversion failed (exit status {status}): {output}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "CONVERSION_ERROR",
                    format!("Document conversion failed with exit status {status}: {output}"),
                )
            }
            AppError::Database(e) => {
                tracing::error!("Database error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "DATABASE_ERROR",
                    "A database error occurred".to_string(),
                )
            }
            AppError::Io(e) => {
                tracing::error!("I/O error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "IO_ERROR",
                    "A storage error occurred".to_string(),
                )
            }
            AppError::ResumeData(e) => {
                tracing::error!("Resume data error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "RESUME_DATA_ERROR",
                    "The resume data source could not be parsed".to_string(),
                )
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}
