//! API error types with IntoResponse
//!
//! Errors are converted to JSON responses with appropriate status codes.
//! Every body carries an `error` code; store failures never carry detail.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::db::DbError;
use crate::models::ValidationError;

/// API error type with automatic HTTP status mapping
#[derive(Debug)]
pub enum ApiError {
    /// Required payload fields missing or empty (400)
    Validation(ValidationError),

    /// Path id is not an integer (400)
    InvalidId { raw: String },

    /// Thread does not exist (404)
    NotFound { id: i64 },

    /// Connection or query failure (500, logged)
    Store(DbError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            Self::Validation(e) => (
                StatusCode::BAD_REQUEST,
                json!({
                    "error": "validation_error",
                    "message": e.to_string()
                }),
            ),
            Self::InvalidId { raw } => (
                StatusCode::BAD_REQUEST,
                json!({
                    "error": "invalid_thread_id",
                    "message": format!("thread id '{}' is not an integer", raw)
                }),
            ),
            Self::NotFound { id } => (
                StatusCode::NOT_FOUND,
                json!({
                    "error": "thread_not_found",
                    "message": format!("thread {} not found", id)
                }),
            ),
            Self::Store(e) => {
                // Log the actual error, return generic message
                tracing::error!(error = %e, "store failure");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({
                        "error": "internal_server_error",
                        "message": "an internal error occurred"
                    }),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

impl From<ValidationError> for ApiError {
    fn from(e: ValidationError) -> Self {
        Self::Validation(e)
    }
}

impl From<DbError> for ApiError {
    fn from(e: DbError) -> Self {
        match e {
            DbError::ThreadNotFound { id } => Self::NotFound { id },
            _ => Self::Store(e),
        }
    }
}
