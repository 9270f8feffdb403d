//! API error types with IntoResponse
//!
//! Errors are converted to JSON documents with appropriate status codes.
//! Storage failures are logged here and reach the client only as a
//! generic message.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::db::DbError;
use crate::models::ValidationError;

/// API error type with automatic HTTP status mapping
#[derive(Debug)]
pub enum ApiError {
    /// Validation failed (400)
    Validation(ValidationError),

    /// Resource not found (404)
    NotFound { resource: &'static str, id: String },

    /// No route matched (404)
    NoRoute { path: String },

    /// A write was rolled back (500, logged). `message` is shown to the user.
    WriteFailed { message: String, source: DbError },

    /// Read-path database error (500, logged)
    Database(DbError),
}

impl ApiError {
    /// Wrap a failed write. Missing records stay 404; anything else becomes
    /// a generic `message` for the user while `source` goes to the log.
    pub fn write_failed(message: impl Into<String>, source: DbError) -> Self {
        match source {
            DbError::NotFound { resource, id } => Self::NotFound { resource, id },
            source => Self::WriteFailed {
                message: message.into(),
                source,
            },
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::NotFound { .. } | Self::NoRoute { .. } => StatusCode::NOT_FOUND,
            Self::WriteFailed { .. } | Self::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match self {
            Self::Validation(e) => json!({
                "error": "validation_error",
                "message": e.to_string()
            }),
            Self::NotFound { resource, id } => json!({
                "error": "not_found",
                "message": format!("{} '{}' not found", resource, id)
            }),
            Self::NoRoute { path } => json!({
                "error": "not_found",
                "message": format!("no route for {}", path)
            }),
            Self::WriteFailed { message, source } => {
                tracing::error!(error = %source, "Write failed, rolled back");
                json!({
                    "error": "write_failed",
                    "message": message
                })
            }
            Self::Database(e) => {
                // Log the actual error, return generic message
                tracing::error!("Database error: {}", e);
                json!({
                    "error": "internal_error",
                    "message": "an internal error occurred"
                })
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
            DbError::NotFound { resource, id } => Self::NotFound { resource, id },
            _ => Self::Database(e),
        }
    }
}
