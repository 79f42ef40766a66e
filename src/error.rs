//! Application error type and HTTP error responses.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Value, json};

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorInfo,
}

#[derive(Serialize)]
struct ErrorInfo {
    code: &'static str,
    message: String,
    details: Value,
}

/// Application-level error kinds.
///
/// `CodeCollision` and `DuplicateUrl` are storage-constraint signals that
/// the shortener resolves internally (retry with a fresh code, re-fetch the
/// existing mapping); they are never meant to reach an HTTP response, but
/// map to 409 if they ever do.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{message}")]
    Validation { message: String, details: Value },

    #[error("{message}")]
    NotFound { message: String, details: Value },

    #[error("short code already taken")]
    CodeCollision,

    #[error("original URL already mapped")]
    DuplicateUrl,

    #[error("{message}")]
    Internal { message: String, details: Value },
}

impl AppError {
    pub fn bad_request(message: impl Into<String>, details: Value) -> Self {
        Self::Validation {
            message: message.into(),
            details,
        }
    }

    pub fn not_found(message: impl Into<String>, details: Value) -> Self {
        Self::NotFound {
            message: message.into(),
            details,
        }
    }

    pub fn internal(message: impl Into<String>, details: Value) -> Self {
        Self::Internal {
            message: message.into(),
            details,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message, details) = match self {
            AppError::Validation { message, details } => (
                StatusCode::BAD_REQUEST,
                "validation_error",
                message,
                details,
            ),
            AppError::NotFound { message, details } => {
                (StatusCode::NOT_FOUND, "not_found", message, details)
            }
            AppError::CodeCollision => (
                StatusCode::CONFLICT,
                "conflict",
                "short code already taken".to_string(),
                json!({}),
            ),
            AppError::DuplicateUrl => (
                StatusCode::CONFLICT,
                "conflict",
                "original URL already mapped".to_string(),
                json!({}),
            ),
            AppError::Internal { message, details } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal_error",
                message,
                details,
            ),
        };

        let body = ErrorBody {
            error: ErrorInfo {
                code,
                message,
                details,
            },
        };

        (status, Json(body)).into_response()
    }
}

/// Maps a sqlx error to an [`AppError`], distinguishing which unique
/// constraint was violated so the caller can pick the right recovery.
pub fn map_sqlx_error(e: sqlx::Error) -> AppError {
    if let Some(db) = e.as_database_error()
        && db.is_unique_violation()
    {
        return match db.constraint() {
            Some("short_mappings_short_code_key") => AppError::CodeCollision,
            Some("short_mappings_original_url_key") => AppError::DuplicateUrl,
            other => AppError::internal(
                "Unique constraint violation",
                json!({ "constraint": other }),
            ),
        };
    }

    AppError::internal("Database error", json!({ "cause": e.to_string() }))
}
