use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use cliphub_core::error::CoreError;
use serde_json::json;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and adds HTTP-specific variants.
/// Implements [`IntoResponse`] to produce the single JSON error envelope
/// `{ "error": message, "code": CODE }`; raw transport and database errors
/// never reach the caller.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `cliphub_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A database error from sqlx.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// An internal error with a human-readable message.
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            // --- CoreError variants ---
            AppError::Core(core) => match core {
                CoreError::NotFound { entity, id } => (
                    StatusCode::NOT_FOUND,
                    "NOT_FOUND",
                    format!("{entity} with id {id} not found"),
                ),
                CoreError::MissingField(field) => (
                    StatusCode::BAD_REQUEST,
                    "MISSING_FIELD",
                    format!("Required field missing or empty: {field}"),
                ),
                CoreError::MissingAsset(field) => (
                    StatusCode::BAD_REQUEST,
                    "MISSING_ASSET",
                    format!("Required file missing: {field}"),
                ),
                CoreError::Upload(detail) => {
                    tracing::error!(error = %detail, "Media store upload failed");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "UPLOAD_FAILED",
                        "Failed to upload media to the remote store".to_string(),
                    )
                }
                CoreError::Persistence(detail) => {
                    tracing::error!(error = %detail, "Record persistence failed");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "PERSISTENCE_FAILED",
                        "Failed to persist the record".to_string(),
                    )
                }
                CoreError::InvalidSession => (
                    StatusCode::UNAUTHORIZED,
                    "INVALID_SESSION",
                    "Invalid or expired refresh token".to_string(),
                ),
                CoreError::Unauthenticated(msg) => {
                    (StatusCode::UNAUTHORIZED, "UNAUTHENTICATED", msg.clone())
                }
                CoreError::DuplicateLike => (
                    StatusCode::CONFLICT,
                    "ALREADY_LIKED",
                    "Video already liked by this user".to_string(),
                ),
                CoreError::Conflict(msg) => (StatusCode::CONFLICT, "CONFLICT", msg.clone()),
                CoreError::Internal(msg) => {
                    tracing::error!(error = %msg, "Internal core error");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "INTERNAL_ERROR",
                        "An internal error occurred".to_string(),
                    )
                }
            },

            // --- Database errors ---
            AppError::Database(err) => classify_sqlx_error(err),

            // --- HTTP-specific errors ---
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal error occurred".to_string(),
                )
            }
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}

/// Classify a sqlx error into an HTTP status, error code, and message.
///
/// - `RowNotFound` maps to 404.
/// - Unique constraint violations (constraint name starting with `uq_`) map to 409.
/// - Everything else maps to 500 with a sanitized message.
fn classify_sqlx_error(err: &sqlx::Error) -> (StatusCode, &'static str, String) {
    match err {
        sqlx::Error::RowNotFound => (
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            "Resource not found".to_string(),
        ),
        sqlx::Error::Database(db_err) => {
            // PostgreSQL unique constraint violation: error code 23505
            if db_err.code().as_deref() == Some("23505") {
                let constraint = db_err.constraint().unwrap_or("unknown");
                if constraint.starts_with("uq_") {
                    return (
                        StatusCode::CONFLICT,
                        "CONFLICT",
                        format!("Duplicate value violates unique constraint: {constraint}"),
                    );
                }
            }
            tracing::error!(error = %db_err, "Database error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                "An internal error occurred".to_string(),
            )
        }
        other => {
            tracing::error!(error = %other, "Database error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                "An internal error occurred".to_string(),
            )
        }
    }
}
