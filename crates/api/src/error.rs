use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use curricula_core::error::CoreError;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and adds HTTP-specific variants.
/// Implements [`IntoResponse`] to produce consistent JSON error responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `curricula_core`.
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
                CoreError::Validation(msg) => {
                    (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
                }
                CoreError::Conflict(msg) => (StatusCode::CONFLICT, "CONFLICT", msg.clone()),
                CoreError::Unauthorized(msg) => {
                    (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg.clone())
                }
                CoreError::Forbidden(msg) => (StatusCode::FORBIDDEN, "FORBIDDEN", msg.clone()),
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
/// - Foreign-key violations map to 400 (the referenced row does not exist).
/// - Everything else maps to 500 with a sanitized message.
fn classify_sqlx_error(err: &sqlx::Error) -> (StatusCode, &'static str, String) {
    match err {
        sqlx::Error::RowNotFound => (
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            "Resource not found".to_string(),
        ),
        sqlx::Error::Database(db_err) => {
            if let Some(classified) =
                classify_pg_violation(db_err.code().as_deref(), db_err.constraint())
            {
                return classified;
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

/// Map a Postgres constraint-violation code onto a client-facing status.
///
/// - 23505 (unique violation) on a `uq_`-named constraint → 409 Conflict.
/// - 23503 (foreign key violation) → 400 naming the failed reference.
///
/// Anything else returns `None` and falls through to the sanitized 500.
fn classify_pg_violation(
    code: Option<&str>,
    constraint: Option<&str>,
) -> Option<(StatusCode, &'static str, String)> {
    match code {
        Some("23505") => {
            let constraint = constraint.unwrap_or("unknown");
            if constraint.starts_with("uq_") {
                Some((
                    StatusCode::CONFLICT,
                    "CONFLICT",
                    format!("Duplicate value violates unique constraint: {constraint}"),
                ))
            } else {
                None
            }
        }
        Some("23503") => Some((
            StatusCode::BAD_REQUEST,
            "INVALID_REFERENCE",
            format!(
                "Referenced row does not exist: {}",
                constraint.unwrap_or("unknown")
            ),
        )),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_not_found_maps_to_404() {
        let (status, code, _) = classify_sqlx_error(&sqlx::Error::RowNotFound);
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(code, "NOT_FOUND");
    }

    #[test]
    fn test_unique_violation_on_uq_constraint_is_conflict() {
        let (status, code, message) =
            classify_pg_violation(Some("23505"), Some("uq_users_email")).unwrap();
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(code, "CONFLICT");
        assert!(message.contains("uq_users_email"));
    }

    #[test]
    fn test_unique_violation_on_other_constraint_falls_through() {
        // Non-uq_ constraints are not client errors and keep the 500 path.
        assert!(classify_pg_violation(Some("23505"), Some("sessions_pkey")).is_none());
        assert!(classify_pg_violation(Some("23505"), None).is_none());
    }

    #[test]
    fn test_fk_violation_is_bad_request() {
        let (status, code, message) =
            classify_pg_violation(Some("23503"), Some("contents_course_id_fkey")).unwrap();
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(code, "INVALID_REFERENCE");
        assert!(message.contains("contents_course_id_fkey"));
    }

    #[test]
    fn test_unknown_code_falls_through() {
        assert!(classify_pg_violation(Some("40001"), None).is_none());
        assert!(classify_pg_violation(None, Some("uq_users_email")).is_none());
    }
}
