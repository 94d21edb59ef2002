//! Domain-level error type shared across crates.

use crate::types::DbId;

/// Domain errors produced below the HTTP layer.
///
/// The api crate maps each variant onto an HTTP status in its `AppError`
/// `IntoResponse` implementation.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// A referenced entity does not exist.
    #[error("{entity} with id {id} not found")]
    NotFound { entity: &'static str, id: DbId },

    /// Input failed validation. The message is safe to show to callers.
    #[error("validation error: {0}")]
    Validation(String),

    /// The operation conflicts with existing state (e.g. duplicate email).
    #[error("conflict: {0}")]
    Conflict(String),

    /// Missing or invalid credentials.
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// Authenticated, but not allowed to perform this operation.
    #[error("forbidden: {0}")]
    Forbidden(String),

    /// Unexpected internal failure. The message is logged, never returned.
    #[error("internal error: {0}")]
    Internal(String),
}
