//! Handlers for the `/admin/users` resource (user management).
//!
//! All handlers require the `ADMIN` role via [`RequireAdmin`].

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use curricula_core::error::CoreError;
use curricula_core::roles;
use curricula_core::types::DbId;
use curricula_db::models::user::{CreateUser, UpdateUser, User, UserResponse};
use curricula_db::repositories::{UserProgramRepo, UserRepo};

use crate::auth::password::{hash_password, validate_password_strength};
use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Request body for `POST /admin/users`.
#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub email: Option<String>,
    pub password: Option<String>,
    pub role: Option<String>,
    /// Programs to assign the user to (docenten only in practice).
    pub program_ids: Option<Vec<DbId>>,
}

/// Request body for `PUT /admin/users/{id}`.
#[derive(Debug, Deserialize)]
pub struct UpdateUserRequest {
    pub email: Option<String>,
    pub password: Option<String>,
    pub role: Option<String>,
    pub is_active: Option<bool>,
    /// When present, program assignments are replaced wholesale.
    pub program_ids: Option<Vec<DbId>>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/admin/users
///
/// List all users newest-first, with program assignments embedded.
pub async fn list_users(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> AppResult<Json<DataResponse<Vec<UserResponse>>>> {
    let users = UserRepo::list(&state.pool).await?;

    let ids: Vec<DbId> = users.iter().map(|u| u.id).collect();
    let mut programs = UserProgramRepo::programs_for_users(&state.pool, &ids).await?;

    let data = users
        .iter()
        .map(|user| UserResponse::from_user(user, programs.remove(&user.id).unwrap_or_default()))
        .collect();

    Ok(Json(DataResponse { data }))
}

/// POST /api/v1/admin/users
///
/// Create a new user. Validates the role name and password strength, hashes
/// the password, and creates program assignments in the same transaction.
/// Returns a safe [`UserResponse`] with 201 Created.
pub async fn create_user(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Json(input): Json<CreateUserRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<UserResponse>>)> {
    let email = require_field(input.email, "email")?;
    let password = require_field(input.password, "password")?;
    let role = require_field(input.role, "role")?;

    if !roles::is_valid_role(&role) {
        return Err(AppError::Core(CoreError::Validation(format!(
            "Unknown role: {role}"
        ))));
    }

    validate_password_strength(&password)
        .map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;

    let hashed = hash_password(&password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let create_dto = CreateUser {
        email,
        password_hash: hashed,
        role,
    };
    let program_ids = input.program_ids.unwrap_or_default();

    let user = UserRepo::create_with_programs(&state.pool, &create_dto, &program_ids).await?;
    let response = user_to_response(&state, &user).await?;

    Ok((StatusCode::CREATED, Json(DataResponse { data: response })))
}

/// PUT /api/v1/admin/users/{id}
///
/// Update a user. Password is re-hashed when provided; when `program_ids`
/// is present the assignments are replaced wholesale.
pub async fn update_user(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateUserRequest>,
) -> AppResult<Json<DataResponse<UserResponse>>> {
    if let Some(role) = &input.role {
        if !roles::is_valid_role(role) {
            return Err(AppError::Core(CoreError::Validation(format!(
                "Unknown role: {role}"
            ))));
        }
    }

    let password_hash = match &input.password {
        Some(password) => {
            validate_password_strength(password)
                .map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;
            let hashed = hash_password(password)
                .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;
            Some(hashed)
        }
        None => None,
    };

    let update_dto = UpdateUser {
        email: input.email,
        role: input.role,
        is_active: input.is_active,
        password_hash,
    };

    let user = UserRepo::update(
        &state.pool,
        id,
        &update_dto,
        input.program_ids.as_deref(),
    )
    .await?
    .ok_or(AppError::Core(CoreError::NotFound { entity: "User", id }))?;

    let response = user_to_response(&state, &user).await?;
    Ok(Json(DataResponse { data: response }))
}

/// DELETE /api/v1/admin/users/{id}
///
/// Deactivate a user (soft delete). Returns 204 No Content.
pub async fn delete_user(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deactivated = UserRepo::deactivate(&state.pool, id).await?;
    if !deactivated {
        return Err(AppError::Core(CoreError::NotFound { entity: "User", id }));
    }
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Reject `None` or blank strings with a 400 naming the missing field.
pub(crate) fn require_field(value: Option<String>, field: &str) -> AppResult<String> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(AppError::Core(CoreError::Validation(format!(
            "{field} is required"
        )))),
    }
}

/// Build a [`UserResponse`] with the user's program assignments embedded.
async fn user_to_response(state: &AppState, user: &User) -> AppResult<UserResponse> {
    let programs = UserProgramRepo::programs_for_user(&state.pool, user.id).await?;
    Ok(UserResponse::from_user(user, programs))
}
