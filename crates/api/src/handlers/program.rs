//! Handlers for the `/programs` resource.
//!
//! Programs are the root of most associations: deleting one cascades to its
//! courses, link rows, and contents.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;

use curricula_core::error::CoreError;
use curricula_core::types::DbId;
use curricula_db::models::program::{CreateProgram, UpdateProgram};
use curricula_db::repositories::ProgramRepo;

use crate::error::{AppError, AppResult};
use crate::handlers::admin::require_field;
use crate::middleware::rbac::{RequireAdmin, RequireAuth};
use crate::query::ProgramListParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `POST /programs`.
#[derive(Debug, Deserialize)]
pub struct CreateProgramRequest {
    pub name: Option<String>,
}

/// GET /api/v1/programs?assigned=false
///
/// List programs with courses and learning lines embedded. A DOCENT passing
/// `assigned=true` sees only programs they are assigned to.
pub async fn list(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Query(params): Query<ProgramListParams>,
) -> AppResult<impl IntoResponse> {
    let assigned_to = (params.assigned && user.is_docent()).then_some(user.user_id);
    let programs = ProgramRepo::list_with_relations(&state.pool, assigned_to).await?;
    Ok(Json(DataResponse { data: programs }))
}

/// GET /api/v1/programs/{id}
///
/// Program detail with linked learning lines, each carrying its ordered
/// components.
pub async fn get(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let detail = ProgramRepo::find_detail(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Program",
            id,
        }))?;
    Ok(Json(DataResponse { data: detail }))
}

/// POST /api/v1/programs
///
/// Create a new program.
pub async fn create(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Json(input): Json<CreateProgramRequest>,
) -> AppResult<impl IntoResponse> {
    let name = require_field(input.name, "name")?;
    let program = ProgramRepo::create(&state.pool, &CreateProgram { name }).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: program })))
}

/// PUT /api/v1/programs/{id}
///
/// Update a program's name.
pub async fn update(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateProgram>,
) -> AppResult<impl IntoResponse> {
    let program = ProgramRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Program",
            id,
        }))?;
    Ok(Json(DataResponse { data: program }))
}

/// DELETE /api/v1/programs/{id}
///
/// Delete a program. Courses, link rows, and contents cascade.
pub async fn delete(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = ProgramRepo::delete(&state.pool, id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Program",
            id,
        }));
    }
    Ok(StatusCode::NO_CONTENT)
}
