//! Handlers for the `/courses` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;

use curricula_core::error::CoreError;
use curricula_core::types::DbId;
use curricula_db::models::course::{CreateCourse, UpdateCourse};
use curricula_db::repositories::CourseRepo;

use crate::error::{AppError, AppResult};
use crate::handlers::admin::require_field;
use crate::middleware::rbac::{RequireAdmin, RequireAuth, RequireDocent};
use crate::query::ProgramScopedParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `POST /courses`.
#[derive(Debug, Deserialize)]
pub struct CreateCourseRequest {
    pub name: Option<String>,
    pub program_id: Option<DbId>,
}

/// GET /api/v1/courses?program_id=
///
/// List courses with the parent program embedded.
pub async fn list(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    Query(params): Query<ProgramScopedParams>,
) -> AppResult<impl IntoResponse> {
    let courses = CourseRepo::list_with_program(&state.pool, params.program_id).await?;
    Ok(Json(DataResponse { data: courses }))
}

/// POST /api/v1/courses
///
/// Create a new course under a program.
pub async fn create(
    State(state): State<AppState>,
    RequireDocent(_user): RequireDocent,
    Json(input): Json<CreateCourseRequest>,
) -> AppResult<impl IntoResponse> {
    let name = require_field(input.name, "name")?;
    let program_id = input.program_id.ok_or(AppError::Core(CoreError::Validation(
        "program_id is required".into(),
    )))?;

    let course = CourseRepo::create(&state.pool, &CreateCourse { name, program_id }).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: course })))
}

/// PUT /api/v1/courses/{id}
///
/// Update a course's name or parent program.
pub async fn update(
    State(state): State<AppState>,
    RequireDocent(_user): RequireDocent,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateCourse>,
) -> AppResult<impl IntoResponse> {
    let course = CourseRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Course",
            id,
        }))?;
    Ok(Json(DataResponse { data: course }))
}

/// DELETE /api/v1/courses/{id}
///
/// Delete a course. Contents referencing it cascade.
pub async fn delete(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = CourseRepo::delete(&state.pool, id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Course",
            id,
        }));
    }
    Ok(StatusCode::NO_CONTENT)
}
