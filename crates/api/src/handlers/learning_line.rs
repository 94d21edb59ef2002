//! Handlers for the `/learning-lines` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;

use curricula_core::error::CoreError;
use curricula_core::types::DbId;
use curricula_db::models::learning_line::{CreateLearningLine, UpdateLearningLine};
use curricula_db::repositories::LearningLineRepo;

use crate::error::{AppError, AppResult};
use crate::handlers::admin::require_field;
use crate::middleware::rbac::{RequireAdmin, RequireAuth};
use crate::query::ProgramScopedParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `POST /learning-lines`.
#[derive(Debug, Deserialize)]
pub struct CreateLearningLineRequest {
    pub title: Option<String>,
    /// Programs to link the learning line to.
    pub program_ids: Option<Vec<DbId>>,
}

/// Request body for `PUT /learning-lines/{id}`.
#[derive(Debug, Deserialize)]
pub struct UpdateLearningLineRequest {
    pub title: Option<String>,
    /// When present, program links are replaced wholesale.
    pub program_ids: Option<Vec<DbId>>,
}

/// GET /api/v1/learning-lines?program_id=
///
/// List learning lines with ordered components and linked programs embedded.
pub async fn list(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    Query(params): Query<ProgramScopedParams>,
) -> AppResult<impl IntoResponse> {
    let lines = LearningLineRepo::list_with_relations(&state.pool, params.program_id).await?;
    Ok(Json(DataResponse { data: lines }))
}

/// POST /api/v1/learning-lines
///
/// Create a new learning line, optionally linked to programs.
pub async fn create(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Json(input): Json<CreateLearningLineRequest>,
) -> AppResult<impl IntoResponse> {
    let title = require_field(input.title, "title")?;
    let program_ids = input.program_ids.unwrap_or_default();
    let line = LearningLineRepo::create_with_programs(
        &state.pool,
        &CreateLearningLine { title },
        &program_ids,
    )
    .await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: line })))
}

/// PUT /api/v1/learning-lines/{id}
///
/// Update a learning line; `program_ids` replaces the program links.
pub async fn update(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateLearningLineRequest>,
) -> AppResult<impl IntoResponse> {
    let update_dto = UpdateLearningLine { title: input.title };
    let line = LearningLineRepo::update(&state.pool, id, &update_dto, input.program_ids.as_deref())
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "LearningLine",
            id,
        }))?;
    Ok(Json(DataResponse { data: line }))
}

/// DELETE /api/v1/learning-lines/{id}
///
/// Delete a learning line. Components, link rows, and contents cascade.
pub async fn delete(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = LearningLineRepo::delete(&state.pool, id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "LearningLine",
            id,
        }));
    }
    Ok(StatusCode::NO_CONTENT)
}
