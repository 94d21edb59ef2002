//! Handlers for the `/tracks` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;

use curricula_core::error::CoreError;
use curricula_core::types::DbId;
use curricula_db::models::track::{CreateTrack, UpdateTrack};
use curricula_db::repositories::TrackRepo;

use crate::error::{AppError, AppResult};
use crate::handlers::admin::require_field;
use crate::middleware::rbac::{RequireAdmin, RequireAuth};
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `POST /tracks`.
#[derive(Debug, Deserialize)]
pub struct CreateTrackRequest {
    pub name: Option<String>,
    pub sort_order: Option<i32>,
    /// Programs to link the track to.
    pub program_ids: Option<Vec<DbId>>,
}

/// Request body for `PUT /tracks/{id}`.
#[derive(Debug, Deserialize)]
pub struct UpdateTrackRequest {
    pub name: Option<String>,
    pub sort_order: Option<i32>,
    /// When present, program links are replaced wholesale.
    pub program_ids: Option<Vec<DbId>>,
}

/// GET /api/v1/tracks
///
/// List tracks ordered by sort order, with linked programs embedded.
pub async fn list(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
) -> AppResult<impl IntoResponse> {
    let tracks = TrackRepo::list_with_programs(&state.pool).await?;
    Ok(Json(DataResponse { data: tracks }))
}

/// POST /api/v1/tracks
///
/// Create a new track, optionally linked to programs.
pub async fn create(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Json(input): Json<CreateTrackRequest>,
) -> AppResult<impl IntoResponse> {
    let name = require_field(input.name, "name")?;
    let program_ids = input.program_ids.unwrap_or_default();
    let track = TrackRepo::create_with_programs(
        &state.pool,
        &CreateTrack {
            name,
            sort_order: input.sort_order,
        },
        &program_ids,
    )
    .await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: track })))
}

/// PUT /api/v1/tracks/{id}
///
/// Update a track; `program_ids` replaces the program links.
pub async fn update(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateTrackRequest>,
) -> AppResult<impl IntoResponse> {
    let update_dto = UpdateTrack {
        name: input.name,
        sort_order: input.sort_order,
    };
    let track = TrackRepo::update(&state.pool, id, &update_dto, input.program_ids.as_deref())
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Track",
            id,
        }))?;
    Ok(Json(DataResponse { data: track }))
}

/// DELETE /api/v1/tracks/{id}
///
/// Delete a track. Link rows and contents cascade.
pub async fn delete(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = TrackRepo::delete(&state.pool, id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Track",
            id,
        }));
    }
    Ok(StatusCode::NO_CONTENT)
}
