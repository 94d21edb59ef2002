//! Handlers for the `/components` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;

use curricula_core::error::CoreError;
use curricula_core::types::DbId;
use curricula_db::models::component::{CreateComponent, UpdateComponent};
use curricula_db::repositories::ComponentRepo;

use crate::error::{AppError, AppResult};
use crate::handlers::admin::require_field;
use crate::middleware::rbac::{RequireAdmin, RequireAuth};
use crate::query::LearningLineScopedParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `POST /components`.
#[derive(Debug, Deserialize)]
pub struct CreateComponentRequest {
    pub name: Option<String>,
    pub learning_line_id: Option<DbId>,
    pub sort_order: Option<i32>,
}

/// GET /api/v1/components?learning_line_id=
///
/// List components ordered by sort order, with the parent line embedded.
pub async fn list(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    Query(params): Query<LearningLineScopedParams>,
) -> AppResult<impl IntoResponse> {
    let components = ComponentRepo::list_with_line(&state.pool, params.learning_line_id).await?;
    Ok(Json(DataResponse { data: components }))
}

/// POST /api/v1/components
///
/// Create a new component under a learning line.
pub async fn create(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Json(input): Json<CreateComponentRequest>,
) -> AppResult<impl IntoResponse> {
    let name = require_field(input.name, "name")?;
    let learning_line_id = input.learning_line_id.ok_or(AppError::Core(
        CoreError::Validation("learning_line_id is required".into()),
    ))?;

    let component = ComponentRepo::create(
        &state.pool,
        &CreateComponent {
            name,
            learning_line_id,
            sort_order: input.sort_order,
        },
    )
    .await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: component })))
}

/// PUT /api/v1/components/{id}
///
/// Update a component's name, parent line, or sort order.
pub async fn update(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateComponent>,
) -> AppResult<impl IntoResponse> {
    let component = ComponentRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Component",
            id,
        }))?;
    Ok(Json(DataResponse { data: component }))
}

/// DELETE /api/v1/components/{id}
///
/// Delete a component. Contents referencing it cascade.
pub async fn delete(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = ComponentRepo::delete(&state.pool, id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Component",
            id,
        }));
    }
    Ok(StatusCode::NO_CONTENT)
}
