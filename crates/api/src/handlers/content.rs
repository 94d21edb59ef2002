//! Handlers for the `/contents` resource.
//!
//! Content writes are gated twice: the role check (ADMIN or DOCENT) via
//! [`RequireDocent`], and for DOCENT callers a program-membership check
//! against the target program. ADMIN bypasses the membership check.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;

use curricula_core::error::CoreError;
use curricula_core::types::DbId;
use curricula_db::models::content::{ContentFilter, CreateContent};
use curricula_db::repositories::{ContentRepo, UserProgramRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::{RequireAuth, RequireDocent};
use crate::query::ContentListParams;
use crate::response::{BulkImportResponse, DataResponse};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Request body for `POST /contents`, `PUT /contents/{id}`, and each item of
/// the bulk import payload.
#[derive(Debug, Deserialize)]
pub struct ContentPayload {
    pub rich_text_body: Option<String>,
    pub program_id: Option<DbId>,
    pub learning_line_id: Option<DbId>,
    pub component_id: Option<DbId>,
    pub track_id: Option<DbId>,
    pub course_id: Option<DbId>,
}

impl ContentPayload {
    /// Validate required fields and build the insert DTO.
    fn into_create(self) -> AppResult<CreateContent> {
        let rich_text_body = match self.rich_text_body {
            Some(body) if !body.trim().is_empty() => body,
            _ => {
                return Err(AppError::Core(CoreError::Validation(
                    "rich_text_body is required".into(),
                )))
            }
        };

        let require_id = |value: Option<DbId>, field: &str| {
            value.ok_or_else(|| AppError::Core(CoreError::Validation(format!("{field} is required"))))
        };

        Ok(CreateContent {
            rich_text_body,
            program_id: require_id(self.program_id, "program_id")?,
            learning_line_id: require_id(self.learning_line_id, "learning_line_id")?,
            component_id: require_id(self.component_id, "component_id")?,
            track_id: require_id(self.track_id, "track_id")?,
            course_id: require_id(self.course_id, "course_id")?,
        })
    }
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/contents?program_id=&learning_line_id=&component_id=&track_id=&course_id=
///
/// List content entries newest-first. Present filters combine with AND.
pub async fn list(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    Query(params): Query<ContentListParams>,
) -> AppResult<impl IntoResponse> {
    let filter = ContentFilter {
        program_id: params.program_id,
        learning_line_id: params.learning_line_id,
        component_id: params.component_id,
        track_id: params.track_id,
        course_id: params.course_id,
    };
    let contents = ContentRepo::list(&state.pool, &filter).await?;
    Ok(Json(DataResponse { data: contents }))
}

/// GET /api/v1/contents/{id}
///
/// One content entry with taxonomy entries and author embedded.
pub async fn get(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let detail = ContentRepo::find_detail(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Content",
            id,
        }))?;
    Ok(Json(DataResponse { data: detail }))
}

/// POST /api/v1/contents
///
/// Create a content entry. A DOCENT must be assigned to the target program.
pub async fn create(
    State(state): State<AppState>,
    RequireDocent(user): RequireDocent,
    Json(input): Json<ContentPayload>,
) -> AppResult<impl IntoResponse> {
    let create_dto = input.into_create()?;
    ensure_program_access(&state, &user, create_dto.program_id).await?;

    let content = ContentRepo::create(&state.pool, &create_dto, user.user_id).await?;
    let detail = ContentRepo::find_detail(&state.pool, content.id)
        .await?
        .ok_or_else(|| AppError::InternalError("Created content not found".into()))?;

    Ok((StatusCode::CREATED, Json(DataResponse { data: detail })))
}

/// PUT /api/v1/contents/{id}
///
/// Replace a content entry's body and taxonomy references. A DOCENT must be
/// assigned to both the current and the (possibly new) target program.
pub async fn update(
    State(state): State<AppState>,
    RequireDocent(user): RequireDocent,
    Path(id): Path<DbId>,
    Json(input): Json<ContentPayload>,
) -> AppResult<impl IntoResponse> {
    let update_dto = input.into_create()?;

    let existing = ContentRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Content",
            id,
        }))?;

    ensure_program_access(&state, &user, existing.program_id).await?;
    if update_dto.program_id != existing.program_id {
        ensure_program_access(&state, &user, update_dto.program_id).await?;
    }

    ContentRepo::update(&state.pool, id, &update_dto)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Content",
            id,
        }))?;

    let detail = ContentRepo::find_detail(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::InternalError("Updated content not found".into()))?;
    Ok(Json(DataResponse { data: detail }))
}

/// DELETE /api/v1/contents/{id}
///
/// Delete a content entry. A DOCENT must be assigned to its program.
pub async fn delete(
    State(state): State<AppState>,
    RequireDocent(user): RequireDocent,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let existing = ContentRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Content",
            id,
        }))?;

    ensure_program_access(&state, &user, existing.program_id).await?;

    ContentRepo::delete(&state.pool, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/contents/bulk-import
///
/// Insert a batch of content entries atomically. Every item is validated
/// (required fields plus per-item program membership for DOCENT callers)
/// before anything is written; one bad item rejects the whole batch.
pub async fn bulk_import(
    State(state): State<AppState>,
    RequireDocent(user): RequireDocent,
    Json(items): Json<Vec<ContentPayload>>,
) -> AppResult<impl IntoResponse> {
    if items.is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Import payload must contain at least one item".into(),
        )));
    }

    let mut create_dtos = Vec::with_capacity(items.len());
    for (index, item) in items.into_iter().enumerate() {
        let dto = item.into_create().map_err(|e| match e {
            AppError::Core(CoreError::Validation(msg)) => {
                AppError::Core(CoreError::Validation(format!("Item {index}: {msg}")))
            }
            other => other,
        })?;
        create_dtos.push(dto);
    }

    // Check membership once per distinct program.
    if user.is_docent() {
        let mut checked: Vec<DbId> = Vec::new();
        for dto in &create_dtos {
            if !checked.contains(&dto.program_id) {
                ensure_program_access(&state, &user, dto.program_id).await?;
                checked.push(dto.program_id);
            }
        }
    }

    let created = ContentRepo::bulk_create(&state.pool, &create_dtos, user.user_id).await?;
    let ids: Vec<DbId> = created.iter().map(|c| c.id).collect();
    let details = ContentRepo::find_details(&state.pool, &ids).await?;

    Ok((
        StatusCode::CREATED,
        Json(BulkImportResponse {
            count: details.len(),
            data: details,
        }),
    ))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// 403 unless the caller is an ADMIN or a DOCENT assigned to the program.
async fn ensure_program_access(
    state: &AppState,
    user: &AuthUser,
    program_id: DbId,
) -> AppResult<()> {
    if !user.is_docent() {
        return Ok(());
    }
    let assigned = UserProgramRepo::is_assigned(&state.pool, user.user_id, program_id).await?;
    if !assigned {
        return Err(AppError::Core(CoreError::Forbidden(
            "You are not assigned to this program".into(),
        )));
    }
    Ok(())
}
