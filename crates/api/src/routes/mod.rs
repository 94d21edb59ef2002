//! Route modules, one per resource, plus the `/api/v1` tree builder.

pub mod admin;
pub mod auth;
pub mod component;
pub mod content;
pub mod course;
pub mod health;
pub mod learning_line;
pub mod program;
pub mod track;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/login               login (public)
/// /auth/refresh             refresh (public)
/// /auth/logout              logout (requires auth)
///
/// /admin/users              list, create (admin only)
/// /admin/users/{id}         update, deactivate
///
/// /programs                 list, create
/// /programs/{id}            get, update, delete
/// /learning-lines           list, create
/// /learning-lines/{id}      update, delete
/// /components               list, create
/// /components/{id}          update, delete
/// /tracks                   list, create
/// /tracks/{id}              update, delete
/// /courses                  list, create
/// /courses/{id}             update, delete
///
/// /contents                 list, create
/// /contents/bulk-import     atomic batch create
/// /contents/{id}            get, update, delete
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Authentication routes (login, refresh, logout).
        .nest("/auth", auth::router())
        // Admin routes (user management).
        .nest("/admin", admin::router())
        // Curriculum taxonomy.
        .nest("/programs", program::router())
        .nest("/learning-lines", learning_line::router())
        .nest("/components", component::router())
        .nest("/tracks", track::router())
        .nest("/courses", course::router())
        // Authored content.
        .nest("/contents", content::router())
}
