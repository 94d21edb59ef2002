//! Route definitions for the `/contents` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::content;
use crate::state::AppState;

/// Routes mounted at `/contents`.
///
/// ```text
/// GET    /              -> list (five AND-combined equality filters)
/// POST   /              -> create
/// POST   /bulk-import   -> atomic batch create
/// GET    /{id}          -> get
/// PUT    /{id}          -> update
/// DELETE /{id}          -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(content::list).post(content::create))
        .route("/bulk-import", post(content::bulk_import))
        .route(
            "/{id}",
            get(content::get)
                .put(content::update)
                .delete(content::delete),
        )
}
