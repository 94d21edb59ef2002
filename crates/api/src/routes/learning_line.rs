//! Route definitions for the `/learning-lines` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::learning_line;
use crate::state::AppState;

/// Routes mounted at `/learning-lines`.
///
/// ```text
/// GET    /       -> list (?program_id= filters by linked program)
/// POST   /       -> create
/// PUT    /{id}   -> update
/// DELETE /{id}   -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(learning_line::list).post(learning_line::create))
        .route(
            "/{id}",
            axum::routing::put(learning_line::update).delete(learning_line::delete),
        )
}
