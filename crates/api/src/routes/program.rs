//! Route definitions for the `/programs` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::program;
use crate::state::AppState;

/// Routes mounted at `/programs`.
///
/// ```text
/// GET    /       -> list (?assigned=true scopes a DOCENT to their programs)
/// POST   /       -> create
/// GET    /{id}   -> get (detail with learning lines + components)
/// PUT    /{id}   -> update
/// DELETE /{id}   -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(program::list).post(program::create))
        .route(
            "/{id}",
            get(program::get)
                .put(program::update)
                .delete(program::delete),
        )
}
