//! Route definitions for the `/components` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::component;
use crate::state::AppState;

/// Routes mounted at `/components`.
///
/// ```text
/// GET    /       -> list (?learning_line_id= filters by parent line)
/// POST   /       -> create
/// PUT    /{id}   -> update
/// DELETE /{id}   -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(component::list).post(component::create))
        .route(
            "/{id}",
            axum::routing::put(component::update).delete(component::delete),
        )
}
