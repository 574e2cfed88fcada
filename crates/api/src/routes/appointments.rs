//! Route definitions for the `/appointments` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::appointments;
use crate::state::AppState;

/// Routes mounted at `/appointments`. All require auth.
///
/// ```text
/// GET    /       -> list
/// POST   /       -> create
/// GET    /{id}   -> get_by_id (owner or admin)
/// PUT    /{id}   -> update (owner or admin)
/// DELETE /{id}   -> delete (owner or admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(appointments::list).post(appointments::create))
        .route(
            "/{id}",
            get(appointments::get_by_id)
                .put(appointments::update)
                .delete(appointments::delete),
        )
}
