//! Route definitions for the `/stylists` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::stylists;
use crate::state::AppState;

/// Routes mounted at `/stylists`.
///
/// ```text
/// GET    /       -> list
/// POST   /       -> create (admin)
/// GET    /{id}   -> get_by_id
/// PUT    /{id}   -> update (admin)
/// DELETE /{id}   -> delete (admin, soft)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(stylists::list).post(stylists::create))
        .route(
            "/{id}",
            get(stylists::get_by_id)
                .put(stylists::update)
                .delete(stylists::delete),
        )
}
