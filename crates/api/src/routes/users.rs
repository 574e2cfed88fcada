//! Route definitions for the `/users` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::users;
use crate::state::AppState;

/// Routes mounted at `/users`.
///
/// ```text
/// GET    /       -> list (admin)
/// POST   /       -> create (admin)
/// GET    /{id}   -> get_by_id (self or admin)
/// PUT    /{id}   -> update (self or admin)
/// DELETE /{id}   -> delete (admin, soft)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(users::list).post(users::create))
        .route(
            "/{id}",
            get(users::get_by_id)
                .put(users::update)
                .delete(users::delete),
        )
}
