//! Route definitions for the `/styles` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::styles;
use crate::state::AppState;

/// Routes mounted at `/styles`.
///
/// ```text
/// GET    /       -> list
/// POST   /       -> create (admin)
/// GET    /{id}   -> get_by_id
/// PUT    /{id}   -> update (admin)
/// DELETE /{id}   -> delete (admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(styles::list).post(styles::create))
        .route(
            "/{id}",
            get(styles::get_by_id)
                .put(styles::update)
                .delete(styles::delete),
        )
}
