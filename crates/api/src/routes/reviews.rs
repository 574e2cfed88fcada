//! Route definitions for the `/reviews` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::reviews;
use crate::state::AppState;

/// Routes mounted at `/reviews`.
///
/// ```text
/// GET    /        -> list
/// POST   /        -> create (requires auth)
/// GET    /stats   -> stats
/// GET    /{id}    -> get_by_id
/// PUT    /{id}    -> update (author or admin)
/// DELETE /{id}    -> delete (author or admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(reviews::list).post(reviews::create))
        .route("/stats", get(reviews::stats))
        .route(
            "/{id}",
            get(reviews::get_by_id)
                .put(reviews::update)
                .delete(reviews::delete),
        )
}
