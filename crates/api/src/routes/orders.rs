//! Route definitions for the `/orders` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::orders;
use crate::state::AppState;

/// Routes mounted at `/orders`. All require auth.
///
/// ```text
/// GET  /                         -> list (own orders unless admin)
/// POST /                         -> create
/// GET  /summaries                -> summaries (admin)
/// GET  /customer/{customer_id}   -> by_customer (that customer or admin)
/// GET  /{id}                     -> get_by_id (owner or admin)
/// PUT  /{id}                     -> update (admin)
/// GET  /{id}/items               -> items (owner or admin)
/// POST /{id}/cancel              -> cancel (owner or admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(orders::list).post(orders::create))
        .route("/summaries", get(orders::summaries))
        .route("/customer/{customer_id}", get(orders::by_customer))
        .route("/{id}", get(orders::get_by_id).put(orders::update))
        .route("/{id}/items", get(orders::items))
        .route("/{id}/cancel", post(orders::cancel))
}
