//! Route definitions for the `/auth` resource.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::auth;
use crate::state::AppState;

/// Routes mounted at `/auth`.
///
/// ```text
/// POST /register         -> register
/// POST /login            -> login
/// POST /refresh          -> refresh
/// GET  /profile          -> profile (requires auth)
/// PUT  /change-password  -> change_password (requires auth)
/// POST /logout           -> logout (requires auth)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        .route("/refresh", post(auth::refresh))
        .route("/profile", get(auth::profile))
        .route("/change-password", put(auth::change_password))
        .route("/logout", post(auth::logout))
}
