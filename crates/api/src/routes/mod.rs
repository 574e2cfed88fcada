pub mod appointments;
pub mod auth;
pub mod categories;
pub mod health;
pub mod orders;
pub mod products;
pub mod reviews;
pub mod styles;
pub mod stylists;
pub mod users;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /auth/register, /auth/login, /auth/refresh       public
/// /auth/profile, /auth/change-password, /auth/logout
///
/// /users, /users/{id}
/// /styles, /styles/{id}
/// /stylists, /stylists/{id}
/// /products, /products/{id}
/// /categories, /categories/all, /categories/{id}
/// /appointments, /appointments/{id}
/// /reviews, /reviews/stats, /reviews/{id}
/// /orders, /orders/summaries, /orders/customer/{customer_id}
/// /orders/{id}, /orders/{id}/items, /orders/{id}/cancel
/// ```
///
/// Authorization is enforced per handler through the `AuthUser`,
/// `MaybeAuthUser` and `RequireAdmin` extractors.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/users", users::router())
        .nest("/styles", styles::router())
        .nest("/stylists", stylists::router())
        .nest("/products", products::router())
        .nest("/categories", categories::router())
        .nest("/appointments", appointments::router())
        .nest("/reviews", reviews::router())
        .nest("/orders", orders::router())
}
