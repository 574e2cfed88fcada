//! Authentication and role checks that run before any query.

mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use common::{
    admin_token, body_json, build_offline_app, customer_token, get, get_auth, post_json_auth,
    put_json_auth, token_for,
};
use salon_api::auth::jwt::{generate_access_token, JwtConfig};
use salon_core::types::DbId;
use salon_core::vocab::UserRole;
use serde_json::json;
use tower::ServiceExt;

#[tokio::test]
async fn profile_requires_a_token() {
    let response = get(build_offline_app(), "/api/v1/auth/profile").await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = body_json(response).await;
    assert_eq!(json["success"], false);
    assert_eq!(json["error"], "UNAUTHORIZED");
    assert_eq!(json["message"], "Missing Authorization header");
}

#[tokio::test]
async fn non_bearer_scheme_is_rejected() {
    let request = Request::builder()
        .uri("/api/v1/appointments")
        .header("Authorization", "Basic c2Fsb246c2Fsb24=")
        .body(Body::empty())
        .unwrap();
    let response = build_offline_app().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = body_json(response).await;
    assert_eq!(
        json["message"],
        "Invalid Authorization format. Expected: Bearer <token>"
    );
}

#[tokio::test]
async fn garbage_token_is_rejected() {
    let response = get_auth(build_offline_app(), "/api/v1/orders", "not.a.jwt").await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = body_json(response).await;
    assert_eq!(json["message"], "Invalid or expired token");
}

#[tokio::test]
async fn token_signed_with_another_secret_is_rejected() {
    let foreign = JwtConfig {
        secret: "some-other-deployment".to_string(),
        access_token_expiry_mins: 15,
        refresh_token_expiry_days: 7,
    };
    let token =
        generate_access_token(DbId::new_v4(), "admin@example.com", UserRole::Admin, &foreign)
            .unwrap();

    let response = get_auth(build_offline_app(), "/api/v1/users", &token).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn invalid_token_on_public_route_is_still_rejected() {
    let response = get_auth(build_offline_app(), "/api/v1/products", "expired-or-forged").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn customers_cannot_reach_admin_routes() {
    let token = customer_token();

    let response = get_auth(build_offline_app(), "/api/v1/users", &token).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let json = body_json(response).await;
    assert_eq!(json["error"], "FORBIDDEN");
    assert_eq!(json["message"], "Admin role required");

    let response = get_auth(build_offline_app(), "/api/v1/orders/summaries", &token).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = get_auth(build_offline_app(), "/api/v1/categories/all", &token).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn role_check_runs_before_body_validation() {
    let response = post_json_auth(
        build_offline_app(),
        "/api/v1/styles",
        json!({ "name": "" }),
        &customer_token(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn customers_cannot_list_another_customers_orders() {
    let me = token_for(DbId::new_v4(), UserRole::Customer);
    let uri = format!("/api/v1/orders/customer/{}", DbId::new_v4());

    let response = get_auth(build_offline_app(), &uri, &me).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn customers_cannot_verify_reviews() {
    let uri = format!("/api/v1/reviews/{}", DbId::new_v4());
    let response = put_json_auth(
        build_offline_app(),
        &uri,
        json!({ "is_verified": true }),
        &customer_token(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let json = body_json(response).await;
    assert_eq!(json["message"], "Only administrators can change verification");
}

#[tokio::test]
async fn admin_passes_role_check_and_reaches_validation() {
    let response = post_json_auth(
        build_offline_app(),
        "/api/v1/styles",
        json!({}),
        &admin_token(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
