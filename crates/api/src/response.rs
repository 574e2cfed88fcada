//! Shared success envelope for API handlers.
//!
//! Every successful response body is `{ "success": true, "data": ..., "message"?: ... }`.
//! Handlers build it through [`ok`], [`ok_with`] and [`created`] rather than
//! ad-hoc `json!` values.

use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;

/// Standard success envelope.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    pub data: T,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Handler return type for 200 responses.
pub type JsonResponse<T> = Json<ApiResponse<T>>;

/// Handler return type for 201 responses.
pub type CreatedResponse<T> = (StatusCode, Json<ApiResponse<T>>);

/// `200 OK` with `data`.
pub fn ok<T: Serialize>(data: T) -> JsonResponse<T> {
    Json(ApiResponse {
        success: true,
        data,
        message: None,
    })
}

/// `200 OK` with `data` and a human-readable message.
pub fn ok_with<T: Serialize>(data: T, message: impl Into<String>) -> JsonResponse<T> {
    Json(ApiResponse {
        success: true,
        data,
        message: Some(message.into()),
    })
}

/// `201 Created` echoing the persisted entity.
pub fn created<T: Serialize>(data: T, message: impl Into<String>) -> CreatedResponse<T> {
    (
        StatusCode::CREATED,
        Json(ApiResponse {
            success: true,
            data,
            message: Some(message.into()),
        }),
    )
}
