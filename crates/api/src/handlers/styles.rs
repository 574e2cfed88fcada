//! Handlers for the `/styles` resource.

use axum::extract::State;
use axum::http::StatusCode;
use salon_core::schema::common::IdParams;
use salon_core::schema::style::{CreateStyleInput, StyleListQuery, UpdateStyleInput};
use salon_db::models::style::Style;
use salon_db::repositories::StyleRepo;

use super::not_found;
use crate::error::AppResult;
use crate::extract::{ValidJson, ValidPath, ValidQuery, Validated};
use crate::middleware::rbac::RequireAdmin;
use crate::response::{self, CreatedResponse, JsonResponse};
use crate::state::AppState;

/// GET /api/v1/styles
pub async fn list(
    State(state): State<AppState>,
    ValidQuery(params): ValidQuery<StyleListQuery>,
) -> AppResult<JsonResponse<Vec<Style>>> {
    let styles = StyleRepo::list(&state.pool, &params).await?;
    Ok(response::ok(styles))
}

/// GET /api/v1/styles/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    ValidPath(IdParams { id }): ValidPath<IdParams>,
) -> AppResult<JsonResponse<Style>> {
    let style = StyleRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found("Style", id))?;
    Ok(response::ok(style))
}

/// POST /api/v1/styles (admin)
pub async fn create(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    ValidJson(input): ValidJson<CreateStyleInput>,
) -> AppResult<CreatedResponse<Style>> {
    let style = StyleRepo::create(&state.pool, &input).await?;
    tracing::info!(style_id = %style.id, category = %style.category, "Style created");
    Ok(response::created(style, "Style created successfully"))
}

/// PUT /api/v1/styles/{id} (admin)
pub async fn update(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    input: Validated<IdParams, (), UpdateStyleInput>,
) -> AppResult<JsonResponse<Style>> {
    let id = input.params.id;
    let style = StyleRepo::update(&state.pool, id, &input.body)
        .await?
        .ok_or_else(|| not_found("Style", id))?;
    tracing::info!(style_id = %id, "Style updated");
    Ok(response::ok_with(style, "Style updated successfully"))
}

/// DELETE /api/v1/styles/{id} (admin, hard delete)
///
/// Styles still referenced by appointments cannot be removed (400).
pub async fn delete(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    ValidPath(IdParams { id }): ValidPath<IdParams>,
) -> AppResult<StatusCode> {
    if StyleRepo::delete(&state.pool, id).await? {
        tracing::info!(style_id = %id, "Style deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found("Style", id))
    }
}
