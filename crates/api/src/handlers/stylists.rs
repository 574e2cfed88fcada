//! Handlers for the `/stylists` resource.
//!
//! Deactivated stylists are hidden from everyone but admins.

use axum::extract::State;
use axum::http::StatusCode;
use salon_core::schema::common::IdParams;
use salon_core::schema::stylist::{CreateStylistInput, StylistListQuery, UpdateStylistInput};
use salon_db::models::stylist::Stylist;
use salon_db::repositories::StylistRepo;

use super::not_found;
use crate::error::AppResult;
use crate::extract::{ValidJson, ValidPath, ValidQuery, Validated};
use crate::middleware::auth::MaybeAuthUser;
use crate::middleware::rbac::RequireAdmin;
use crate::response::{self, CreatedResponse, JsonResponse};
use crate::state::AppState;

/// GET /api/v1/stylists
///
/// `include_inactive=true` is honoured for admins only.
pub async fn list(
    State(state): State<AppState>,
    caller: MaybeAuthUser,
    ValidQuery(params): ValidQuery<StylistListQuery>,
) -> AppResult<JsonResponse<Vec<Stylist>>> {
    let include_inactive = params.include_inactive && caller.is_admin();
    let stylists = StylistRepo::list(&state.pool, &params, include_inactive).await?;
    Ok(response::ok(stylists))
}

/// GET /api/v1/stylists/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    caller: MaybeAuthUser,
    ValidPath(IdParams { id }): ValidPath<IdParams>,
) -> AppResult<JsonResponse<Stylist>> {
    let stylist = StylistRepo::find_by_id(&state.pool, id)
        .await?
        .filter(|s| s.is_active || caller.is_admin())
        .ok_or_else(|| not_found("Stylist", id))?;
    Ok(response::ok(stylist))
}

/// POST /api/v1/stylists (admin)
pub async fn create(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    ValidJson(input): ValidJson<CreateStylistInput>,
) -> AppResult<CreatedResponse<Stylist>> {
    let stylist = StylistRepo::create(&state.pool, &input).await?;
    tracing::info!(stylist_id = %stylist.id, specialty = %stylist.specialty, "Stylist created");
    Ok(response::created(stylist, "Stylist created successfully"))
}

/// PUT /api/v1/stylists/{id} (admin)
pub async fn update(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    input: Validated<IdParams, (), UpdateStylistInput>,
) -> AppResult<JsonResponse<Stylist>> {
    let id = input.params.id;
    let stylist = StylistRepo::update(&state.pool, id, &input.body)
        .await?
        .ok_or_else(|| not_found("Stylist", id))?;
    tracing::info!(stylist_id = %id, "Stylist updated");
    Ok(response::ok_with(stylist, "Stylist updated successfully"))
}

/// DELETE /api/v1/stylists/{id} (admin, soft delete)
pub async fn delete(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    ValidPath(IdParams { id }): ValidPath<IdParams>,
) -> AppResult<StatusCode> {
    if StylistRepo::deactivate(&state.pool, id).await? {
        tracing::info!(stylist_id = %id, "Stylist deactivated");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found("Stylist", id))
    }
}
