//! Handlers for the `/categories` resource.
//!
//! Names are unique case-insensitively; the pre-check gives a readable 409
//! and `uq_categories_name` catches the race.

use axum::extract::State;
use axum::http::StatusCode;
use salon_core::schema::category::{CreateCategoryInput, UpdateCategoryInput};
use salon_core::schema::common::IdParams;
use salon_core::uniqueness::ensure_category_name_available;
use salon_db::models::category::Category;
use salon_db::repositories::CategoryRepo;
use salon_db::store::PgStore;

use super::not_found;
use crate::error::AppResult;
use crate::extract::{ValidJson, ValidPath, Validated};
use crate::middleware::rbac::RequireAdmin;
use crate::response::{self, CreatedResponse, JsonResponse};
use crate::state::AppState;

/// GET /api/v1/categories
///
/// Active categories ordered by `display_order`, then name.
pub async fn list(State(state): State<AppState>) -> AppResult<JsonResponse<Vec<Category>>> {
    let categories = CategoryRepo::list_active(&state.pool).await?;
    Ok(response::ok(categories))
}

/// GET /api/v1/categories/all (admin)
pub async fn list_all(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> AppResult<JsonResponse<Vec<Category>>> {
    let categories = CategoryRepo::list_all(&state.pool).await?;
    Ok(response::ok(categories))
}

/// GET /api/v1/categories/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    ValidPath(IdParams { id }): ValidPath<IdParams>,
) -> AppResult<JsonResponse<Category>> {
    let category = CategoryRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found("Category", id))?;
    Ok(response::ok(category))
}

/// POST /api/v1/categories (admin)
pub async fn create(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    ValidJson(input): ValidJson<CreateCategoryInput>,
) -> AppResult<CreatedResponse<Category>> {
    ensure_category_name_available(&PgStore::new(&state.pool), &input.name, None).await?;
    let category = CategoryRepo::create(&state.pool, &input).await?;
    tracing::info!(category_id = %category.id, name = %category.name, "Category created");
    Ok(response::created(category, "Category created successfully"))
}

/// PUT /api/v1/categories/{id} (admin)
pub async fn update(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    input: Validated<IdParams, (), UpdateCategoryInput>,
) -> AppResult<JsonResponse<Category>> {
    let id = input.params.id;
    if let Some(name) = &input.body.name {
        ensure_category_name_available(&PgStore::new(&state.pool), name, Some(id)).await?;
    }
    let category = CategoryRepo::update(&state.pool, id, &input.body)
        .await?
        .ok_or_else(|| not_found("Category", id))?;
    tracing::info!(category_id = %id, "Category updated");
    Ok(response::ok_with(category, "Category updated successfully"))
}

/// DELETE /api/v1/categories/{id} (admin, soft delete)
pub async fn delete(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    ValidPath(IdParams { id }): ValidPath<IdParams>,
) -> AppResult<StatusCode> {
    if CategoryRepo::deactivate(&state.pool, id).await? {
        tracing::info!(category_id = %id, "Category deactivated");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found("Category", id))
    }
}
