//! Handlers for the `/products` resource.

use axum::extract::State;
use axum::http::StatusCode;
use salon_core::schema::common::IdParams;
use salon_core::schema::product::{CreateProductInput, ProductListQuery, UpdateProductInput};
use salon_db::models::product::Product;
use salon_db::repositories::ProductRepo;

use super::not_found;
use crate::error::AppResult;
use crate::extract::{ValidJson, ValidPath, ValidQuery, Validated};
use crate::middleware::auth::MaybeAuthUser;
use crate::middleware::rbac::RequireAdmin;
use crate::response::{self, CreatedResponse, JsonResponse};
use crate::state::AppState;

/// GET /api/v1/products
///
/// Filters are ANDed. Non-admins only ever see active products, whatever
/// `is_active` they ask for.
pub async fn list(
    State(state): State<AppState>,
    caller: MaybeAuthUser,
    ValidQuery(params): ValidQuery<ProductListQuery>,
) -> AppResult<JsonResponse<Vec<Product>>> {
    let products = ProductRepo::list(&state.pool, &params, !caller.is_admin()).await?;
    tracing::debug!(count = products.len(), "Listed products");
    Ok(response::ok(products))
}

/// GET /api/v1/products/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    caller: MaybeAuthUser,
    ValidPath(IdParams { id }): ValidPath<IdParams>,
) -> AppResult<JsonResponse<Product>> {
    let product = ProductRepo::find_by_id(&state.pool, id)
        .await?
        .filter(|p| p.is_active || caller.is_admin())
        .ok_or_else(|| not_found("Product", id))?;
    Ok(response::ok(product))
}

/// POST /api/v1/products (admin)
pub async fn create(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    ValidJson(input): ValidJson<CreateProductInput>,
) -> AppResult<CreatedResponse<Product>> {
    let product = ProductRepo::create(&state.pool, &input).await?;
    tracing::info!(product_id = %product.id, price = %product.price, "Product created");
    Ok(response::created(product, "Product created successfully"))
}

/// PUT /api/v1/products/{id} (admin)
pub async fn update(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    input: Validated<IdParams, (), UpdateProductInput>,
) -> AppResult<JsonResponse<Product>> {
    let id = input.params.id;
    let product = ProductRepo::update(&state.pool, id, &input.body)
        .await?
        .ok_or_else(|| not_found("Product", id))?;
    tracing::info!(product_id = %id, "Product updated");
    Ok(response::ok_with(product, "Product updated successfully"))
}

/// DELETE /api/v1/products/{id} (admin, soft delete)
pub async fn delete(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    ValidPath(IdParams { id }): ValidPath<IdParams>,
) -> AppResult<StatusCode> {
    if ProductRepo::deactivate(&state.pool, id).await? {
        tracing::info!(product_id = %id, "Product deactivated");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found("Product", id))
    }
}
