//! Handlers for the `/orders` resource.
//!
//! Prices, tax, and shipping are computed server-side inside
//! [`OrderRepo::place`]; clients only send product ids and quantities.

use axum::extract::State;
use chrono::Utc;
use salon_core::orders::order_number;
use salon_core::schema::common::{CustomerIdParams, IdParams};
use salon_core::schema::order::{
    CancelOrderInput, CreateOrderInput, OrderListQuery, UpdateOrderInput,
};
use salon_core::types::DbId;
use salon_db::models::order::{NewOrder, Order, OrderItem, OrderSummary, OrderWithItems};
use salon_db::repositories::OrderRepo;

use super::not_found;
use crate::error::AppResult;
use crate::extract::{ValidJson, ValidPath, ValidQuery, Validated};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::{ensure_owner_or_admin, RequireAdmin};
use crate::response::{self, CreatedResponse, JsonResponse};
use crate::state::AppState;

const ADMIN_CANCEL_REASON: &str = "Cancelled by administrator";

async fn load_owned(state: &AppState, auth: &AuthUser, id: DbId) -> AppResult<Order> {
    let order = OrderRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found("Order", id))?;
    ensure_owner_or_admin(auth, order.customer_id)?;
    Ok(order)
}

/// GET /api/v1/orders
///
/// Customers see only their own orders.
pub async fn list(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidQuery(params): ValidQuery<OrderListQuery>,
) -> AppResult<JsonResponse<Vec<Order>>> {
    let customer = (!auth.is_admin()).then_some(auth.user_id);
    let orders = OrderRepo::list(&state.pool, &params, customer).await?;
    tracing::debug!(count = orders.len(), "Listed orders");
    Ok(response::ok(orders))
}

/// GET /api/v1/orders/summaries (admin)
pub async fn summaries(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    ValidQuery(params): ValidQuery<OrderListQuery>,
) -> AppResult<JsonResponse<Vec<OrderSummary>>> {
    let summaries = OrderRepo::summaries(&state.pool, &params).await?;
    Ok(response::ok(summaries))
}

/// GET /api/v1/orders/customer/{customer_id} (that customer or admin)
pub async fn by_customer(
    State(state): State<AppState>,
    auth: AuthUser,
    input: Validated<CustomerIdParams, OrderListQuery, ()>,
) -> AppResult<JsonResponse<Vec<Order>>> {
    let customer_id = input.params.customer_id;
    ensure_owner_or_admin(&auth, customer_id)?;
    let orders = OrderRepo::list(&state.pool, &input.query, Some(customer_id)).await?;
    Ok(response::ok(orders))
}

/// POST /api/v1/orders
pub async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidJson(input): ValidJson<CreateOrderInput>,
) -> AppResult<CreatedResponse<OrderWithItems>> {
    let CreateOrderInput {
        items,
        shipping_address,
        billing_address,
        payment_method,
        notes,
    } = input;

    let placed = OrderRepo::place(&state.pool, &items, |lines, totals| NewOrder {
        customer_id: auth.user_id,
        order_number: order_number(Utc::now()),
        lines,
        totals,
        shipping_address,
        billing_address,
        payment_method,
        notes,
    })
    .await?;
    tracing::info!(
        order_id = %placed.order.id,
        order_number = %placed.order.order_number,
        customer_id = %placed.order.customer_id,
        total = %placed.order.total,
        items = placed.items.len(),
        "Order placed",
    );

    Ok(response::created(placed, "Order placed successfully"))
}

/// GET /api/v1/orders/{id} (owner or admin)
pub async fn get_by_id(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidPath(IdParams { id }): ValidPath<IdParams>,
) -> AppResult<JsonResponse<OrderWithItems>> {
    let order = OrderRepo::find_with_items(&state.pool, id)
        .await?
        .ok_or_else(|| not_found("Order", id))?;
    ensure_owner_or_admin(&auth, order.order.customer_id)?;
    Ok(response::ok(order))
}

/// GET /api/v1/orders/{id}/items (owner or admin)
pub async fn items(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidPath(IdParams { id }): ValidPath<IdParams>,
) -> AppResult<JsonResponse<Vec<OrderItem>>> {
    load_owned(&state, &auth, id).await?;
    let items = OrderRepo::items(&state.pool, id).await?;
    Ok(response::ok(items))
}

/// PUT /api/v1/orders/{id} (admin)
///
/// Status changes must follow the order lifecycle and are checked against
/// the locked row, so a cancellation that commits first wins with a 409.
/// Moving to `CANCELLED` restores stock like a customer cancellation;
/// `notes` doubles as the reason when present.
pub async fn update(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    input: Validated<IdParams, (), UpdateOrderInput>,
) -> AppResult<JsonResponse<Order>> {
    let id = input.params.id;
    let order = OrderRepo::update(&state.pool, id, &input.body, ADMIN_CANCEL_REASON).await?;
    tracing::info!(
        order_id = %id,
        status = %order.status,
        updated_by = %admin.user_id,
        "Order updated",
    );

    Ok(response::ok_with(order, "Order updated successfully"))
}

/// POST /api/v1/orders/{id}/cancel (owner or admin)
pub async fn cancel(
    State(state): State<AppState>,
    auth: AuthUser,
    input: Validated<IdParams, (), CancelOrderInput>,
) -> AppResult<JsonResponse<Order>> {
    let id = input.params.id;
    load_owned(&state, &auth, id).await?;

    let order = OrderRepo::cancel(&state.pool, id, &input.body.reason).await?;
    tracing::info!(order_id = %id, cancelled_by = %auth.user_id, "Order cancelled");
    Ok(response::ok_with(order, "Order cancelled successfully"))
}
