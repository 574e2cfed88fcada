//! Repository for the `orders` and `order_items` tables.
//!
//! Placement, cancellation and admin updates each run in a single
//! transaction. Cancellation and status changes lock the order row first;
//! anything that touches stock locks the affected product rows.

use rust_decimal::Decimal;
use salon_core::error::CoreError;
use salon_core::orders::{ensure_cancellable, validate_transition};
use salon_core::pricing::{OrderLine, OrderTotals};
use salon_core::schema::order::{OrderItemInput, OrderListQuery, UpdateOrderInput};
use salon_core::types::DbId;
use salon_core::vocab::OrderStatus;
use sqlx::{FromRow, PgPool, Postgres, Transaction};

use crate::models::order::{NewOrder, Order, OrderItem, OrderSummary, OrderWithItems};

const COLUMNS: &str = "id, customer_id, order_number, subtotal, tax, shipping, total, status, \
                       payment_status, shipping_address, billing_address, payment_method, \
                       notes, cancellation_reason, created_at, updated_at";

const ITEM_COLUMNS: &str =
    "id, order_id, product_id, quantity, unit_price, total_price, created_at, updated_at";

/// Failure of a multi-step order write.
#[derive(Debug, thiserror::Error)]
pub enum OrderWriteError {
    /// A business rule rejected the write; nothing was persisted.
    #[error(transparent)]
    Rejected(#[from] CoreError),

    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

/// The slice of a product row needed to price an order.
#[derive(Debug, FromRow)]
struct StockRow {
    id: DbId,
    name: String,
    price: Decimal,
    stock_quantity: i32,
    is_active: bool,
}

pub struct OrderRepo;

impl OrderRepo {
    // -----------------------------------------------------------------------
    // Placement
    // -----------------------------------------------------------------------

    /// Price `items` against the current product rows.
    ///
    /// Each product must exist and be active (`NotFound`) and hold at least
    /// the requested quantity (`Conflict`). Rows are locked until the
    /// enclosing transaction ends.
    async fn price_items(
        tx: &mut Transaction<'_, Postgres>,
        items: &[OrderItemInput],
    ) -> Result<Vec<OrderLine>, OrderWriteError> {
        let ids: Vec<DbId> = items.iter().map(|i| i.product_id).collect();
        let rows = sqlx::query_as::<_, StockRow>(
            "SELECT id, name, price, stock_quantity, is_active FROM products
             WHERE id = ANY($1)
             ORDER BY id
             FOR UPDATE",
        )
        .bind(&ids)
        .fetch_all(&mut **tx)
        .await?;

        let mut lines = Vec::with_capacity(items.len());
        for item in items {
            let product = rows
                .iter()
                .find(|r| r.id == item.product_id && r.is_active)
                .ok_or(CoreError::NotFound {
                    entity: "Product",
                    id: item.product_id,
                })?;
            if product.stock_quantity < item.quantity {
                return Err(CoreError::Conflict(format!(
                    "Insufficient stock for {}: {} available, {} requested",
                    product.name, product.stock_quantity, item.quantity
                ))
                .into());
            }
            lines.push(OrderLine {
                product_id: product.id,
                quantity: item.quantity,
                unit_price: product.price,
            });
        }
        Ok(lines)
    }

    /// Place an order: price the items, write the order and its lines, and
    /// decrement stock, all in one transaction.
    ///
    /// `build` receives the priced lines and cent-rounded totals and returns
    /// the full [`NewOrder`] to persist.
    pub async fn place<F>(
        pool: &PgPool,
        items: &[OrderItemInput],
        build: F,
    ) -> Result<OrderWithItems, OrderWriteError>
    where
        F: FnOnce(Vec<OrderLine>, OrderTotals) -> NewOrder,
    {
        let mut tx = pool.begin().await?;

        let lines = Self::price_items(&mut tx, items).await?;
        let totals = OrderTotals::compute(&lines).rounded();
        let input = build(lines, totals);

        let insert_order = format!(
            "INSERT INTO orders
                (customer_id, order_number, subtotal, tax, shipping, total,
                 shipping_address, billing_address, payment_method, notes)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
             RETURNING {COLUMNS}"
        );
        let order = sqlx::query_as::<_, Order>(&insert_order)
            .bind(input.customer_id)
            .bind(&input.order_number)
            .bind(input.totals.subtotal)
            .bind(input.totals.tax)
            .bind(input.totals.shipping)
            .bind(input.totals.total)
            .bind(&input.shipping_address)
            .bind(&input.billing_address)
            .bind(&input.payment_method)
            .bind(&input.notes)
            .fetch_one(&mut *tx)
            .await?;

        let insert_item = format!(
            "INSERT INTO order_items (order_id, product_id, quantity, unit_price, total_price)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {ITEM_COLUMNS}"
        );
        let mut items = Vec::with_capacity(input.lines.len());
        for line in &input.lines {
            let item = sqlx::query_as::<_, OrderItem>(&insert_item)
                .bind(order.id)
                .bind(line.product_id)
                .bind(line.quantity)
                .bind(line.unit_price)
                .bind(line.line_total())
                .fetch_one(&mut *tx)
                .await?;
            items.push(item);

            sqlx::query(
                "UPDATE products SET stock_quantity = stock_quantity - $2 WHERE id = $1",
            )
            .bind(line.product_id)
            .bind(line.quantity)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(OrderWithItems { order, items })
    }

    // -----------------------------------------------------------------------
    // Reads
    // -----------------------------------------------------------------------

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Order>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM orders WHERE id = $1");
        sqlx::query_as::<_, Order>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn find_with_items(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<OrderWithItems>, sqlx::Error> {
        match Self::find_by_id(pool, id).await? {
            Some(order) => {
                let items = Self::items(pool, order.id).await?;
                Ok(Some(OrderWithItems { order, items }))
            }
            None => Ok(None),
        }
    }

    pub async fn items(pool: &PgPool, order_id: DbId) -> Result<Vec<OrderItem>, sqlx::Error> {
        let query = format!(
            "SELECT {ITEM_COLUMNS} FROM order_items WHERE order_id = $1 ORDER BY created_at, id"
        );
        sqlx::query_as::<_, OrderItem>(&query)
            .bind(order_id)
            .fetch_all(pool)
            .await
    }

    /// Newest first. `customer_id` restricts to one customer.
    pub async fn list(
        pool: &PgPool,
        params: &OrderListQuery,
        customer_id: Option<DbId>,
    ) -> Result<Vec<Order>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM orders
             WHERE ($1::UUID IS NULL OR customer_id = $1)
               AND ($2::TEXT IS NULL OR status = $2)
               AND ($3::TEXT IS NULL OR payment_status = $3)
               AND ($4::TIMESTAMPTZ IS NULL OR created_at >= $4)
               AND ($5::TIMESTAMPTZ IS NULL OR created_at <= $5)
             ORDER BY created_at DESC
             LIMIT $6 OFFSET $7"
        );
        sqlx::query_as::<_, Order>(&query)
            .bind(customer_id)
            .bind(params.status)
            .bind(params.payment_status)
            .bind(params.range.from)
            .bind(params.range.to)
            .bind(params.page.limit)
            .bind(params.page.offset())
            .fetch_all(pool)
            .await
    }

    /// Admin overview joining the customer and counting lines.
    pub async fn summaries(
        pool: &PgPool,
        params: &OrderListQuery,
    ) -> Result<Vec<OrderSummary>, sqlx::Error> {
        sqlx::query_as::<_, OrderSummary>(
            "SELECT o.id, o.order_number, o.customer_id,
                    u.name AS customer_name, u.email AS customer_email,
                    o.status, o.payment_status, o.total,
                    (SELECT COUNT(*) FROM order_items oi WHERE oi.order_id = o.id) AS item_count,
                    o.created_at
             FROM orders o
             JOIN users u ON u.id = o.customer_id
             WHERE ($1::TEXT IS NULL OR o.status = $1)
               AND ($2::TEXT IS NULL OR o.payment_status = $2)
               AND ($3::TIMESTAMPTZ IS NULL OR o.created_at >= $3)
               AND ($4::TIMESTAMPTZ IS NULL OR o.created_at <= $4)
             ORDER BY o.created_at DESC
             LIMIT $5 OFFSET $6",
        )
        .bind(params.status)
        .bind(params.payment_status)
        .bind(params.range.from)
        .bind(params.range.to)
        .bind(params.page.limit)
        .bind(params.page.offset())
        .fetch_all(pool)
        .await
    }

    // -----------------------------------------------------------------------
    // Mutations
    // -----------------------------------------------------------------------

    /// Apply an admin update.
    ///
    /// The order row stays locked from the status check to the write, so a
    /// concurrent cancellation either lands first (and the transition is
    /// judged against `CANCELLED`) or waits for this update. Moving to
    /// `CANCELLED` restocks like [`OrderRepo::cancel`], with `notes` or
    /// `default_reason` as the reason.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateOrderInput,
        default_reason: &str,
    ) -> Result<Order, OrderWriteError> {
        let mut tx = pool.begin().await?;

        let current = lock_status(&mut tx, id).await?;
        let mut status = input.status;
        if let Some(next) = status {
            validate_transition(current, next)?;
        }
        if status == Some(OrderStatus::Cancelled) && current != OrderStatus::Cancelled {
            let reason = input.notes.as_deref().unwrap_or(default_reason);
            cancel_locked(&mut tx, id, reason).await?;
            status = None;
        }

        let query = format!(
            "UPDATE orders SET
                status = COALESCE($2, status),
                payment_status = COALESCE($3, payment_status),
                shipping_address = COALESCE($4, shipping_address),
                notes = COALESCE($5, notes)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let order = sqlx::query_as::<_, Order>(&query)
            .bind(id)
            .bind(status)
            .bind(input.payment_status)
            .bind(&input.shipping_address)
            .bind(&input.notes)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(order)
    }

    /// Cancel an order and return its quantities to stock.
    ///
    /// Already-cancelled, shipped and delivered orders are rejected with
    /// `Conflict`; an unknown id with `NotFound`.
    pub async fn cancel(pool: &PgPool, id: DbId, reason: &str) -> Result<Order, OrderWriteError> {
        let mut tx = pool.begin().await?;

        let status = lock_status(&mut tx, id).await?;
        ensure_cancellable(status)?;
        let order = cancel_locked(&mut tx, id, reason).await?;

        tx.commit().await?;
        Ok(order)
    }
}

/// Lock the order row for the rest of `tx` and read its status.
async fn lock_status(
    tx: &mut Transaction<'_, Postgres>,
    id: DbId,
) -> Result<OrderStatus, OrderWriteError> {
    let status = sqlx::query_scalar::<_, OrderStatus>(
        "SELECT status FROM orders WHERE id = $1 FOR UPDATE",
    )
    .bind(id)
    .fetch_optional(&mut **tx)
    .await?
    .ok_or(CoreError::NotFound { entity: "Order", id })?;
    Ok(status)
}

/// Mark a locked order cancelled and put its quantities back on the shelf.
async fn cancel_locked(
    tx: &mut Transaction<'_, Postgres>,
    id: DbId,
    reason: &str,
) -> Result<Order, sqlx::Error> {
    let query = format!(
        "UPDATE orders SET status = 'CANCELLED', cancellation_reason = $2
         WHERE id = $1
         RETURNING {COLUMNS}"
    );
    let order = sqlx::query_as::<_, Order>(&query)
        .bind(id)
        .bind(reason)
        .fetch_one(&mut **tx)
        .await?;

    sqlx::query(
        "UPDATE products p SET stock_quantity = p.stock_quantity + oi.quantity
         FROM order_items oi
         WHERE oi.order_id = $1 AND oi.product_id = p.id",
    )
    .bind(id)
    .execute(&mut **tx)
    .await?;

    Ok(order)
}

