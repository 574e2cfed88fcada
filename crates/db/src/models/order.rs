use rust_decimal::Decimal;
use salon_core::pricing::{OrderLine, OrderTotals};
use salon_core::types::{DbId, Timestamp};
use salon_core::vocab::{OrderStatus, PaymentStatus};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `orders` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct Order {
    pub id: DbId,
    pub customer_id: DbId,
    pub order_number: String,
    pub subtotal: Decimal,
    pub tax: Decimal,
    pub shipping: Decimal,
    pub total: Decimal,
    pub status: OrderStatus,
    pub payment_status: PaymentStatus,
    pub shipping_address: String,
    pub billing_address: String,
    pub payment_method: String,
    pub notes: Option<String>,
    pub cancellation_reason: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A row from the `order_items` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct OrderItem {
    pub id: DbId,
    pub order_id: DbId,
    pub product_id: DbId,
    pub quantity: i32,
    pub unit_price: Decimal,
    pub total_price: Decimal,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// An order together with its line items.
#[derive(Debug, Clone, Serialize)]
pub struct OrderWithItems {
    #[serde(flatten)]
    pub order: Order,
    pub items: Vec<OrderItem>,
}

/// Compact admin listing row joining the customer.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct OrderSummary {
    pub id: DbId,
    pub order_number: String,
    pub customer_id: DbId,
    pub customer_name: String,
    pub customer_email: String,
    pub status: OrderStatus,
    pub payment_status: PaymentStatus,
    pub total: Decimal,
    pub item_count: i64,
    pub created_at: Timestamp,
}

/// Everything needed to write an order; lines carry prices captured from
/// the product rows at placement time.
#[derive(Debug, Clone)]
pub struct NewOrder {
    pub customer_id: DbId,
    pub order_number: String,
    pub lines: Vec<OrderLine>,
    /// Cent-rounded totals.
    pub totals: OrderTotals,
    pub shipping_address: String,
    pub billing_address: String,
    pub payment_method: String,
    pub notes: Option<String>,
}
