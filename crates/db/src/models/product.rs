use rust_decimal::Decimal;
use salon_core::types::{DbId, Timestamp};
use salon_core::vocab::ProductCategory;
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `products` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct Product {
    pub id: DbId,
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub stock_quantity: i32,
    pub image_url: String,
    pub category: ProductCategory,
    pub is_active: bool,
    pub sku: Option<String>,
    pub weight_grams: Option<i32>,
    pub dimensions: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
