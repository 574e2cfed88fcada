//! Order inputs.
//!
//! Amounts are never accepted from the client; they are derived from the
//! product rows in [`crate::pricing`].

use super::common::{DateRange, Page};
use super::MAX_NOTES_LENGTH;
use crate::pricing::find_duplicate_product;
use crate::types::DbId;
use crate::validation::{codes, Fields, Schema};
use crate::vocab::{OrderStatus, PaymentStatus};

pub const MIN_ORDER_ITEMS: usize = 1;
pub const MAX_ORDER_ITEMS: usize = 50;
pub const MAX_ITEM_QUANTITY: i64 = 100;
pub const MIN_ADDRESS_LENGTH: usize = 10;
pub const MAX_ADDRESS_LENGTH: usize = 500;
pub const MAX_PAYMENT_METHOD_LENGTH: usize = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderItemInput {
    pub product_id: DbId,
    pub quantity: i32,
}

/// `POST /orders`.
#[derive(Debug, Clone)]
pub struct CreateOrderInput {
    pub items: Vec<OrderItemInput>,
    pub shipping_address: String,
    /// Falls back to the shipping address.
    pub billing_address: String,
    pub payment_method: String,
    pub notes: Option<String>,
}

impl Schema for CreateOrderInput {
    fn from_fields(f: &mut Fields<'_>) -> Option<Self> {
        let items = f.list("items", MIN_ORDER_ITEMS, MAX_ORDER_ITEMS, |item| {
            let product_id = item.uuid("product_id");
            let quantity = item.int("quantity", 1, MAX_ITEM_QUANTITY);
            Some(OrderItemInput {
                product_id: product_id?,
                quantity: quantity?,
            })
        });
        if let Some(items) = &items {
            if let Some(dup) = find_duplicate_product(items.iter().map(|i| i.product_id)) {
                f.reject(
                    "items",
                    codes::CUSTOM,
                    format!("Duplicate product {dup} in order items"),
                );
            }
        }
        let shipping_address = f.text("shipping_address", MIN_ADDRESS_LENGTH, MAX_ADDRESS_LENGTH);
        let billing_address =
            f.opt_text_between("billing_address", MIN_ADDRESS_LENGTH, MAX_ADDRESS_LENGTH);
        let payment_method = f.text("payment_method", 1, MAX_PAYMENT_METHOD_LENGTH);
        let notes = f.opt_text("notes", MAX_NOTES_LENGTH);

        let shipping_address = shipping_address?;
        Some(Self {
            items: items?,
            billing_address: billing_address.unwrap_or_else(|| shipping_address.clone()),
            shipping_address,
            payment_method: payment_method?,
            notes,
        })
    }
}

/// `PUT /orders/{id}` (admin).
#[derive(Debug, Clone, Default)]
pub struct UpdateOrderInput {
    pub status: Option<OrderStatus>,
    pub payment_status: Option<PaymentStatus>,
    pub shipping_address: Option<String>,
    pub notes: Option<String>,
}

impl Schema for UpdateOrderInput {
    fn from_fields(f: &mut Fields<'_>) -> Option<Self> {
        f.require_any(&["status", "payment_status", "shipping_address", "notes"]);
        Some(Self {
            status: f.opt_choice("status"),
            payment_status: f.opt_choice("payment_status"),
            shipping_address: f.opt_text_between(
                "shipping_address",
                MIN_ADDRESS_LENGTH,
                MAX_ADDRESS_LENGTH,
            ),
            notes: f.opt_text("notes", MAX_NOTES_LENGTH),
        })
    }
}

/// `POST /orders/{id}/cancel`.
#[derive(Debug, Clone)]
pub struct CancelOrderInput {
    pub reason: String,
}

impl Schema for CancelOrderInput {
    fn from_fields(f: &mut Fields<'_>) -> Option<Self> {
        Some(Self {
            reason: f.text("reason", 1, MAX_NOTES_LENGTH)?,
        })
    }
}

/// `GET /orders` and `GET /orders/customer/{customer_id}` query.
#[derive(Debug, Clone, Default)]
pub struct OrderListQuery {
    pub page: Page,
    pub status: Option<OrderStatus>,
    pub payment_status: Option<PaymentStatus>,
    pub range: DateRange,
}

impl Schema for OrderListQuery {
    fn from_fields(f: &mut Fields<'_>) -> Option<Self> {
        Some(Self {
            page: Page::read(f),
            status: f.opt_choice("status"),
            payment_status: f.opt_choice("payment_status"),
            range: DateRange::read(f),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::ValidationContext;
    use serde_json::json;

    #[test]
    fn billing_defaults_to_shipping() {
        let ctx = ValidationContext::default();
        let input = CreateOrderInput::parse(
            &json!({
                "items": [{ "product_id": DbId::new_v4().to_string(), "quantity": 2 }],
                "shipping_address": "12 Palm Street, Accra",
                "payment_method": "card"
            }),
            &ctx,
        )
        .unwrap();
        assert_eq!(input.billing_address, "12 Palm Street, Accra");
        assert_eq!(input.items[0].quantity, 2);
    }

    #[test]
    fn repeated_product_is_rejected() {
        let ctx = ValidationContext::default();
        let product = DbId::new_v4().to_string();
        let errors = CreateOrderInput::parse(
            &json!({
                "items": [
                    { "product_id": product, "quantity": 1 },
                    { "product_id": product, "quantity": 3 }
                ],
                "shipping_address": "12 Palm Street, Accra",
                "payment_method": "card"
            }),
            &ctx,
        )
        .unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.errors()[0].field, "items");
    }

    #[test]
    fn item_errors_carry_indexed_paths() {
        let ctx = ValidationContext::default();
        let errors = CreateOrderInput::parse(
            &json!({
                "items": [
                    { "product_id": DbId::new_v4().to_string(), "quantity": 1 },
                    { "product_id": "nope", "quantity": 101 }
                ],
                "shipping_address": "short",
                "payment_method": "card"
            }),
            &ctx,
        )
        .unwrap_err();
        assert!(errors.has_field("items.1.product_id"));
        assert!(errors.has_field("items.1.quantity"));
        assert!(errors.has_field("shipping_address"));
    }

    #[test]
    fn empty_item_list_is_rejected() {
        let ctx = ValidationContext::default();
        let errors = CreateOrderInput::parse(
            &json!({
                "items": [],
                "shipping_address": "12 Palm Street, Accra",
                "payment_method": "card"
            }),
            &ctx,
        )
        .unwrap_err();
        assert!(errors.has_field("items"));
    }

    #[test]
    fn cancel_reason_is_required() {
        let ctx = ValidationContext::default();
        assert!(CancelOrderInput::parse(&json!({ "reason": "   " }), &ctx).is_err());
        assert!(CancelOrderInput::parse(&json!({ "reason": "Changed my mind" }), &ctx).is_ok());
    }
}
