//! Order total computation.
//!
//! All amounts are exact decimals. [`OrderTotals::compute`] keeps full
//! precision (a 10% tax on 67.48 is 6.748); [`OrderTotals::rounded`] gives
//! the cent-rounded figures that are persisted and shown to customers.

use std::collections::HashSet;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;

use crate::types::DbId;

/// Flat sales tax rate (10%).
pub const TAX_RATE: Decimal = Decimal::from_parts(10, 0, 0, false, 2);

/// Orders with a subtotal strictly above this ship free.
pub const FREE_SHIPPING_THRESHOLD: Decimal = Decimal::from_parts(5000, 0, 0, false, 2);

/// Shipping charged at or below the threshold.
pub const FLAT_SHIPPING: Decimal = Decimal::from_parts(1000, 0, 0, false, 2);

/// One priced line of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderLine {
    pub product_id: DbId,
    pub quantity: i32,
    pub unit_price: Decimal,
}

impl OrderLine {
    pub fn line_total(&self) -> Decimal {
        Decimal::from(self.quantity) * self.unit_price
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct OrderTotals {
    pub subtotal: Decimal,
    pub tax: Decimal,
    pub shipping: Decimal,
    pub total: Decimal,
}

impl OrderTotals {
    /// Exact totals for `lines`.
    pub fn compute(lines: &[OrderLine]) -> Self {
        let subtotal: Decimal = lines.iter().map(OrderLine::line_total).sum();
        let tax = subtotal * TAX_RATE;
        let shipping = if subtotal > FREE_SHIPPING_THRESHOLD {
            Decimal::ZERO
        } else {
            FLAT_SHIPPING
        };
        Self {
            subtotal,
            tax,
            shipping,
            total: subtotal + tax + shipping,
        }
    }

    /// Round every amount to cents, half away from zero.
    pub fn rounded(self) -> Self {
        Self {
            subtotal: to_cents(self.subtotal),
            tax: to_cents(self.tax),
            shipping: to_cents(self.shipping),
            total: to_cents(self.total),
        }
    }
}

pub fn to_cents(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// First product id that appears more than once, if any.
pub fn find_duplicate_product<I>(product_ids: I) -> Option<DbId>
where
    I: IntoIterator<Item = DbId>,
{
    let mut seen = HashSet::new();
    product_ids.into_iter().find(|id| !seen.insert(*id))
}
