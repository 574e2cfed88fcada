//! Order lifecycle rules and order-number generation.

use chrono::Datelike;

use crate::error::CoreError;
use crate::types::Timestamp;
use crate::vocab::OrderStatus;

/// Prefix of every order number.
pub const ORDER_NUMBER_PREFIX: &str = "ORD";

/// Modulus applied to the epoch-millisecond suffix (8 digits).
const ORDER_SUFFIX_MODULUS: i64 = 100_000_000;

// ---------------------------------------------------------------------------
// Status transitions
// ---------------------------------------------------------------------------

/// Statuses `from` may move to.
///
/// - `PENDING`    -> `CONFIRMED`, `CANCELLED`
/// - `CONFIRMED`  -> `PROCESSING`, `CANCELLED`
/// - `PROCESSING` -> `SHIPPED`, `CANCELLED`
/// - `SHIPPED`    -> `DELIVERED`
/// - `DELIVERED` and `CANCELLED` are terminal.
pub fn valid_transitions(from: OrderStatus) -> &'static [OrderStatus] {
    use OrderStatus::*;
    match from {
        Pending => &[Confirmed, Cancelled],
        Confirmed => &[Processing, Cancelled],
        Processing => &[Shipped, Cancelled],
        Shipped => &[Delivered],
        Delivered | Cancelled => &[],
    }
}

/// Whether an update may set `next` on an order currently in `current`.
///
/// Re-applying the current status is accepted so repeated updates are
/// idempotent.
pub fn can_transition(current: OrderStatus, next: OrderStatus) -> bool {
    current == next || valid_transitions(current).contains(&next)
}

pub fn validate_transition(current: OrderStatus, next: OrderStatus) -> Result<(), CoreError> {
    if can_transition(current, next) {
        return Ok(());
    }
    let allowed: Vec<&str> = valid_transitions(current)
        .iter()
        .map(|s| s.as_str())
        .collect();
    Err(CoreError::Conflict(format!(
        "Cannot change order status from {current} to {next}. Allowed: {}",
        if allowed.is_empty() {
            "none".to_string()
        } else {
            allowed.join(", ")
        }
    )))
}

/// Cancellation guard: only orders that have not shipped can be cancelled.
pub fn ensure_cancellable(current: OrderStatus) -> Result<(), CoreError> {
    match current {
        OrderStatus::Cancelled => Err(CoreError::Conflict(
            "Order is already cancelled".to_string(),
        )),
        OrderStatus::Shipped | OrderStatus::Delivered => Err(CoreError::Conflict(format!(
            "Cannot cancel an order that has been {}",
            current.as_str().to_lowercase()
        ))),
        _ => Ok(()),
    }
}

// ---------------------------------------------------------------------------
// Order numbers
// ---------------------------------------------------------------------------

/// Human-readable order number, e.g. `ORD-2025-12345678`.
///
/// The suffix is the creation instant in epoch milliseconds modulo 10^8;
/// the `uq_orders_order_number` index rejects the rare collision.
pub fn order_number(at: Timestamp) -> String {
    let suffix = at.timestamp_millis().rem_euclid(ORDER_SUFFIX_MODULUS);
    format!("{ORDER_NUMBER_PREFIX}-{}-{suffix:08}", at.year())
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use chrono::{TimeZone, Utc};

    #[test]
    fn happy_path_walks_forward() {
        use OrderStatus::*;
        for (from, to) in [
            (Pending, Confirmed),
            (Confirmed, Processing),
            (Processing, Shipped),
            (Shipped, Delivered),
        ] {
            assert!(can_transition(from, to), "{from} -> {to}");
        }
    }

    #[test]
    fn no_skipping_or_going_back() {
        use OrderStatus::*;
        assert!(!can_transition(Pending, Shipped));
        assert!(!can_transition(Delivered, Pending));
        assert!(!can_transition(Cancelled, Confirmed));
        assert_matches!(
            validate_transition(Shipped, Cancelled),
            Err(CoreError::Conflict(_))
        );
    }

    #[test]
    fn same_status_is_accepted() {
        assert!(validate_transition(OrderStatus::Delivered, OrderStatus::Delivered).is_ok());
    }

    #[test]
    fn cancellation_guard() {
        assert!(ensure_cancellable(OrderStatus::Pending).is_ok());
        assert!(ensure_cancellable(OrderStatus::Processing).is_ok());
        assert_matches!(
            ensure_cancellable(OrderStatus::Cancelled),
            Err(CoreError::Conflict(msg)) if msg.contains("already cancelled")
        );
        assert_matches!(
            ensure_cancellable(OrderStatus::Delivered),
            Err(CoreError::Conflict(_))
        );
    }

    #[test]
    fn order_number_has_year_and_eight_digit_suffix() {
        let at = Utc.timestamp_millis_opt(1_741_600_800_123).unwrap();
        let number = order_number(at);
        assert_eq!(number, format!("ORD-{}-00800123", at.year()));
        assert_eq!(number.len(), "ORD-2025-".len() + 8);
    }
}
