//! Store ports: the lookups business rules need from persistence.
//!
//! The relational implementation lives in `salon-db`; tests supply small
//! in-memory fakes. Every lookup answers "which record, if any, already holds
//! this key" so callers can exclude the record being updated.

use async_trait::async_trait;

use crate::error::CoreError;
use crate::reviews::ReviewTarget;
use crate::types::{DbId, Timestamp};

/// Users keyed by case-normalized email.
#[async_trait]
pub trait UserLookup: Send + Sync {
    async fn user_id_by_email(&self, email: &str) -> Result<Option<DbId>, CoreError>;
}

/// Categories keyed by case-insensitive name.
#[async_trait]
pub trait CategoryLookup: Send + Sync {
    async fn category_id_by_name(&self, name: &str) -> Result<Option<DbId>, CoreError>;
}

/// Reviews keyed by (author, target).
#[async_trait]
pub trait ReviewLookup: Send + Sync {
    async fn review_id_for(
        &self,
        user_id: DbId,
        target: ReviewTarget,
    ) -> Result<Option<DbId>, CoreError>;
}

/// `SCHEDULED` appointments keyed by (stylist, exact start time).
#[async_trait]
pub trait SlotLookup: Send + Sync {
    async fn scheduled_appointment_at(
        &self,
        stylist_id: DbId,
        at: Timestamp,
    ) -> Result<Option<DbId>, CoreError>;
}
