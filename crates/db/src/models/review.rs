use salon_core::reviews::ReviewTarget;
use salon_core::types::{DbId, Timestamp};
use salon_core::vocab::ReviewTargetType;
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `reviews` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct Review {
    pub id: DbId,
    pub user_id: DbId,
    pub target_type: ReviewTargetType,
    pub target_id: DbId,
    pub rating: i16,
    pub comment: String,
    pub is_verified: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Review {
    pub fn target(&self) -> ReviewTarget {
        ReviewTarget::new(self.target_type, self.target_id)
    }
}

/// Insert DTO. `is_verified` is computed from the author's purchase or
/// appointment history, never taken from input.
#[derive(Debug, Clone)]
pub struct NewReview {
    pub user_id: DbId,
    pub target: ReviewTarget,
    pub rating: i16,
    pub comment: String,
    pub is_verified: bool,
}
