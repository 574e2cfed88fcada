//! Review targets and rating statistics.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::types::DbId;
use crate::vocab::ReviewTargetType;

/// Lowest and highest accepted rating.
pub const MIN_RATING: i16 = 1;
pub const MAX_RATING: i16 = 5;

/// What a review is about.
///
/// Serialized flat as `{"target_type": "STYLIST", "target_id": "..."}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(
    tag = "target_type",
    content = "target_id",
    rename_all = "SCREAMING_SNAKE_CASE"
)]
pub enum ReviewTarget {
    Stylist(DbId),
    Product(DbId),
    Style(DbId),
}

impl ReviewTarget {
    pub fn new(kind: ReviewTargetType, id: DbId) -> Self {
        match kind {
            ReviewTargetType::Stylist => ReviewTarget::Stylist(id),
            ReviewTargetType::Product => ReviewTarget::Product(id),
            ReviewTargetType::Style => ReviewTarget::Style(id),
        }
    }

    pub fn kind(self) -> ReviewTargetType {
        match self {
            ReviewTarget::Stylist(_) => ReviewTargetType::Stylist,
            ReviewTarget::Product(_) => ReviewTargetType::Product,
            ReviewTarget::Style(_) => ReviewTargetType::Style,
        }
    }

    pub fn id(self) -> DbId {
        match self {
            ReviewTarget::Stylist(id) | ReviewTarget::Product(id) | ReviewTarget::Style(id) => id,
        }
    }

    /// Entity name used in not-found errors.
    pub fn entity(self) -> &'static str {
        match self {
            ReviewTarget::Stylist(_) => "Stylist",
            ReviewTarget::Product(_) => "Product",
            ReviewTarget::Style(_) => "Style",
        }
    }
}

/// Aggregate ratings for one target.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RatingStats {
    pub total_reviews: i64,
    /// Mean rating rounded to two decimals; `0.0` with no reviews.
    pub average_rating: f64,
    /// Count per rating value, always holding keys 1 through 5.
    pub distribution: BTreeMap<i16, i64>,
}

impl RatingStats {
    /// Build stats from `(rating, count)` pairs as returned by a
    /// `GROUP BY rating` query. Out-of-range ratings are ignored.
    pub fn from_counts(counts: &[(i16, i64)]) -> Self {
        let mut distribution: BTreeMap<i16, i64> =
            (MIN_RATING..=MAX_RATING).map(|r| (r, 0)).collect();
        for &(rating, count) in counts {
            if let Some(slot) = distribution.get_mut(&rating) {
                *slot += count;
            }
        }

        let total_reviews: i64 = distribution.values().sum();
        let weighted: i64 = distribution
            .iter()
            .map(|(rating, count)| i64::from(*rating) * count)
            .sum();
        let average_rating = if total_reviews == 0 {
            0.0
        } else {
            let mean = weighted as f64 / total_reviews as f64;
            (mean * 100.0).round() / 100.0
        };

        Self {
            total_reviews,
            average_rating,
            distribution,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn target_serializes_flat() {
        let id = DbId::new_v4();
        let value = serde_json::to_value(ReviewTarget::Product(id)).unwrap();
        assert_eq!(value, json!({ "target_type": "PRODUCT", "target_id": id }));
    }

    #[test]
    fn target_round_trips_through_kind_and_id() {
        let id = DbId::new_v4();
        let target = ReviewTarget::new(ReviewTargetType::Style, id);
        assert_eq!(target.kind(), ReviewTargetType::Style);
        assert_eq!(target.id(), id);
    }

    #[test]
    fn stats_average_is_rounded() {
        let stats = RatingStats::from_counts(&[(5, 2), (4, 1)]);
        assert_eq!(stats.total_reviews, 3);
        assert_eq!(stats.average_rating, 4.67);
        assert_eq!(stats.distribution[&5], 2);
        assert_eq!(stats.distribution[&1], 0);
        assert_eq!(stats.distribution.len(), 5);
    }

    #[test]
    fn empty_stats_are_zero() {
        let stats = RatingStats::from_counts(&[]);
        assert_eq!(stats.total_reviews, 0);
        assert_eq!(stats.average_rating, 0.0);
    }
}
