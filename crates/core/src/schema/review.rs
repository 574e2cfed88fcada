//! Review inputs.

use super::common::Page;
use crate::reviews::{ReviewTarget, MAX_RATING, MIN_RATING};
use crate::types::DbId;
use crate::validation::{Fields, Schema};
use crate::vocab::ReviewTargetType;

pub const MIN_COMMENT_LENGTH: usize = 10;
pub const MAX_COMMENT_LENGTH: usize = 1000;

fn read_target(f: &mut Fields<'_>) -> Option<ReviewTarget> {
    let kind = f.choice::<ReviewTargetType>("target_type");
    let id = f.uuid("target_id");
    Some(ReviewTarget::new(kind?, id?))
}

fn read_rating(f: &mut Fields<'_>, required: bool) -> Option<i16> {
    let (min, max) = (i64::from(MIN_RATING), i64::from(MAX_RATING));
    let rating = if required {
        f.int("rating", min, max)
    } else {
        f.opt_int("rating", min, max)
    };
    // Bounded to 1..=5 above.
    rating.map(|r| r as i16)
}

/// `POST /reviews`.
#[derive(Debug, Clone)]
pub struct CreateReviewInput {
    pub target: ReviewTarget,
    pub rating: i16,
    pub comment: String,
}

impl Schema for CreateReviewInput {
    fn from_fields(f: &mut Fields<'_>) -> Option<Self> {
        let target = read_target(f);
        let rating = read_rating(f, true);
        let comment = f.text("comment", MIN_COMMENT_LENGTH, MAX_COMMENT_LENGTH);
        Some(Self {
            target: target?,
            rating: rating?,
            comment: comment?,
        })
    }
}

/// `PUT /reviews/{id}`. `is_verified` is admin-only.
#[derive(Debug, Clone, Default)]
pub struct UpdateReviewInput {
    pub rating: Option<i16>,
    pub comment: Option<String>,
    pub is_verified: Option<bool>,
}

impl Schema for UpdateReviewInput {
    fn from_fields(f: &mut Fields<'_>) -> Option<Self> {
        f.require_any(&["rating", "comment", "is_verified"]);
        Some(Self {
            rating: read_rating(f, false),
            comment: f.opt_text_between("comment", MIN_COMMENT_LENGTH, MAX_COMMENT_LENGTH),
            is_verified: f.opt_bool("is_verified"),
        })
    }
}

/// `GET /reviews` query.
#[derive(Debug, Clone, Default)]
pub struct ReviewListQuery {
    pub page: Page,
    pub target_type: Option<ReviewTargetType>,
    pub target_id: Option<DbId>,
    pub user_id: Option<DbId>,
    pub min_rating: Option<i16>,
}

impl Schema for ReviewListQuery {
    fn from_fields(f: &mut Fields<'_>) -> Option<Self> {
        Some(Self {
            page: Page::read(f),
            target_type: f.opt_choice("target_type"),
            target_id: f.opt_uuid("target_id"),
            user_id: f.opt_uuid("user_id"),
            min_rating: f
                .opt_int("min_rating", i64::from(MIN_RATING), i64::from(MAX_RATING))
                .map(|r| r as i16),
        })
    }
}

/// `GET /reviews/stats` query.
#[derive(Debug, Clone, Copy)]
pub struct ReviewStatsQuery {
    pub target: ReviewTarget,
}

impl Schema for ReviewStatsQuery {
    fn from_fields(f: &mut Fields<'_>) -> Option<Self> {
        Some(Self {
            target: read_target(f)?,
        })
    }
}
