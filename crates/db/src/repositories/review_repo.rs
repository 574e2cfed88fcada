//! Repository for the `reviews` table.

use salon_core::reviews::{RatingStats, ReviewTarget};
use salon_core::schema::review::{ReviewListQuery, UpdateReviewInput};
use salon_core::types::DbId;
use sqlx::PgPool;

use crate::models::review::{NewReview, Review};

const COLUMNS: &str = "id, user_id, target_type, target_id, rating, comment, is_verified, \
                       created_at, updated_at";

pub struct ReviewRepo;

impl ReviewRepo {
    /// Insert a review. A second review of the same target by the same user
    /// fails on `uq_reviews_user_target`.
    pub async fn create(pool: &PgPool, input: &NewReview) -> Result<Review, sqlx::Error> {
        let query = format!(
            "INSERT INTO reviews (user_id, target_type, target_id, rating, comment, is_verified)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Review>(&query)
            .bind(input.user_id)
            .bind(input.target.kind())
            .bind(input.target.id())
            .bind(input.rating)
            .bind(&input.comment)
            .bind(input.is_verified)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Review>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM reviews WHERE id = $1");
        sqlx::query_as::<_, Review>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Id of `user_id`'s review of `target`, if one exists.
    pub async fn find_id_for(
        pool: &PgPool,
        user_id: DbId,
        target: ReviewTarget,
    ) -> Result<Option<DbId>, sqlx::Error> {
        sqlx::query_scalar::<_, DbId>(
            "SELECT id FROM reviews
             WHERE user_id = $1 AND target_type = $2 AND target_id = $3",
        )
        .bind(user_id)
        .bind(target.kind())
        .bind(target.id())
        .fetch_optional(pool)
        .await
    }

    /// Newest first; every supplied filter is ANDed.
    pub async fn list(pool: &PgPool, params: &ReviewListQuery) -> Result<Vec<Review>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM reviews
             WHERE ($1::TEXT IS NULL OR target_type = $1)
               AND ($2::UUID IS NULL OR target_id = $2)
               AND ($3::UUID IS NULL OR user_id = $3)
               AND ($4::SMALLINT IS NULL OR rating >= $4)
             ORDER BY created_at DESC
             LIMIT $5 OFFSET $6"
        );
        sqlx::query_as::<_, Review>(&query)
            .bind(params.target_type)
            .bind(params.target_id)
            .bind(params.user_id)
            .bind(params.min_rating)
            .bind(params.page.limit)
            .bind(params.page.offset())
            .fetch_all(pool)
            .await
    }

    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateReviewInput,
    ) -> Result<Option<Review>, sqlx::Error> {
        let query = format!(
            "UPDATE reviews SET
                rating = COALESCE($2, rating),
                comment = COALESCE($3, comment),
                is_verified = COALESCE($4, is_verified)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Review>(&query)
            .bind(id)
            .bind(input.rating)
            .bind(&input.comment)
            .bind(input.is_verified)
            .fetch_optional(pool)
            .await
    }

    /// Hard delete. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM reviews WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Whether the reviewed entity exists (stylists and products must also
    /// be active).
    pub async fn target_exists(pool: &PgPool, target: ReviewTarget) -> Result<bool, sqlx::Error> {
        let query = match target {
            ReviewTarget::Stylist(_) => {
                "SELECT EXISTS(SELECT 1 FROM stylists WHERE id = $1 AND is_active = true)"
            }
            ReviewTarget::Product(_) => {
                "SELECT EXISTS(SELECT 1 FROM products WHERE id = $1 AND is_active = true)"
            }
            ReviewTarget::Style(_) => "SELECT EXISTS(SELECT 1 FROM styles WHERE id = $1)",
        };
        sqlx::query_scalar::<_, bool>(query)
            .bind(target.id())
            .fetch_one(pool)
            .await
    }

    /// Whether `user_id` has first-hand experience of `target`: a delivered
    /// order containing the product, or a completed appointment with the
    /// stylist or for the style.
    pub async fn author_has_history(
        pool: &PgPool,
        user_id: DbId,
        target: ReviewTarget,
    ) -> Result<bool, sqlx::Error> {
        let query = match target {
            ReviewTarget::Product(_) => {
                "SELECT EXISTS(
                    SELECT 1 FROM orders o
                    JOIN order_items oi ON oi.order_id = o.id
                    WHERE o.customer_id = $1 AND oi.product_id = $2
                      AND o.status = 'DELIVERED')"
            }
            ReviewTarget::Stylist(_) => {
                "SELECT EXISTS(
                    SELECT 1 FROM appointments
                    WHERE user_id = $1 AND stylist_id = $2 AND status = 'COMPLETED')"
            }
            ReviewTarget::Style(_) => {
                "SELECT EXISTS(
                    SELECT 1 FROM appointments
                    WHERE user_id = $1 AND style_id = $2 AND status = 'COMPLETED')"
            }
        };
        sqlx::query_scalar::<_, bool>(query)
            .bind(user_id)
            .bind(target.id())
            .fetch_one(pool)
            .await
    }

    /// Rating count, average and distribution for one target.
    pub async fn stats(pool: &PgPool, target: ReviewTarget) -> Result<RatingStats, sqlx::Error> {
        let counts = sqlx::query_as::<_, (i16, i64)>(
            "SELECT rating, COUNT(*) FROM reviews
             WHERE target_type = $1 AND target_id = $2
             GROUP BY rating",
        )
        .bind(target.kind())
        .bind(target.id())
        .fetch_all(pool)
        .await?;
        Ok(RatingStats::from_counts(&counts))
    }
}
