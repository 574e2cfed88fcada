//! Repository for the `stylists` table.

use salon_core::schema::stylist::{CreateStylistInput, StylistListQuery, UpdateStylistInput};
use salon_core::types::DbId;
use sqlx::PgPool;

use crate::models::stylist::Stylist;

const COLUMNS: &str = "id, name, specialty, photo_url, description, is_featured, is_active, \
                       created_at, updated_at";

pub struct StylistRepo;

impl StylistRepo {
    pub async fn create(pool: &PgPool, input: &CreateStylistInput) -> Result<Stylist, sqlx::Error> {
        let query = format!(
            "INSERT INTO stylists (name, specialty, photo_url, description, is_featured)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Stylist>(&query)
            .bind(&input.name)
            .bind(&input.specialty)
            .bind(&input.photo_url)
            .bind(&input.description)
            .bind(input.is_featured)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Stylist>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM stylists WHERE id = $1");
        sqlx::query_as::<_, Stylist>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List stylists, featured first then by name.
    ///
    /// `include_inactive` must already reflect the caller's role.
    pub async fn list(
        pool: &PgPool,
        params: &StylistListQuery,
        include_inactive: bool,
    ) -> Result<Vec<Stylist>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM stylists
             WHERE ($1 OR is_active = true)
               AND ($2::BOOLEAN IS NULL OR is_featured = $2)
               AND ($3::TEXT IS NULL OR specialty ILIKE '%' || $3 || '%')
             ORDER BY is_featured DESC, name ASC
             LIMIT $4 OFFSET $5"
        );
        sqlx::query_as::<_, Stylist>(&query)
            .bind(include_inactive)
            .bind(params.is_featured)
            .bind(&params.specialty)
            .bind(params.page.limit)
            .bind(params.page.offset())
            .fetch_all(pool)
            .await
    }

    /// Update a stylist. Only non-`None` fields in `input` are applied.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateStylistInput,
    ) -> Result<Option<Stylist>, sqlx::Error> {
        let query = format!(
            "UPDATE stylists SET
                name = COALESCE($2, name),
                specialty = COALESCE($3, specialty),
                photo_url = COALESCE($4, photo_url),
                description = COALESCE($5, description),
                is_featured = COALESCE($6, is_featured),
                is_active = COALESCE($7, is_active)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Stylist>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.specialty)
            .bind(&input.photo_url)
            .bind(&input.description)
            .bind(input.is_featured)
            .bind(input.is_active)
            .fetch_optional(pool)
            .await
    }

    /// Soft delete. Returns `true` if an active stylist was deactivated.
    pub async fn deactivate(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE stylists SET is_active = false WHERE id = $1 AND is_active = true",
        )
        .bind(id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
