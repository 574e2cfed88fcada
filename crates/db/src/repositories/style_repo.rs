//! Repository for the `styles` table.

use salon_core::schema::style::{CreateStyleInput, StyleListQuery, UpdateStyleInput};
use salon_core::types::DbId;
use sqlx::PgPool;

use crate::models::style::Style;

const COLUMNS: &str = "id, name, photo_url, description, category, difficulty, \
                       duration_minutes, created_at, updated_at";

pub struct StyleRepo;

impl StyleRepo {
    pub async fn create(pool: &PgPool, input: &CreateStyleInput) -> Result<Style, sqlx::Error> {
        let query = format!(
            "INSERT INTO styles (name, photo_url, description, category, difficulty, duration_minutes)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Style>(&query)
            .bind(&input.name)
            .bind(&input.photo_url)
            .bind(&input.description)
            .bind(input.category)
            .bind(input.difficulty)
            .bind(input.duration_minutes)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Style>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM styles WHERE id = $1");
        sqlx::query_as::<_, Style>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn list(pool: &PgPool, params: &StyleListQuery) -> Result<Vec<Style>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM styles
             WHERE ($1::TEXT IS NULL OR category = $1)
               AND ($2::TEXT IS NULL OR difficulty = $2)
             ORDER BY name ASC
             LIMIT $3 OFFSET $4"
        );
        sqlx::query_as::<_, Style>(&query)
            .bind(params.category)
            .bind(params.difficulty)
            .bind(params.page.limit)
            .bind(params.page.offset())
            .fetch_all(pool)
            .await
    }

    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateStyleInput,
    ) -> Result<Option<Style>, sqlx::Error> {
        let query = format!(
            "UPDATE styles SET
                name = COALESCE($2, name),
                photo_url = COALESCE($3, photo_url),
                description = COALESCE($4, description),
                category = COALESCE($5, category),
                difficulty = COALESCE($6, difficulty),
                duration_minutes = COALESCE($7, duration_minutes)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Style>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.photo_url)
            .bind(&input.description)
            .bind(input.category)
            .bind(input.difficulty)
            .bind(input.duration_minutes)
            .fetch_optional(pool)
            .await
    }

    /// Hard delete. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM styles WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
