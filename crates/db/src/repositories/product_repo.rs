//! Repository for the `products` table.

use salon_core::schema::product::{CreateProductInput, ProductListQuery, UpdateProductInput};
use salon_core::types::DbId;
use sqlx::PgPool;

use crate::models::product::Product;

const COLUMNS: &str = "id, name, description, price, stock_quantity, image_url, category, \
                       is_active, sku, weight_grams, dimensions, created_at, updated_at";

pub struct ProductRepo;

impl ProductRepo {
    pub async fn create(pool: &PgPool, input: &CreateProductInput) -> Result<Product, sqlx::Error> {
        let query = format!(
            "INSERT INTO products
                (name, description, price, stock_quantity, image_url, category,
                 is_active, sku, weight_grams, dimensions)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Product>(&query)
            .bind(&input.name)
            .bind(&input.description)
            .bind(input.price)
            .bind(input.stock_quantity)
            .bind(&input.image_url)
            .bind(input.category)
            .bind(input.is_active)
            .bind(&input.sku)
            .bind(input.weight_grams)
            .bind(&input.dimensions)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Product>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM products WHERE id = $1");
        sqlx::query_as::<_, Product>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List products; every supplied filter is ANDed.
    ///
    /// `only_active` overrides `params.is_active` for non-admin callers.
    pub async fn list(
        pool: &PgPool,
        params: &ProductListQuery,
        only_active: bool,
    ) -> Result<Vec<Product>, sqlx::Error> {
        let is_active = if only_active {
            Some(true)
        } else {
            params.is_active
        };
        let query = format!(
            "SELECT {COLUMNS} FROM products
             WHERE ($1::TEXT IS NULL OR category = $1)
               AND ($2::BOOLEAN IS NULL OR is_active = $2)
               AND ($3::BOOLEAN IS NULL OR (stock_quantity > 0) = $3)
               AND ($4::NUMERIC IS NULL OR price >= $4)
               AND ($5::NUMERIC IS NULL OR price <= $5)
               AND ($6::TEXT IS NULL
                    OR name ILIKE '%' || $6 || '%'
                    OR description ILIKE '%' || $6 || '%')
             ORDER BY name ASC
             LIMIT $7 OFFSET $8"
        );
        sqlx::query_as::<_, Product>(&query)
            .bind(params.category)
            .bind(is_active)
            .bind(params.in_stock)
            .bind(params.min_price)
            .bind(params.max_price)
            .bind(&params.search)
            .bind(params.page.limit)
            .bind(params.page.offset())
            .fetch_all(pool)
            .await
    }

    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateProductInput,
    ) -> Result<Option<Product>, sqlx::Error> {
        let query = format!(
            "UPDATE products SET
                name = COALESCE($2, name),
                description = COALESCE($3, description),
                price = COALESCE($4, price),
                stock_quantity = COALESCE($5, stock_quantity),
                image_url = COALESCE($6, image_url),
                category = COALESCE($7, category),
                is_active = COALESCE($8, is_active),
                sku = COALESCE($9, sku),
                weight_grams = COALESCE($10, weight_grams),
                dimensions = COALESCE($11, dimensions)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Product>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.description)
            .bind(input.price)
            .bind(input.stock_quantity)
            .bind(&input.image_url)
            .bind(input.category)
            .bind(input.is_active)
            .bind(&input.sku)
            .bind(input.weight_grams)
            .bind(&input.dimensions)
            .fetch_optional(pool)
            .await
    }

    /// Soft delete. Returns `true` if an active product was deactivated.
    pub async fn deactivate(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE products SET is_active = false WHERE id = $1 AND is_active = true",
        )
        .bind(id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
