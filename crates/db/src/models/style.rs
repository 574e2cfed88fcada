use salon_core::types::{DbId, Timestamp};
use salon_core::vocab::{Difficulty, StyleCategory};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `styles` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct Style {
    pub id: DbId,
    pub name: String,
    pub photo_url: String,
    pub description: String,
    pub category: StyleCategory,
    pub difficulty: Option<Difficulty>,
    pub duration_minutes: Option<i32>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
