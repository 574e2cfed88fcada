use salon_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `stylists` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct Stylist {
    pub id: DbId,
    pub name: String,
    /// Canonical comma-separated specialty list.
    pub specialty: String,
    pub photo_url: String,
    pub description: String,
    pub is_featured: bool,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
