//! Relational implementation of the `salon_core::store` lookup ports.

use async_trait::async_trait;
use salon_core::error::CoreError;
use salon_core::reviews::ReviewTarget;
use salon_core::store::{CategoryLookup, ReviewLookup, SlotLookup, UserLookup};
use salon_core::types::{DbId, Timestamp};
use sqlx::PgPool;

use crate::repositories::{AppointmentRepo, CategoryRepo, ReviewRepo, UserRepo};

/// Borrowing adapter over a pool.
#[derive(Clone, Copy)]
pub struct PgStore<'a> {
    pool: &'a PgPool,
}

impl<'a> PgStore<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }
}

fn internal(err: sqlx::Error) -> CoreError {
    tracing::error!(error = %err, "Store lookup failed");
    CoreError::Internal(err.to_string())
}

#[async_trait]
impl UserLookup for PgStore<'_> {
    async fn user_id_by_email(&self, email: &str) -> Result<Option<DbId>, CoreError> {
        let user = UserRepo::find_by_email(self.pool, email)
            .await
            .map_err(internal)?;
        Ok(user.map(|u| u.id))
    }
}

#[async_trait]
impl CategoryLookup for PgStore<'_> {
    async fn category_id_by_name(&self, name: &str) -> Result<Option<DbId>, CoreError> {
        let category = CategoryRepo::find_by_name(self.pool, name)
            .await
            .map_err(internal)?;
        Ok(category.map(|c| c.id))
    }
}

#[async_trait]
impl ReviewLookup for PgStore<'_> {
    async fn review_id_for(
        &self,
        user_id: DbId,
        target: ReviewTarget,
    ) -> Result<Option<DbId>, CoreError> {
        ReviewRepo::find_id_for(self.pool, user_id, target)
            .await
            .map_err(internal)
    }
}

#[async_trait]
impl SlotLookup for PgStore<'_> {
    async fn scheduled_appointment_at(
        &self,
        stylist_id: DbId,
        at: Timestamp,
    ) -> Result<Option<DbId>, CoreError> {
        AppointmentRepo::find_scheduled_at(self.pool, stylist_id, at)
            .await
            .map_err(internal)
    }
}
