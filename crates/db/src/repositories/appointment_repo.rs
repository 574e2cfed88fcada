//! Repository for the `appointments` table.

use salon_core::schema::appointment::{AppointmentListQuery, UpdateAppointmentInput};
use salon_core::types::{DbId, Timestamp};
use sqlx::PgPool;

use crate::models::appointment::{Appointment, NewAppointment};

const COLUMNS: &str = "id, user_id, stylist_id, style_id, scheduled_at, status, notes, \
                       cancellation_reason, created_at, updated_at";

pub struct AppointmentRepo;

impl AppointmentRepo {
    /// Insert a `SCHEDULED` appointment.
    ///
    /// A second booking for the same stylist and instant fails on
    /// `uq_appointments_stylist_slot` even if it raced past the pre-check.
    pub async fn create(pool: &PgPool, input: &NewAppointment) -> Result<Appointment, sqlx::Error> {
        let query = format!(
            "INSERT INTO appointments (user_id, stylist_id, style_id, scheduled_at, notes)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Appointment>(&query)
            .bind(input.user_id)
            .bind(input.stylist_id)
            .bind(input.style_id)
            .bind(input.scheduled_at)
            .bind(&input.notes)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Appointment>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM appointments WHERE id = $1");
        sqlx::query_as::<_, Appointment>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Id of the `SCHEDULED` appointment holding this exact slot, if any.
    pub async fn find_scheduled_at(
        pool: &PgPool,
        stylist_id: DbId,
        at: Timestamp,
    ) -> Result<Option<DbId>, sqlx::Error> {
        sqlx::query_scalar::<_, DbId>(
            "SELECT id FROM appointments
             WHERE stylist_id = $1 AND scheduled_at = $2 AND status = 'SCHEDULED'
             LIMIT 1",
        )
        .bind(stylist_id)
        .bind(at)
        .fetch_optional(pool)
        .await
    }

    /// List appointments in start-time order.
    ///
    /// `owner` restricts the result to one user and takes precedence over
    /// `params.user_id`.
    pub async fn list(
        pool: &PgPool,
        params: &AppointmentListQuery,
        owner: Option<DbId>,
    ) -> Result<Vec<Appointment>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM appointments
             WHERE ($1::UUID IS NULL OR user_id = $1)
               AND ($2::UUID IS NULL OR stylist_id = $2)
               AND ($3::TEXT IS NULL OR status = $3)
               AND ($4::TIMESTAMPTZ IS NULL OR scheduled_at >= $4)
               AND ($5::TIMESTAMPTZ IS NULL OR scheduled_at <= $5)
             ORDER BY scheduled_at ASC
             LIMIT $6 OFFSET $7"
        );
        sqlx::query_as::<_, Appointment>(&query)
            .bind(owner.or(params.user_id))
            .bind(params.stylist_id)
            .bind(params.status)
            .bind(params.range.from)
            .bind(params.range.to)
            .bind(params.page.limit)
            .bind(params.page.offset())
            .fetch_all(pool)
            .await
    }

    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateAppointmentInput,
    ) -> Result<Option<Appointment>, sqlx::Error> {
        let query = format!(
            "UPDATE appointments SET
                stylist_id = COALESCE($2, stylist_id),
                style_id = COALESCE($3, style_id),
                scheduled_at = COALESCE($4, scheduled_at),
                status = COALESCE($5, status),
                notes = COALESCE($6, notes),
                cancellation_reason = COALESCE($7, cancellation_reason)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Appointment>(&query)
            .bind(id)
            .bind(input.stylist_id)
            .bind(input.style_id)
            .bind(input.scheduled_at)
            .bind(input.status)
            .bind(&input.notes)
            .bind(&input.cancellation_reason)
            .fetch_optional(pool)
            .await
    }

    /// Hard delete. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM appointments WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
