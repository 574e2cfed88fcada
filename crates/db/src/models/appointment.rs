use salon_core::types::{DbId, Timestamp};
use salon_core::vocab::AppointmentStatus;
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `appointments` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct Appointment {
    pub id: DbId,
    pub user_id: DbId,
    pub stylist_id: DbId,
    pub style_id: DbId,
    pub scheduled_at: Timestamp,
    pub status: AppointmentStatus,
    pub notes: Option<String>,
    pub cancellation_reason: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Insert DTO. The owner is resolved by the handler (the caller, or the
/// requested user when an admin books on someone's behalf).
#[derive(Debug, Clone)]
pub struct NewAppointment {
    pub user_id: DbId,
    pub stylist_id: DbId,
    pub style_id: DbId,
    pub scheduled_at: Timestamp,
    pub notes: Option<String>,
}
