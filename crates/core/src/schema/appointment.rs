//! Appointment inputs.
//!
//! `scheduled_at` is checked against the booking rules in
//! [`crate::scheduling`] at validation time; the slot conflict check needs
//! the store and runs in the handler.

use super::common::{DateRange, Page};
use super::MAX_NOTES_LENGTH;
use crate::scheduling::check_appointment_time;
use crate::types::{DbId, Timestamp};
use crate::validation::{codes, Fields, Schema};
use crate::vocab::AppointmentStatus;

fn read_scheduled_at(f: &mut Fields<'_>, required: bool) -> Option<Timestamp> {
    let at = if required {
        f.datetime("scheduled_at")
    } else {
        f.opt_datetime("scheduled_at")
    }?;
    let violations = check_appointment_time(at, f.context());
    for violation in &violations {
        f.reject("scheduled_at", codes::CUSTOM, violation.message());
    }
    violations.is_empty().then_some(at)
}

/// `POST /appointments`.
#[derive(Debug, Clone)]
pub struct CreateAppointmentInput {
    pub stylist_id: DbId,
    pub style_id: DbId,
    pub scheduled_at: Timestamp,
    pub notes: Option<String>,
    /// Book on behalf of another user; honoured for admins only.
    pub user_id: Option<DbId>,
}

impl Schema for CreateAppointmentInput {
    fn from_fields(f: &mut Fields<'_>) -> Option<Self> {
        let stylist_id = f.uuid("stylist_id");
        let style_id = f.uuid("style_id");
        let scheduled_at = read_scheduled_at(f, true);
        let notes = f.opt_text("notes", MAX_NOTES_LENGTH);
        let user_id = f.opt_uuid("user_id");
        Some(Self {
            stylist_id: stylist_id?,
            style_id: style_id?,
            scheduled_at: scheduled_at?,
            notes,
            user_id,
        })
    }
}

/// `PUT /appointments/{id}`.
#[derive(Debug, Clone, Default)]
pub struct UpdateAppointmentInput {
    pub stylist_id: Option<DbId>,
    pub style_id: Option<DbId>,
    pub scheduled_at: Option<Timestamp>,
    pub status: Option<AppointmentStatus>,
    pub notes: Option<String>,
    pub cancellation_reason: Option<String>,
}

impl UpdateAppointmentInput {
    /// True when the update could move the appointment into a new slot.
    pub fn changes_slot(&self) -> bool {
        self.stylist_id.is_some() || self.scheduled_at.is_some()
    }
}

impl Schema for UpdateAppointmentInput {
    fn from_fields(f: &mut Fields<'_>) -> Option<Self> {
        f.require_any(&[
            "stylist_id",
            "style_id",
            "scheduled_at",
            "status",
            "notes",
            "cancellation_reason",
        ]);
        let reschedules = f.present("scheduled_at");
        let input = Self {
            stylist_id: f.opt_uuid("stylist_id"),
            style_id: f.opt_uuid("style_id"),
            scheduled_at: read_scheduled_at(f, false),
            status: f.opt_choice("status"),
            notes: f.opt_text("notes", MAX_NOTES_LENGTH),
            cancellation_reason: f.opt_text("cancellation_reason", MAX_NOTES_LENGTH),
        };

        if input.status == Some(AppointmentStatus::Completed) && reschedules {
            f.reject(
                "scheduled_at",
                codes::CUSTOM,
                "Cannot change the date of an appointment while marking it completed",
            );
        }
        if input.status == Some(AppointmentStatus::Cancelled)
            && input.cancellation_reason.as_deref().unwrap_or("").is_empty()
        {
            f.reject(
                "cancellation_reason",
                codes::REQUIRED,
                "A cancellation reason is required when cancelling an appointment",
            );
        }
        Some(input)
    }
}

/// `GET /appointments` query.
#[derive(Debug, Clone, Default)]
pub struct AppointmentListQuery {
    pub page: Page,
    pub stylist_id: Option<DbId>,
    /// Honoured for admins only; customers always see their own.
    pub user_id: Option<DbId>,
    pub status: Option<AppointmentStatus>,
    pub range: DateRange,
}

impl Schema for AppointmentListQuery {
    fn from_fields(f: &mut Fields<'_>) -> Option<Self> {
        Some(Self {
            page: Page::read(f),
            stylist_id: f.opt_uuid("stylist_id"),
            user_id: f.opt_uuid("user_id"),
            status: f.opt_choice("status"),
            range: DateRange::read(f),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::ValidationContext;
    use chrono::{FixedOffset, TimeZone, Utc};
    use serde_json::json;

    fn ctx() -> ValidationContext {
        ValidationContext::new(
            Utc.with_ymd_and_hms(2025, 3, 1, 9, 0, 0).unwrap(),
            FixedOffset::east_opt(0).unwrap(),
        )
    }

    fn ids() -> (String, String) {
        (DbId::new_v4().to_string(), DbId::new_v4().to_string())
    }

    #[test]
    fn monday_morning_booking_is_accepted() {
        let (stylist, style) = ids();
        let input = CreateAppointmentInput::parse(
            &json!({ "stylist_id": stylist, "style_id": style, "scheduled_at": "2025-03-10T10:00" }),
            &ctx(),
        )
        .unwrap();
        assert_eq!(
            input.scheduled_at,
            Utc.with_ymd_and_hms(2025, 3, 10, 10, 0, 0).unwrap()
        );
    }

    #[test]
    fn sunday_evening_booking_reports_both_rules() {
        let (stylist, style) = ids();
        let errors = CreateAppointmentInput::parse(
            &json!({ "stylist_id": stylist, "style_id": style, "scheduled_at": "2025-03-09T19:00:00Z" }),
            &ctx(),
        )
        .unwrap_err();
        assert_eq!(errors.len(), 2);
        assert!(errors.errors().iter().all(|e| e.field == "scheduled_at"));
    }

    #[test]
    fn completing_while_rescheduling_is_rejected() {
        let errors = UpdateAppointmentInput::parse(
            &json!({ "status": "COMPLETED", "scheduled_at": "2025-03-11T10:00" }),
            &ctx(),
        )
        .unwrap_err();
        assert!(errors.has_field("scheduled_at"));
    }

    #[test]
    fn cancelling_requires_reason() {
        let errors =
            UpdateAppointmentInput::parse(&json!({ "status": "CANCELLED" }), &ctx()).unwrap_err();
        assert!(errors.has_field("cancellation_reason"));

        let input = UpdateAppointmentInput::parse(
            &json!({ "status": "CANCELLED", "cancellation_reason": "Client is travelling" }),
            &ctx(),
        )
        .unwrap();
        assert_eq!(input.status, Some(AppointmentStatus::Cancelled));
        assert!(!input.changes_slot());
    }

    #[test]
    fn status_accepts_no_show() {
        let input =
            UpdateAppointmentInput::parse(&json!({ "status": "NO_SHOW" }), &ctx()).unwrap();
        assert_eq!(input.status, Some(AppointmentStatus::NoShow));
    }
}
