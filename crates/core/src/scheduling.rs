//! Appointment scheduling rules.
//!
//! Two independent checks guard a booking:
//! - [`check_appointment_time`] decides whether a start time is bookable at
//!   all (lead time, horizon, opening days and hours);
//! - [`ensure_slot_available`] asks the store whether the stylist already
//!   holds a `SCHEDULED` appointment at that exact instant.
//!
//! Conflicts are detected on exact start-time equality only. Appointments
//! for the same stylist that overlap without starting at the same instant
//! are accepted.

use chrono::{Datelike, Duration, Months, Timelike, Weekday};

use crate::error::CoreError;
use crate::store::SlotLookup;
use crate::types::{DbId, Timestamp};
use crate::validation::{codes, ValidationContext, ValidationErrors};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Minimum notice required for a booking.
pub const MIN_LEAD_TIME_HOURS: i64 = 1;

/// How far ahead a booking may be made.
pub const MAX_BOOKING_HORIZON_MONTHS: u32 = 6;

/// First bookable local hour (inclusive).
pub const OPENING_HOUR: u32 = 8;

/// Local closing hour (exclusive).
pub const CLOSING_HOUR: u32 = 18;

/// Minimum and maximum estimated style duration, in minutes.
pub const MIN_DURATION_MINUTES: i64 = 30;
pub const MAX_DURATION_MINUTES: i64 = 720;

// ---------------------------------------------------------------------------
// Time rules
// ---------------------------------------------------------------------------

/// A reason a start time cannot be booked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeViolation {
    /// Less than the minimum lead time from now.
    TooSoon,
    /// Beyond the booking horizon.
    TooFarAhead,
    /// The salon is closed on Sundays.
    Sunday,
    /// Outside opening hours in local time.
    OutsideBusinessHours,
}

impl TimeViolation {
    pub fn message(self) -> String {
        match self {
            TimeViolation::TooSoon => format!(
                "Appointment must be scheduled at least {MIN_LEAD_TIME_HOURS} hour(s) in advance"
            ),
            TimeViolation::TooFarAhead => format!(
                "Appointment cannot be scheduled more than {MAX_BOOKING_HORIZON_MONTHS} months in advance"
            ),
            TimeViolation::Sunday => "Appointments are not available on Sundays".to_string(),
            TimeViolation::OutsideBusinessHours => format!(
                "Appointment must be between {OPENING_HOUR:02}:00 and {CLOSING_HOUR:02}:00"
            ),
        }
    }
}

/// Every rule `at` violates, evaluated against `ctx.now` and the salon's
/// local offset. An empty result means the time is bookable.
pub fn check_appointment_time(at: Timestamp, ctx: &ValidationContext) -> Vec<TimeViolation> {
    let mut violations = Vec::new();

    if at < ctx.now + Duration::hours(MIN_LEAD_TIME_HOURS) {
        violations.push(TimeViolation::TooSoon);
    }

    // checked_add_months clamps to the end of shorter months.
    let horizon = ctx
        .now
        .checked_add_months(Months::new(MAX_BOOKING_HORIZON_MONTHS));
    if horizon.is_some_and(|limit| at > limit) {
        violations.push(TimeViolation::TooFarAhead);
    }

    let local = at.with_timezone(&ctx.utc_offset);
    if local.weekday() == Weekday::Sun {
        violations.push(TimeViolation::Sunday);
    }
    if !(OPENING_HOUR..CLOSING_HOUR).contains(&local.hour()) {
        violations.push(TimeViolation::OutsideBusinessHours);
    }

    violations
}

/// [`check_appointment_time`] as a validation failure on `scheduled_at`.
///
/// Used where the time was not part of the request, e.g. when a cancelled
/// appointment is moved back to `SCHEDULED` at its stored start time.
pub fn ensure_bookable_time(at: Timestamp, ctx: &ValidationContext) -> Result<(), CoreError> {
    let violations = check_appointment_time(at, ctx);
    if violations.is_empty() {
        return Ok(());
    }
    let mut errors = ValidationErrors::new();
    for violation in violations {
        errors.push("scheduled_at", codes::CUSTOM, violation.message());
    }
    Err(CoreError::Validation(errors))
}

// ---------------------------------------------------------------------------
// Slot conflicts
// ---------------------------------------------------------------------------

/// Reject with `Conflict` if `stylist_id` already has a `SCHEDULED`
/// appointment starting exactly at `at`, other than `exclude`.
pub async fn ensure_slot_available<S>(
    store: &S,
    stylist_id: DbId,
    at: Timestamp,
    exclude: Option<DbId>,
) -> Result<(), CoreError>
where
    S: SlotLookup + ?Sized,
{
    match store.scheduled_appointment_at(stylist_id, at).await? {
        Some(existing) if Some(existing) != exclude => Err(CoreError::Conflict(
            "Stylist already has an appointment at this time".to_string(),
        )),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::{FixedOffset, TimeZone, Utc};
    use std::sync::Mutex;

    fn ctx_at(y: i32, m: u32, d: u32, h: u32) -> ValidationContext {
        ValidationContext::new(
            Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap(),
            FixedOffset::east_opt(0).unwrap(),
        )
    }

    fn utc(y: i32, m: u32, d: u32, h: u32, min: u32) -> Timestamp {
        Utc.with_ymd_and_hms(y, m, d, h, min, 0).unwrap()
    }

    #[test]
    fn monday_morning_in_the_future_is_bookable() {
        let ctx = ctx_at(2025, 3, 1, 9);
        // 2025-03-10 is a Monday.
        assert!(check_appointment_time(utc(2025, 3, 10, 10, 0), &ctx).is_empty());
    }

    #[test]
    fn sunday_is_rejected() {
        let ctx = ctx_at(2025, 3, 1, 9);
        let v = check_appointment_time(utc(2025, 3, 9, 10, 0), &ctx);
        assert_eq!(v, vec![TimeViolation::Sunday]);
    }

    #[test]
    fn opening_hours_are_half_open() {
        let ctx = ctx_at(2025, 3, 1, 9);
        assert!(check_appointment_time(utc(2025, 3, 10, 8, 0), &ctx).is_empty());
        assert!(check_appointment_time(utc(2025, 3, 10, 17, 59), &ctx).is_empty());
        assert_eq!(
            check_appointment_time(utc(2025, 3, 10, 18, 0), &ctx),
            vec![TimeViolation::OutsideBusinessHours]
        );
        assert_eq!(
            check_appointment_time(utc(2025, 3, 10, 7, 59), &ctx),
            vec![TimeViolation::OutsideBusinessHours]
        );
    }

    #[test]
    fn business_hours_use_local_offset() {
        // 15:00 UTC is 10:00 at UTC-5.
        let ctx = ValidationContext::new(
            utc(2025, 3, 1, 9, 0),
            FixedOffset::west_opt(5 * 3600).unwrap(),
        );
        assert!(check_appointment_time(utc(2025, 3, 10, 15, 0), &ctx).is_empty());
        // 10:00 UTC is 05:00 local.
        assert_eq!(
            check_appointment_time(utc(2025, 3, 10, 10, 0), &ctx),
            vec![TimeViolation::OutsideBusinessHours]
        );
    }

    #[test]
    fn lead_time_is_enforced() {
        let ctx = ctx_at(2025, 3, 10, 9);
        assert_eq!(
            check_appointment_time(utc(2025, 3, 10, 9, 30), &ctx),
            vec![TimeViolation::TooSoon]
        );
        assert!(check_appointment_time(utc(2025, 3, 10, 10, 0), &ctx).is_empty());
    }

    #[test]
    fn past_start_time_is_not_bookable() {
        let ctx = ctx_at(2025, 3, 10, 9);
        // 2025-03-03 is the previous Monday.
        let err = ensure_bookable_time(utc(2025, 3, 3, 10, 0), &ctx).unwrap_err();
        let CoreError::Validation(errors) = err else {
            panic!("expected a validation failure, got {err:?}");
        };
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.errors()[0].field, "scheduled_at");
        assert_eq!(errors.errors()[0].message, TimeViolation::TooSoon.message());

        assert!(ensure_bookable_time(utc(2025, 3, 11, 10, 0), &ctx).is_ok());
    }

    #[test]
    fn horizon_is_six_calendar_months() {
        let ctx = ctx_at(2025, 3, 1, 9);
        // 2025-09-01 is a Monday; 09:00 is exactly the limit.
        assert!(check_appointment_time(utc(2025, 9, 1, 9, 0), &ctx).is_empty());
        assert_eq!(
            check_appointment_time(utc(2025, 9, 1, 10, 0), &ctx),
            vec![TimeViolation::TooFarAhead]
        );
    }

    #[test]
    fn every_violation_is_reported() {
        let ctx = ctx_at(2025, 3, 10, 9);
        // A Sunday night in the past.
        let v = check_appointment_time(utc(2025, 3, 9, 22, 0), &ctx);
        assert_eq!(
            v,
            vec![
                TimeViolation::TooSoon,
                TimeViolation::Sunday,
                TimeViolation::OutsideBusinessHours
            ]
        );
    }

    // -- slot conflicts ----------------------------------------------------

    #[derive(Default)]
    struct FakeSlots(Mutex<Vec<(DbId, DbId, Timestamp)>>);

    #[async_trait]
    impl SlotLookup for FakeSlots {
        async fn scheduled_appointment_at(
            &self,
            stylist_id: DbId,
            at: Timestamp,
        ) -> Result<Option<DbId>, CoreError> {
            Ok(self
                .0
                .lock()
                .unwrap()
                .iter()
                .find(|(_, s, t)| *s == stylist_id && *t == at)
                .map(|(id, _, _)| *id))
        }
    }

    #[tokio::test]
    async fn identical_slot_for_same_stylist_conflicts() {
        let store = FakeSlots::default();
        let stylist = DbId::new_v4();
        let at = utc(2025, 3, 10, 10, 0);

        assert!(ensure_slot_available(&store, stylist, at, None).await.is_ok());
        store.0.lock().unwrap().push((DbId::new_v4(), stylist, at));

        let err = ensure_slot_available(&store, stylist, at, None)
            .await
            .unwrap_err();
        assert!(matches!(err, CoreError::Conflict(_)));
    }

    #[tokio::test]
    async fn overlapping_but_distinct_start_times_do_not_conflict() {
        let store = FakeSlots::default();
        let stylist = DbId::new_v4();
        store
            .0
            .lock()
            .unwrap()
            .push((DbId::new_v4(), stylist, utc(2025, 3, 10, 10, 0)));

        assert!(
            ensure_slot_available(&store, stylist, utc(2025, 3, 10, 10, 30), None)
                .await
                .is_ok()
        );
    }

    #[tokio::test]
    async fn other_stylist_or_own_slot_does_not_conflict() {
        let store = FakeSlots::default();
        let stylist = DbId::new_v4();
        let own = DbId::new_v4();
        let at = utc(2025, 3, 10, 10, 0);
        store.0.lock().unwrap().push((own, stylist, at));

        assert!(ensure_slot_available(&store, DbId::new_v4(), at, None)
            .await
            .is_ok());
        assert!(ensure_slot_available(&store, stylist, at, Some(own))
            .await
            .is_ok());
    }
}
