//! Handlers for the `/appointments` resource.
//!
//! Booking-time rules (lead time, horizon, opening days and hours) run while
//! the input is validated. The slot conflict check needs the store, so it
//! runs here before any write; the partial unique index
//! `uq_appointments_stylist_slot` turns a lost race into a 409 as well.

use axum::extract::State;
use axum::http::StatusCode;
use salon_core::error::CoreError;
use salon_core::scheduling::{ensure_bookable_time, ensure_slot_available};
use salon_core::schema::appointment::{
    AppointmentListQuery, CreateAppointmentInput, UpdateAppointmentInput,
};
use salon_core::schema::common::IdParams;
use salon_core::types::DbId;
use salon_core::vocab::AppointmentStatus;
use salon_db::models::appointment::{Appointment, NewAppointment};
use salon_db::repositories::{AppointmentRepo, StyleRepo, StylistRepo};
use salon_db::store::PgStore;

use super::not_found;
use crate::error::{AppError, AppResult};
use crate::extract::{ValidJson, ValidPath, ValidQuery, Validated};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::ensure_owner_or_admin;
use crate::response::{self, CreatedResponse, JsonResponse};
use crate::state::AppState;

/// A bookable stylist must exist and be active.
async fn ensure_bookable_stylist(state: &AppState, stylist_id: DbId) -> AppResult<()> {
    StylistRepo::find_by_id(&state.pool, stylist_id)
        .await?
        .filter(|s| s.is_active)
        .map(|_| ())
        .ok_or_else(|| not_found("Stylist", stylist_id))
}

async fn ensure_style_exists(state: &AppState, style_id: DbId) -> AppResult<()> {
    StyleRepo::find_by_id(&state.pool, style_id)
        .await?
        .map(|_| ())
        .ok_or_else(|| not_found("Style", style_id))
}

/// Load an appointment the caller may act on.
async fn load_owned(state: &AppState, auth: &AuthUser, id: DbId) -> AppResult<Appointment> {
    let appointment = AppointmentRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found("Appointment", id))?;
    ensure_owner_or_admin(auth, appointment.user_id)?;
    Ok(appointment)
}

/// GET /api/v1/appointments
///
/// Customers see only their own appointments; admins may filter by `user_id`.
pub async fn list(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidQuery(params): ValidQuery<AppointmentListQuery>,
) -> AppResult<JsonResponse<Vec<Appointment>>> {
    let owner = (!auth.is_admin()).then_some(auth.user_id);
    let appointments = AppointmentRepo::list(&state.pool, &params, owner).await?;
    tracing::debug!(count = appointments.len(), "Listed appointments");
    Ok(response::ok(appointments))
}

/// POST /api/v1/appointments
pub async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidJson(input): ValidJson<CreateAppointmentInput>,
) -> AppResult<CreatedResponse<Appointment>> {
    let user_id = match input.user_id {
        Some(on_behalf_of) if auth.is_admin() => on_behalf_of,
        _ => auth.user_id,
    };

    ensure_bookable_stylist(&state, input.stylist_id).await?;
    ensure_style_exists(&state, input.style_id).await?;
    ensure_slot_available(
        &PgStore::new(&state.pool),
        input.stylist_id,
        input.scheduled_at,
        None,
    )
    .await?;

    let appointment = AppointmentRepo::create(
        &state.pool,
        &NewAppointment {
            user_id,
            stylist_id: input.stylist_id,
            style_id: input.style_id,
            scheduled_at: input.scheduled_at,
            notes: input.notes,
        },
    )
    .await?;
    tracing::info!(
        appointment_id = %appointment.id,
        stylist_id = %appointment.stylist_id,
        scheduled_at = %appointment.scheduled_at,
        "Appointment booked",
    );

    Ok(response::created(
        appointment,
        "Appointment booked successfully",
    ))
}

/// GET /api/v1/appointments/{id} (owner or admin)
pub async fn get_by_id(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidPath(IdParams { id }): ValidPath<IdParams>,
) -> AppResult<JsonResponse<Appointment>> {
    let appointment = load_owned(&state, &auth, id).await?;
    Ok(response::ok(appointment))
}

/// PUT /api/v1/appointments/{id} (owner or admin)
///
/// Customers may reschedule, change style or notes, and cancel. Marking an
/// appointment completed or no-show is for admins, and so is any later
/// change to one. Moving back to `SCHEDULED` re-checks the booking rules
/// against the stored start time unless a new one is sent.
pub async fn update(
    State(state): State<AppState>,
    auth: AuthUser,
    input: Validated<IdParams, (), UpdateAppointmentInput>,
) -> AppResult<JsonResponse<Appointment>> {
    let id = input.params.id;
    let changes = input.body;
    let existing = load_owned(&state, &auth, id).await?;

    if matches!(
        changes.status,
        Some(AppointmentStatus::Completed | AppointmentStatus::NoShow)
    ) && !auth.is_admin()
    {
        return Err(AppError::Core(CoreError::Forbidden(
            "Only administrators can mark appointments completed or no-show".into(),
        )));
    }

    if matches!(
        existing.status,
        AppointmentStatus::Completed | AppointmentStatus::NoShow
    ) && !auth.is_admin()
    {
        return Err(AppError::Core(CoreError::Forbidden(
            "Completed and no-show appointments can only be changed by administrators".into(),
        )));
    }

    if let Some(stylist_id) = changes.stylist_id {
        ensure_bookable_stylist(&state, stylist_id).await?;
    }
    if let Some(style_id) = changes.style_id {
        ensure_style_exists(&state, style_id).await?;
    }

    let status = changes.status.unwrap_or(existing.status);
    let reactivates = status == AppointmentStatus::Scheduled
        && existing.status != AppointmentStatus::Scheduled;
    if reactivates && changes.scheduled_at.is_none() {
        ensure_bookable_time(existing.scheduled_at, &state.validation_context())?;
    }
    if status == AppointmentStatus::Scheduled && (changes.changes_slot() || reactivates) {
        ensure_slot_available(
            &PgStore::new(&state.pool),
            changes.stylist_id.unwrap_or(existing.stylist_id),
            changes.scheduled_at.unwrap_or(existing.scheduled_at),
            Some(id),
        )
        .await?;
    }

    let appointment = AppointmentRepo::update(&state.pool, id, &changes)
        .await?
        .ok_or_else(|| not_found("Appointment", id))?;
    tracing::info!(appointment_id = %id, status = %appointment.status, "Appointment updated");

    Ok(response::ok_with(
        appointment,
        "Appointment updated successfully",
    ))
}

/// DELETE /api/v1/appointments/{id} (owner or admin, hard delete)
pub async fn delete(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidPath(IdParams { id }): ValidPath<IdParams>,
) -> AppResult<StatusCode> {
    load_owned(&state, &auth, id).await?;
    if AppointmentRepo::delete(&state.pool, id).await? {
        tracing::info!(appointment_id = %id, deleted_by = %auth.user_id, "Appointment deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found("Appointment", id))
    }
}
