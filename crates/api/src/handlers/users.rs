//! Handlers for the `/users` resource.
//!
//! Password hashes never leave this module: every payload is a
//! [`UserResponse`].

use axum::extract::State;
use axum::http::StatusCode;
use salon_core::error::CoreError;
use salon_core::schema::common::IdParams;
use salon_core::schema::user::{CreateUserInput, UpdateUserInput, UserListQuery};
use salon_core::uniqueness::ensure_email_available;
use salon_db::models::user::{NewUser, UserResponse};
use salon_db::repositories::{SessionRepo, UserRepo};
use salon_db::store::PgStore;

use super::not_found;
use crate::auth::password::hash_password;
use crate::error::{AppError, AppResult};
use crate::extract::{ValidJson, ValidPath, ValidQuery, Validated};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::{ensure_owner_or_admin, RequireAdmin};
use crate::response::{self, CreatedResponse, JsonResponse};
use crate::state::AppState;

/// GET /api/v1/users (admin)
pub async fn list(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    ValidQuery(params): ValidQuery<UserListQuery>,
) -> AppResult<JsonResponse<Vec<UserResponse>>> {
    let users = UserRepo::list(&state.pool, &params).await?;
    tracing::debug!(count = users.len(), "Listed users");
    Ok(response::ok(
        users.into_iter().map(UserResponse::from).collect(),
    ))
}

/// POST /api/v1/users (admin)
pub async fn create(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    ValidJson(input): ValidJson<CreateUserInput>,
) -> AppResult<CreatedResponse<UserResponse>> {
    ensure_email_available(&PgStore::new(&state.pool), &input.email, None).await?;

    let password_hash = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;
    let user = UserRepo::create(
        &state.pool,
        &NewUser {
            name: input.name,
            email: input.email,
            password_hash,
            phone: input.phone,
            role: input.role,
        },
    )
    .await?;
    tracing::info!(user_id = %user.id, role = %user.role, created_by = %admin.user_id, "User created");

    Ok(response::created(
        UserResponse::from(user),
        "User created successfully",
    ))
}

/// GET /api/v1/users/{id} (owner or admin)
pub async fn get_by_id(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidPath(IdParams { id }): ValidPath<IdParams>,
) -> AppResult<JsonResponse<UserResponse>> {
    ensure_owner_or_admin(&auth, id)?;
    let user = UserRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found("User", id))?;
    Ok(response::ok(UserResponse::from(user)))
}

/// PUT /api/v1/users/{id} (owner or admin; `role` and `is_active` admin only)
pub async fn update(
    State(state): State<AppState>,
    auth: AuthUser,
    input: Validated<IdParams, (), UpdateUserInput>,
) -> AppResult<JsonResponse<UserResponse>> {
    let id = input.params.id;
    let changes = input.body;

    ensure_owner_or_admin(&auth, id)?;
    if changes.touches_privileged_fields() && !auth.is_admin() {
        return Err(AppError::Core(CoreError::Forbidden(
            "Only administrators can change role or active status".into(),
        )));
    }
    if let Some(email) = &changes.email {
        ensure_email_available(&PgStore::new(&state.pool), email, Some(id)).await?;
    }

    let user = UserRepo::update(&state.pool, id, &changes)
        .await?
        .ok_or_else(|| not_found("User", id))?;
    if changes.is_active == Some(false) {
        let revoked = SessionRepo::revoke_all_for_user(&state.pool, id).await?;
        tracing::info!(user_id = %id, revoked, "Sessions revoked for deactivated user");
    }
    tracing::info!(user_id = %user.id, updated_by = %auth.user_id, "User updated");

    Ok(response::ok_with(
        UserResponse::from(user),
        "User updated successfully",
    ))
}

/// DELETE /api/v1/users/{id} (admin, soft delete)
///
/// Refresh tokens are revoked with the account. Access tokens already
/// issued stay valid until they expire.
pub async fn delete(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    ValidPath(IdParams { id }): ValidPath<IdParams>,
) -> AppResult<StatusCode> {
    if UserRepo::deactivate(&state.pool, id).await? {
        let revoked = SessionRepo::revoke_all_for_user(&state.pool, id).await?;
        tracing::info!(user_id = %id, deleted_by = %admin.user_id, revoked, "User deactivated");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found("User", id))
    }
}
