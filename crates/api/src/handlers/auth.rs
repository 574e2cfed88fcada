//! Handlers for the `/auth` resource.

use axum::extract::State;
use axum::http::header::USER_AGENT;
use axum::http::{HeaderMap, StatusCode};
use chrono::Utc;
use salon_core::error::CoreError;
use salon_core::schema::auth::{ChangePasswordInput, LoginInput, RefreshInput, RegisterInput};
use salon_core::uniqueness::ensure_email_available;
use salon_core::vocab::UserRole;
use salon_db::models::session::CreateSession;
use salon_db::models::user::{NewUser, User, UserResponse};
use salon_db::repositories::{SessionRepo, UserRepo};
use salon_db::store::PgStore;
use serde::Serialize;

use super::not_found;
use crate::auth::jwt::{generate_access_token, generate_refresh_token, hash_refresh_token};
use crate::auth::password::{hash_password, verify_password};
use crate::error::{AppError, AppResult};
use crate::extract::ValidJson;
use crate::middleware::auth::AuthUser;
use crate::response::{self, CreatedResponse, JsonResponse};
use crate::state::AppState;

/// Longest user agent kept on a session row.
const MAX_USER_AGENT_LEN: usize = 255;

// ---------------------------------------------------------------------------
// Response types
// ---------------------------------------------------------------------------

/// Returned by register, login and refresh.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub refresh_token: String,
    /// Access token lifetime in seconds.
    pub expires_in: i64,
    pub user: UserResponse,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/auth/register
///
/// Create a customer account and sign it in.
pub async fn register(
    State(state): State<AppState>,
    headers: HeaderMap,
    ValidJson(input): ValidJson<RegisterInput>,
) -> AppResult<CreatedResponse<AuthResponse>> {
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
            role: UserRole::Customer,
        },
    )
    .await?;
    tracing::info!(user_id = %user.id, "User registered");

    let response = create_auth_response(&state, user, user_agent(&headers)).await?;
    Ok(response::created(response, "User registered successfully"))
}

/// POST /api/v1/auth/login
pub async fn login(
    State(state): State<AppState>,
    headers: HeaderMap,
    ValidJson(input): ValidJson<LoginInput>,
) -> AppResult<JsonResponse<AuthResponse>> {
    let invalid = || AppError::Core(CoreError::Unauthorized("Invalid email or password".into()));

    let Some(user) = UserRepo::find_by_email(&state.pool, &input.email).await? else {
        tracing::warn!(email = %input.email, "Login for unknown email");
        return Err(invalid());
    };

    let password_valid = verify_password(&input.password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;
    if !password_valid {
        tracing::warn!(user_id = %user.id, "Login with wrong password");
        return Err(invalid());
    }

    if !user.is_active {
        return Err(AppError::Core(CoreError::Forbidden(
            "Account is deactivated".into(),
        )));
    }

    let response = create_auth_response(&state, user, user_agent(&headers)).await?;
    Ok(response::ok_with(response, "Login successful"))
}

/// The caller's own row. A deactivated account is refused even while its
/// access token is still unexpired.
async fn load_active_account(state: &AppState, auth: &AuthUser) -> AppResult<User> {
    let user = UserRepo::find_by_id(&state.pool, auth.user_id)
        .await?
        .ok_or_else(|| not_found("User", auth.user_id))?;
    if !user.is_active {
        return Err(AppError::Core(CoreError::Forbidden(
            "Account is deactivated".into(),
        )));
    }
    Ok(user)
}

/// GET /api/v1/auth/profile
pub async fn profile(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<JsonResponse<UserResponse>> {
    let user = load_active_account(&state, &auth).await?;
    Ok(response::ok(UserResponse::from(user)))
}

/// PUT /api/v1/auth/change-password
///
/// Every session is revoked afterwards, so other devices must sign in again.
pub async fn change_password(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidJson(input): ValidJson<ChangePasswordInput>,
) -> AppResult<JsonResponse<()>> {
    let user = load_active_account(&state, &auth).await?;

    let current_valid = verify_password(&input.current_password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;
    if !current_valid {
        return Err(AppError::Core(CoreError::Unauthorized(
            "Current password is incorrect".into(),
        )));
    }

    let password_hash = hash_password(&input.new_password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;
    UserRepo::update_password(&state.pool, user.id, &password_hash).await?;
    let revoked = SessionRepo::revoke_all_for_user(&state.pool, user.id).await?;
    tracing::info!(user_id = %user.id, revoked, "Password changed");

    Ok(response::ok_with((), "Password changed successfully"))
}

/// POST /api/v1/auth/logout
///
/// Revoke all sessions for the caller. Returns 204 No Content.
pub async fn logout(State(state): State<AppState>, auth: AuthUser) -> AppResult<StatusCode> {
    let revoked = SessionRepo::revoke_all_for_user(&state.pool, auth.user_id).await?;
    tracing::info!(user_id = %auth.user_id, revoked, "User logged out");
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/auth/refresh
///
/// Exchange a live refresh token for a new token pair. The presented token
/// is revoked (rotation).
pub async fn refresh(
    State(state): State<AppState>,
    headers: HeaderMap,
    ValidJson(input): ValidJson<RefreshInput>,
) -> AppResult<JsonResponse<AuthResponse>> {
    let token_hash = hash_refresh_token(&input.refresh_token);

    let session = SessionRepo::find_active_by_hash(&state.pool, &token_hash)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized(
                "Invalid or expired refresh token".into(),
            ))
        })?;
    SessionRepo::revoke(&state.pool, session.id).await?;

    let user = UserRepo::find_by_id(&state.pool, session.user_id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::Unauthorized("User no longer exists".into())))?;
    if !user.is_active {
        return Err(AppError::Core(CoreError::Forbidden(
            "Account is deactivated".into(),
        )));
    }

    let response = create_auth_response(&state, user, user_agent(&headers)).await?;
    Ok(response::ok(response))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn user_agent(headers: &HeaderMap) -> Option<String> {
    headers
        .get(USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .map(|s| s.chars().take(MAX_USER_AGENT_LEN).collect())
}

/// Generate access + refresh tokens, persist a session row, and build the response.
async fn create_auth_response(
    state: &AppState,
    user: User,
    user_agent: Option<String>,
) -> AppResult<AuthResponse> {
    let jwt = &state.config.jwt;
    let access_token = generate_access_token(user.id, &user.email, user.role, jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    let (refresh_plaintext, refresh_hash) = generate_refresh_token();
    SessionRepo::create(
        &state.pool,
        &CreateSession {
            user_id: user.id,
            refresh_token_hash: refresh_hash,
            expires_at: Utc::now() + chrono::Duration::days(jwt.refresh_token_expiry_days),
            user_agent,
        },
    )
    .await?;

    Ok(AuthResponse {
        access_token,
        refresh_token: refresh_plaintext,
        expires_in: jwt.access_token_expiry_mins * 60,
        user: UserResponse::from(user),
    })
}
