//! Role-based access control.
//!
//! [`RequireAdmin`] enforces the admin tier at the type level. Owner-or-admin
//! routes need the resource first, so they call [`ensure_owner_or_admin`]
//! once it is loaded.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use salon_core::error::CoreError;
use salon_core::types::DbId;

use super::auth::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

/// Requires the `ADMIN` role. Rejects with 403 Forbidden otherwise.
///
/// ```ignore
/// async fn admin_only(RequireAdmin(admin): RequireAdmin) -> AppResult<StatusCode> {
///     Ok(StatusCode::NO_CONTENT)
/// }
/// ```
pub struct RequireAdmin(pub AuthUser);

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        if !user.is_admin() {
            return Err(AppError::Core(CoreError::Forbidden(
                "Admin role required".into(),
            )));
        }
        Ok(RequireAdmin(user))
    }
}

/// Allow `user` to act on a resource owned by `owner_id`.
pub fn ensure_owner_or_admin(user: &AuthUser, owner_id: DbId) -> Result<(), AppError> {
    if user.is_admin() || user.user_id == owner_id {
        Ok(())
    } else {
        Err(AppError::Core(CoreError::Forbidden(
            "You do not have access to this resource".into(),
        )))
    }
}
