//! Authentication and authorization extractors.
//!
//! - [`auth::AuthUser`] -- the caller, from a JWT Bearer token.
//! - [`auth::MaybeAuthUser`] -- the caller if a token was sent (public routes
//!   that show admins more).
//! - [`rbac::RequireAdmin`] -- requires the `ADMIN` role.
//! - [`rbac::ensure_owner_or_admin`] -- resource-level ownership check.

pub mod auth;
pub mod rbac;
