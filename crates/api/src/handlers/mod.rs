//! Request handlers, one module per resource.
//!
//! Handlers stay thin: the validating extractors have already produced typed
//! input, so each handler applies the business rules from `salon_core`, calls
//! a repository, and wraps the result in the success envelope.

pub mod appointments;
pub mod auth;
pub mod categories;
pub mod orders;
pub mod products;
pub mod reviews;
pub mod styles;
pub mod stylists;
pub mod users;

use salon_core::error::CoreError;
use salon_core::types::DbId;

use crate::error::AppError;

/// 404 for `entity` with `id`.
pub(crate) fn not_found(entity: &'static str, id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound { entity, id })
}
