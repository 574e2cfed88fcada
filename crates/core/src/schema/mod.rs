//! Per-operation input schemas.
//!
//! One module per entity; each holds the create, update, list-query (and
//! where relevant, params) schemas as plain structs implementing
//! [`Schema`](crate::validation::Schema). The structs carry normalized
//! values, ready for the repositories.

pub mod appointment;
pub mod auth;
pub mod category;
pub mod common;
pub mod order;
pub mod product;
pub mod review;
pub mod style;
pub mod stylist;
pub mod user;

/// Shared length limits.
pub const MIN_NAME_LENGTH: usize = 2;
pub const MAX_NAME_LENGTH: usize = 100;
pub const MAX_DESCRIPTION_LENGTH: usize = 1000;
pub const MAX_NOTES_LENGTH: usize = 500;
pub const MAX_SEARCH_LENGTH: usize = 100;
