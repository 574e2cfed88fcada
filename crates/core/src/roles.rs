//! Well-known role name constants.
//!
//! These must match the `CHECK` constraint on `users.role` and the wire form
//! of [`crate::vocab::UserRole`].

pub const ROLE_CUSTOMER: &str = "CUSTOMER";
pub const ROLE_ADMIN: &str = "ADMIN";
