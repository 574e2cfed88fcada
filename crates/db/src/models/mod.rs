//! Row structs and DTOs.
//!
//! Each submodule contains a `FromRow` entity struct matching the table and,
//! where the API input needs extra server-side data (a password hash, a
//! computed flag), a small insert DTO. Otherwise repositories take the
//! validated `salon_core::schema` inputs directly.

pub mod appointment;
pub mod category;
pub mod order;
pub mod product;
pub mod review;
pub mod session;
pub mod style;
pub mod stylist;
pub mod user;
