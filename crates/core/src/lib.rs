//! Domain core for the braiding salon backend.
//!
//! Holds everything that does not need a database or an HTTP server: id and
//! timestamp types, the error taxonomy, the field-validation engine with the
//! per-entity schemas built on it, and the business rules (appointment
//! scheduling, order pricing and lifecycle, uniqueness checks, review
//! targets). Persistence is reached only through the async ports in
//! [`store`].

pub mod error;
pub mod orders;
pub mod pricing;
pub mod reviews;
pub mod roles;
pub mod scheduling;
pub mod schema;
pub mod specialty;
pub mod store;
pub mod types;
pub mod uniqueness;
pub mod validation;
pub mod vocab;
