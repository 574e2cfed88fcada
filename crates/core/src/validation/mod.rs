//! Field-level validation engine.
//!
//! Untrusted input arrives as a JSON value (request bodies as-is, path
//! params and query strings as objects of strings). A [`Schema`] reads the
//! fields it knows through a [`Fields`] reader, which normalizes each value
//! (trimming, lower-casing, coercion) and records a [`FieldError`] for every
//! problem it finds. Nothing stops at the first failure: the caller gets the
//! whole batch in one [`ValidationErrors`].

pub mod fields;

use std::fmt;

use chrono::{FixedOffset, Offset, Utc};
use serde::Serialize;
use serde_json::Value;

use crate::types::Timestamp;

pub use fields::Fields;

/// Machine-readable failure codes carried by [`FieldError::code`].
pub mod codes {
    pub const REQUIRED: &str = "required";
    pub const INVALID_TYPE: &str = "invalid_type";
    pub const TOO_SHORT: &str = "too_short";
    pub const TOO_LONG: &str = "too_long";
    pub const TOO_SMALL: &str = "too_small";
    pub const TOO_BIG: &str = "too_big";
    pub const INVALID_FORMAT: &str = "invalid_format";
    pub const INVALID_ENUM: &str = "invalid_enum";
    pub const INVALID_UUID: &str = "invalid_uuid";
    pub const INVALID_EMAIL: &str = "invalid_email";
    pub const INVALID_URL: &str = "invalid_url";
    pub const INVALID_DATE: &str = "invalid_date";
    pub const INVALID_DECIMAL: &str = "invalid_decimal";
    pub const CUSTOM: &str = "custom";
    pub const EMPTY_UPDATE: &str = "empty_update";
}

/// Field path used for failures that concern the input as a whole.
pub const ROOT_FIELD: &str = "root";

/// A single field-level rejection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    /// Dotted path to the offending field (e.g. `items.1.quantity`).
    pub field: String,
    pub message: String,
    pub code: &'static str,
}

/// Every field-level rejection collected while validating one input.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(Vec<FieldError>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// A batch holding exactly one failure.
    pub fn single(field: &str, code: &'static str, message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.push(field, code, message);
        errors
    }

    pub fn push(&mut self, field: &str, code: &'static str, message: impl Into<String>) {
        self.0.push(FieldError {
            field: field.to_string(),
            message: message.into(),
            code,
        });
    }

    /// Append another batch, prefixing each field path with `prefix.`.
    ///
    /// Used when several request locations are validated together.
    pub fn extend_prefixed(&mut self, prefix: &str, other: ValidationErrors) {
        for mut error in other.0 {
            error.field = if error.field == ROOT_FIELD {
                prefix.to_string()
            } else {
                format!("{prefix}.{}", error.field)
            };
            self.0.push(error);
        }
    }

    pub fn extend(&mut self, other: ValidationErrors) {
        self.0.extend(other.0);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn errors(&self) -> &[FieldError] {
        &self.0
    }

    /// True if any failure is reported against `field`.
    pub fn has_field(&self, field: &str) -> bool {
        self.0.iter().any(|e| e.field == field)
    }

    pub fn into_vec(self) -> Vec<FieldError> {
        self.0
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .0
            .iter()
            .map(|e| format!("{}: {}", e.field, e.message))
            .collect();
        write!(f, "{}", parts.join("; "))
    }
}

impl std::error::Error for ValidationErrors {}

/// Evaluation-time inputs that some rules depend on.
///
/// Carried explicitly so time-relative rules (appointment lead time, business
/// hours) are deterministic under test.
#[derive(Debug, Clone, Copy)]
pub struct ValidationContext {
    pub now: Timestamp,
    /// Offset of the salon's local time from UTC.
    pub utc_offset: FixedOffset,
}

impl ValidationContext {
    pub fn new(now: Timestamp, utc_offset: FixedOffset) -> Self {
        Self { now, utc_offset }
    }

    /// Context evaluated at the current instant.
    pub fn current(utc_offset: FixedOffset) -> Self {
        Self::new(Utc::now(), utc_offset)
    }
}

impl Default for ValidationContext {
    fn default() -> Self {
        Self::current(Utc.fix())
    }
}

/// A declarative description of one operation's input.
///
/// Implementors read every field they care about before combining the
/// results, so a single call reports all failures:
///
/// ```ignore
/// fn from_fields(f: &mut Fields<'_>) -> Option<Self> {
///     let name = f.text("name", 2, 100);
///     let email = f.email("email");
///     Some(Self { name: name?, email: email? })
/// }
/// ```
pub trait Schema: Sized {
    /// Read and normalize fields. Returns `None` when any required field is
    /// missing or invalid; the reason is recorded in `fields`.
    fn from_fields(fields: &mut Fields<'_>) -> Option<Self>;

    /// Validate a raw JSON value against this schema.
    fn parse(raw: &Value, ctx: &ValidationContext) -> Result<Self, ValidationErrors> {
        let mut fields = Fields::new(raw, ctx);
        let parsed = Self::from_fields(&mut fields);
        fields.finish(parsed)
    }
}

/// The empty schema: accepts any input and extracts nothing.
impl Schema for () {
    fn from_fields(_: &mut Fields<'_>) -> Option<Self> {
        Some(())
    }

    fn parse(_: &Value, _: &ValidationContext) -> Result<Self, ValidationErrors> {
        Ok(())
    }
}
