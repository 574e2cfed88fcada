//! The [`Fields`] reader: typed, normalizing accessors over a raw JSON object.
//!
//! Every accessor returns `Some(value)` for a present, valid field. A missing
//! field yields `None` (and a `required` failure for the non-`opt_` variants);
//! an invalid field yields `None` plus a failure describing why. Values coming
//! from path params or query strings are strings, so numeric and boolean
//! accessors coerce from their textual form.

use std::str::FromStr;
use std::sync::LazyLock;

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use regex::Regex;
use rust_decimal::Decimal;
use serde_json::{Map, Value};
use uuid::Uuid;
use validator::{ValidateEmail, ValidateUrl};

use super::{codes, ValidationContext, ValidationErrors, ROOT_FIELD};
use crate::types::{DbId, Timestamp};
use crate::vocab::Vocabulary;

/// Maximum length of an email address.
pub const MAX_EMAIL_LEN: usize = 255;

/// Password length bounds.
pub const MIN_PASSWORD_LEN: usize = 8;
pub const MAX_PASSWORD_LEN: usize = 128;

/// Maximum length of a stored URL.
pub const MAX_URL_LEN: usize = 500;

/// Upper bound for any price field.
pub const MAX_PRICE: Decimal = Decimal::from_parts(999_999, 0, 0, false, 2);

/// Accepted phone shape: optional leading `+`, then digits, spaces, dashes
/// and parentheses.
static PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+?[0-9 ()\-]{7,20}$").expect("valid regex"));

/// Accepted naive date-time layouts, interpreted in the salon's local time.
const NAIVE_DATETIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S"];

type Rejection = (&'static str, String);

/// Reader over one JSON object, accumulating failures as it goes.
pub struct Fields<'a> {
    raw: Option<&'a Map<String, Value>>,
    ctx: &'a ValidationContext,
    prefix: String,
    errors: ValidationErrors,
}

impl<'a> Fields<'a> {
    /// Start reading `raw`. `null` is treated as an empty object; any other
    /// non-object value is itself a failure.
    pub fn new(raw: &'a Value, ctx: &'a ValidationContext) -> Self {
        let mut fields = Self {
            raw: raw.as_object(),
            ctx,
            prefix: String::new(),
            errors: ValidationErrors::new(),
        };
        if !raw.is_object() && !raw.is_null() {
            fields
                .errors
                .push(ROOT_FIELD, codes::INVALID_TYPE, "Expected an object");
        }
        fields
    }

    pub fn context(&self) -> &ValidationContext {
        self.ctx
    }

    /// Finish reading. Yields the parsed value only when no failure was
    /// recorded.
    pub fn finish<T>(self, parsed: Option<T>) -> Result<T, ValidationErrors> {
        match parsed {
            Some(value) if self.errors.is_empty() => Ok(value),
            Some(_) => Err(self.errors),
            None if !self.errors.is_empty() => Err(self.errors),
            None => Err(ValidationErrors::single(
                ROOT_FIELD,
                codes::INVALID_TYPE,
                "Input could not be parsed",
            )),
        }
    }

    /// True when `name` is present with a non-null value.
    pub fn present(&self, name: &str) -> bool {
        !matches!(self.get(name), None | Some(Value::Null))
    }

    /// Record a failure against `name` (a cross-field refinement).
    pub fn reject(&mut self, name: &str, code: &'static str, message: impl Into<String>) {
        let path = self.path(name);
        self.errors.push(&path, code, message);
    }

    /// Record a `custom` failure against `name` unless `ok` holds.
    pub fn refine(&mut self, name: &str, ok: bool, message: impl Into<String>) {
        if !ok {
            self.reject(name, codes::CUSTOM, message);
        }
    }

    /// Update schemas: at least one of `names` must be present.
    pub fn require_any(&mut self, names: &[&str]) {
        if !names.iter().any(|n| self.present(n)) {
            let path = if self.prefix.is_empty() {
                ROOT_FIELD.to_string()
            } else {
                self.prefix.clone()
            };
            self.errors.push(
                &path,
                codes::EMPTY_UPDATE,
                "At least one field must be provided for update",
            );
        }
    }

    // -----------------------------------------------------------------------
    // Strings
    // -----------------------------------------------------------------------

    /// Required trimmed string with `min..=max` characters.
    pub fn text(&mut self, name: &str, min: usize, max: usize) -> Option<String> {
        self.read(name, true, |v| parse_text(name, v, min, max))
    }

    /// Optional trimmed string of at most `max` characters.
    pub fn opt_text(&mut self, name: &str, max: usize) -> Option<String> {
        self.read(name, false, |v| parse_text(name, v, 0, max))
    }

    /// Optional trimmed string with `min..=max` characters.
    pub fn opt_text_between(&mut self, name: &str, min: usize, max: usize) -> Option<String> {
        self.read(name, false, |v| parse_text(name, v, min, max))
    }

    /// Required email, trimmed and lower-cased.
    pub fn email(&mut self, name: &str) -> Option<String> {
        self.read(name, true, |v| parse_email(name, v))
    }

    pub fn opt_email(&mut self, name: &str) -> Option<String> {
        self.read(name, false, |v| parse_email(name, v))
    }

    /// Required password: 8-128 characters with a lowercase letter, an
    /// uppercase letter and a digit. Not trimmed.
    pub fn password(&mut self, name: &str) -> Option<String> {
        self.read(name, true, |v| parse_password(name, v))
    }

    /// Required non-empty secret (e.g. a login password), length-capped only.
    pub fn secret(&mut self, name: &str) -> Option<String> {
        self.read(name, true, |v| {
            let s = expect_str(name, v)?;
            if s.is_empty() {
                return Err((codes::TOO_SHORT, format!("{name} must not be empty")));
            }
            if s.chars().count() > MAX_PASSWORD_LEN {
                return Err((
                    codes::TOO_LONG,
                    format!("{name} must be at most {MAX_PASSWORD_LEN} characters"),
                ));
            }
            Ok(s.to_string())
        })
    }

    /// Required http(s) URL.
    pub fn url(&mut self, name: &str) -> Option<String> {
        self.read(name, true, |v| parse_url(name, v))
    }

    pub fn opt_url(&mut self, name: &str) -> Option<String> {
        self.read(name, false, |v| parse_url(name, v))
    }

    pub fn opt_phone(&mut self, name: &str) -> Option<String> {
        self.read(name, false, |v| {
            let s = expect_str(name, v)?.trim();
            if PHONE_RE.is_match(s) {
                Ok(s.to_string())
            } else {
                Err((
                    codes::INVALID_FORMAT,
                    format!("{name} must be a valid phone number"),
                ))
            }
        })
    }

    /// Optional string matching `pattern` after trimming and upper-casing.
    pub fn opt_code(&mut self, name: &str, pattern: &Regex, hint: &str) -> Option<String> {
        self.read(name, false, |v| {
            let s = expect_str(name, v)?.trim().to_uppercase();
            if pattern.is_match(&s) {
                Ok(s)
            } else {
                Err((codes::INVALID_FORMAT, format!("{name} {hint}")))
            }
        })
    }

    // -----------------------------------------------------------------------
    // Identifiers and vocabularies
    // -----------------------------------------------------------------------

    /// Required UUID in the standard hyphenated form.
    pub fn uuid(&mut self, name: &str) -> Option<DbId> {
        self.read(name, true, |v| parse_uuid(name, v))
    }

    pub fn opt_uuid(&mut self, name: &str) -> Option<DbId> {
        self.read(name, false, |v| parse_uuid(name, v))
    }

    /// Required member of the vocabulary `E`.
    pub fn choice<E: Vocabulary>(&mut self, name: &str) -> Option<E> {
        self.read(name, true, |v| parse_choice::<E>(name, v))
    }

    pub fn opt_choice<E: Vocabulary>(&mut self, name: &str) -> Option<E> {
        self.read(name, false, |v| parse_choice::<E>(name, v))
    }

    // -----------------------------------------------------------------------
    // Numbers
    // -----------------------------------------------------------------------

    /// Required integer in `min..=max`.
    pub fn int(&mut self, name: &str, min: i64, max: i64) -> Option<i32> {
        self.read(name, true, |v| parse_int(name, v, min, max))
    }

    pub fn opt_int(&mut self, name: &str, min: i64, max: i64) -> Option<i32> {
        self.read(name, false, |v| parse_int(name, v, min, max))
    }

    /// Optional 64-bit integer in `min..=max` (pagination).
    pub fn opt_long(&mut self, name: &str, min: i64, max: i64) -> Option<i64> {
        self.read(name, false, |v| parse_long(name, v, min, max))
    }

    /// Required price: positive, at most 9999.99, at most two decimals.
    pub fn price(&mut self, name: &str) -> Option<Decimal> {
        self.read(name, true, |v| parse_amount(name, v, false))
    }

    pub fn opt_price(&mut self, name: &str) -> Option<Decimal> {
        self.read(name, false, |v| parse_amount(name, v, false))
    }

    /// Optional non-negative amount (price filters), same precision rules.
    pub fn opt_amount(&mut self, name: &str) -> Option<Decimal> {
        self.read(name, false, |v| parse_amount(name, v, true))
    }

    pub fn opt_bool(&mut self, name: &str) -> Option<bool> {
        self.read(name, false, |v| parse_bool(name, v))
    }

    // -----------------------------------------------------------------------
    // Time
    // -----------------------------------------------------------------------

    /// Required timestamp. RFC 3339 values keep their offset; naive values
    /// are read in the salon's local time.
    pub fn datetime(&mut self, name: &str) -> Option<Timestamp> {
        let ctx = *self.ctx;
        self.read(name, true, |v| parse_datetime(name, v, &ctx))
    }

    pub fn opt_datetime(&mut self, name: &str) -> Option<Timestamp> {
        let ctx = *self.ctx;
        self.read(name, false, |v| parse_datetime(name, v, &ctx))
    }

    // -----------------------------------------------------------------------
    // Nesting
    // -----------------------------------------------------------------------

    /// Required array of objects with `min..=max` entries, each read by
    /// `item`. Failures inside entries are reported as `name.<index>.<field>`.
    pub fn list<T>(
        &mut self,
        name: &str,
        min: usize,
        max: usize,
        mut item: impl FnMut(&mut Fields<'a>) -> Option<T>,
    ) -> Option<Vec<T>> {
        let path = self.path(name);
        let entries = match self.get(name) {
            None | Some(Value::Null) => {
                self.errors
                    .push(&path, codes::REQUIRED, format!("{name} is required"));
                return None;
            }
            Some(Value::Array(entries)) => entries,
            Some(_) => {
                self.errors
                    .push(&path, codes::INVALID_TYPE, format!("{name} must be an array"));
                return None;
            }
        };

        let mut complete = true;
        if entries.len() < min {
            self.errors.push(
                &path,
                codes::TOO_SHORT,
                format!("{name} must contain at least {min} item(s)"),
            );
            complete = false;
        }
        if entries.len() > max {
            self.errors.push(
                &path,
                codes::TOO_LONG,
                format!("{name} must contain at most {max} item(s)"),
            );
            complete = false;
        }

        let mut parsed = Vec::with_capacity(entries.len());
        for (index, entry) in entries.iter().enumerate() {
            let mut child = Fields {
                raw: entry.as_object(),
                ctx: self.ctx,
                prefix: format!("{path}.{index}"),
                errors: ValidationErrors::new(),
            };
            if !entry.is_object() {
                let entry_path = child.prefix.clone();
                child
                    .errors
                    .push(&entry_path, codes::INVALID_TYPE, "Expected an object");
            }
            let value = item(&mut child);
            self.errors.extend(child.errors);
            match value {
                Some(v) => parsed.push(v),
                None => complete = false,
            }
        }

        complete.then_some(parsed)
    }

    // -----------------------------------------------------------------------
    // Internals
    // -----------------------------------------------------------------------

    fn get(&self, name: &str) -> Option<&'a Value> {
        self.raw.and_then(|m| m.get(name))
    }

    fn path(&self, name: &str) -> String {
        if self.prefix.is_empty() {
            name.to_string()
        } else {
            format!("{}.{name}", self.prefix)
        }
    }

    fn read<T>(
        &mut self,
        name: &str,
        required: bool,
        parse: impl FnOnce(&Value) -> Result<T, Rejection>,
    ) -> Option<T> {
        let path = self.path(name);
        match self.get(name) {
            None | Some(Value::Null) => {
                if required {
                    self.errors
                        .push(&path, codes::REQUIRED, format!("{name} is required"));
                }
                None
            }
            Some(value) => match parse(value) {
                Ok(parsed) => Some(parsed),
                Err((code, message)) => {
                    self.errors.push(&path, code, message);
                    None
                }
            },
        }
    }
}

// ---------------------------------------------------------------------------
// Value parsers
// ---------------------------------------------------------------------------

fn expect_str<'v>(name: &str, value: &'v Value) -> Result<&'v str, Rejection> {
    value
        .as_str()
        .ok_or_else(|| (codes::INVALID_TYPE, format!("{name} must be a string")))
}

fn parse_text(name: &str, value: &Value, min: usize, max: usize) -> Result<String, Rejection> {
    let s = expect_str(name, value)?.trim();
    let len = s.chars().count();
    if len < min {
        return Err((
            codes::TOO_SHORT,
            format!("{name} must be at least {min} characters"),
        ));
    }
    if len > max {
        return Err((
            codes::TOO_LONG,
            format!("{name} must be at most {max} characters"),
        ));
    }
    Ok(s.to_string())
}

fn parse_email(name: &str, value: &Value) -> Result<String, Rejection> {
    let email = expect_str(name, value)?.trim().to_lowercase();
    if email.chars().count() > MAX_EMAIL_LEN {
        return Err((
            codes::TOO_LONG,
            format!("{name} must be at most {MAX_EMAIL_LEN} characters"),
        ));
    }
    if !email.validate_email() {
        return Err((
            codes::INVALID_EMAIL,
            format!("{name} must be a valid email address"),
        ));
    }
    Ok(email)
}

fn parse_password(name: &str, value: &Value) -> Result<String, Rejection> {
    let password = expect_str(name, value)?;
    let len = password.chars().count();
    if len < MIN_PASSWORD_LEN {
        return Err((
            codes::TOO_SHORT,
            format!("{name} must be at least {MIN_PASSWORD_LEN} characters"),
        ));
    }
    if len > MAX_PASSWORD_LEN {
        return Err((
            codes::TOO_LONG,
            format!("{name} must be at most {MAX_PASSWORD_LEN} characters"),
        ));
    }
    let has_lower = password.chars().any(|c| c.is_ascii_lowercase());
    let has_upper = password.chars().any(|c| c.is_ascii_uppercase());
    let has_digit = password.chars().any(|c| c.is_ascii_digit());
    if !(has_lower && has_upper && has_digit) {
        return Err((
            codes::INVALID_FORMAT,
            format!(
                "{name} must contain at least one lowercase letter, one uppercase letter, and one number"
            ),
        ));
    }
    Ok(password.to_string())
}

fn parse_url(name: &str, value: &Value) -> Result<String, Rejection> {
    let url = expect_str(name, value)?.trim().to_string();
    if url.chars().count() > MAX_URL_LEN {
        return Err((
            codes::TOO_LONG,
            format!("{name} must be at most {MAX_URL_LEN} characters"),
        ));
    }
    let http = url.starts_with("http://") || url.starts_with("https://");
    if !http || !url.validate_url() {
        return Err((codes::INVALID_URL, format!("{name} must be a valid URL")));
    }
    Ok(url)
}

fn parse_uuid(name: &str, value: &Value) -> Result<DbId, Rejection> {
    let s = expect_str(name, value)?.trim();
    // Only the canonical 8-4-4-4-12 hyphenated form is accepted.
    match Uuid::try_parse(s) {
        Ok(id) if s.len() == 36 => Ok(id),
        _ => Err((codes::INVALID_UUID, format!("{name} must be a valid UUID"))),
    }
}

fn parse_choice<E: Vocabulary>(name: &str, value: &Value) -> Result<E, Rejection> {
    let s = expect_str(name, value)?.trim();
    E::parse(s).ok_or_else(|| {
        (
            codes::INVALID_ENUM,
            format!("{name} must be one of: {}", E::members()),
        )
    })
}

fn parse_long(name: &str, value: &Value, min: i64, max: i64) -> Result<i64, Rejection> {
    let n = match value {
        Value::Number(n) => n.as_i64().ok_or_else(|| {
            (codes::INVALID_TYPE, format!("{name} must be an integer"))
        })?,
        Value::String(s) => s
            .trim()
            .parse::<i64>()
            .map_err(|_| (codes::INVALID_TYPE, format!("{name} must be an integer")))?,
        _ => return Err((codes::INVALID_TYPE, format!("{name} must be an integer"))),
    };
    if n < min {
        return Err((
            codes::TOO_SMALL,
            format!("{name} must be greater than or equal to {min}"),
        ));
    }
    if n > max {
        return Err((
            codes::TOO_BIG,
            format!("{name} must be less than or equal to {max}"),
        ));
    }
    Ok(n)
}

fn parse_int(name: &str, value: &Value, min: i64, max: i64) -> Result<i32, Rejection> {
    let min = min.max(i64::from(i32::MIN));
    let max = max.min(i64::from(i32::MAX));
    let n = parse_long(name, value, min, max)?;
    i32::try_from(n).map_err(|_| (codes::TOO_BIG, format!("{name} is out of range")))
}

/// Decimal places the literal actually needs: trailing fractional zeros
/// are free and an exponent shifts the point. `None` when the text is not
/// a plain or scientific decimal literal.
fn decimal_places(text: &str) -> Option<i64> {
    let unsigned = text.strip_prefix(['-', '+']).unwrap_or(text);
    let (mantissa, exponent) = match unsigned.split_once(['e', 'E']) {
        Some((m, e)) => (m, e.parse::<i64>().ok()?),
        None => (unsigned, 0),
    };
    let (whole, fraction) = mantissa.split_once('.').unwrap_or((mantissa, ""));
    if whole.is_empty() && fraction.is_empty() {
        return None;
    }
    if !whole.bytes().chain(fraction.bytes()).all(|b| b.is_ascii_digit()) {
        return None;
    }
    let significant = i64::try_from(fraction.trim_end_matches('0').len()).ok()?;
    Some(significant.saturating_sub(exponent))
}

fn parse_amount(name: &str, value: &Value, allow_zero: bool) -> Result<Decimal, Rejection> {
    let not_a_number = || (codes::INVALID_TYPE, format!("{name} must be a number"));
    // With `arbitrary_precision` a JSON number keeps its source text here.
    let text = match value {
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.trim().to_string(),
        _ => return Err(not_a_number()),
    };

    // Counted on the raw text: `Decimal` parsing rounds past 28 digits.
    let places = decimal_places(&text).ok_or_else(not_a_number)?;
    if places > 2 {
        return Err((
            codes::INVALID_DECIMAL,
            format!("{name} must have at most 2 decimal places"),
        ));
    }
    let amount = Decimal::from_str(&text)
        .or_else(|_| Decimal::from_scientific(&text))
        .map_err(|_| {
            (
                codes::TOO_BIG,
                format!("{name} must be less than or equal to {MAX_PRICE}"),
            )
        })?;

    if amount.is_sign_negative() || (!allow_zero && amount.is_zero()) {
        let message = if allow_zero {
            format!("{name} must not be negative")
        } else {
            format!("{name} must be positive")
        };
        return Err((codes::TOO_SMALL, message));
    }
    if amount > MAX_PRICE {
        return Err((
            codes::TOO_BIG,
            format!("{name} must be less than or equal to {MAX_PRICE}"),
        ));
    }
    Ok(amount.round_dp(2))
}

fn parse_bool(name: &str, value: &Value) -> Result<bool, Rejection> {
    match value {
        Value::Bool(b) => Ok(*b),
        Value::String(s) => match s.trim() {
            "true" | "1" => Ok(true),
            "false" | "0" => Ok(false),
            _ => Err((codes::INVALID_TYPE, format!("{name} must be a boolean"))),
        },
        _ => Err((codes::INVALID_TYPE, format!("{name} must be a boolean"))),
    }
}

fn parse_datetime(
    name: &str,
    value: &Value,
    ctx: &ValidationContext,
) -> Result<Timestamp, Rejection> {
    let invalid = || (codes::INVALID_DATE, format!("{name} must be a valid date-time"));
    let s = expect_str(name, value)?.trim();

    if let Ok(at) = DateTime::parse_from_rfc3339(s) {
        return Ok(at.with_timezone(&Utc));
    }

    let naive = NAIVE_DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(s, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
        .ok_or_else(invalid)?;

    ctx.utc_offset
        .from_local_datetime(&naive)
        .single()
        .map(|at| at.with_timezone(&Utc))
        .ok_or_else(invalid)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn ctx() -> ValidationContext {
        ValidationContext::new(
            Utc.with_ymd_and_hms(2025, 3, 1, 9, 0, 0).unwrap(),
            chrono::FixedOffset::east_opt(0).unwrap(),
        )
    }

    #[test]
    fn collects_every_failure_instead_of_stopping() {
        let raw = json!({ "name": "a", "email": "nope", "age": "x" });
        let ctx = ctx();
        let mut f = Fields::new(&raw, &ctx);
        assert!(f.text("name", 2, 10).is_none());
        assert!(f.email("email").is_none());
        assert!(f.int("age", 0, 10).is_none());
        assert!(f.uuid("id").is_none());
        let errors = f.finish::<()>(None).unwrap_err();
        assert_eq!(errors.len(), 4);
        let codes: Vec<_> = errors.errors().iter().map(|e| e.code).collect();
        assert_eq!(
            codes,
            vec![
                codes::TOO_SHORT,
                codes::INVALID_EMAIL,
                codes::INVALID_TYPE,
                codes::REQUIRED
            ]
        );
    }

    #[test]
    fn text_is_trimmed_before_length_check() {
        let raw = json!({ "name": "   Ada   " });
        let ctx = ctx();
        let mut f = Fields::new(&raw, &ctx);
        assert_eq!(f.text("name", 2, 3).as_deref(), Some("Ada"));
    }

    #[test]
    fn email_is_trimmed_and_lowercased() {
        let raw = json!({ "email": "  Jane.Doe@Example.COM " });
        let ctx = ctx();
        let mut f = Fields::new(&raw, &ctx);
        assert_eq!(f.email("email").as_deref(), Some("jane.doe@example.com"));
    }

    #[test]
    fn email_longer_than_limit_is_rejected() {
        let long = format!("{}@example.com", "a".repeat(250));
        let raw = json!({ "email": long });
        let ctx = ctx();
        let mut f = Fields::new(&raw, &ctx);
        assert!(f.email("email").is_none());
        assert_eq!(f.errors.errors()[0].code, codes::TOO_LONG);
    }

    #[test]
    fn password_requires_mixed_case_and_digit() {
        let ctx = ctx();
        for bad in ["short1A", "alllowercase1", "ALLUPPERCASE1", "NoDigitsHere"] {
            let raw = json!({ "password": bad });
            let mut f = Fields::new(&raw, &ctx);
            assert!(f.password("password").is_none(), "{bad} should be rejected");
        }
        let raw = json!({ "password": "Braids2025" });
        let mut f = Fields::new(&raw, &ctx);
        assert_eq!(f.password("password").as_deref(), Some("Braids2025"));
    }

    #[test]
    fn uuid_must_be_hyphenated() {
        let ctx = ctx();
        let raw = json!({ "id": "67e5504410b1426f9247bb680e5fe0c8" });
        let mut f = Fields::new(&raw, &ctx);
        assert!(f.uuid("id").is_none());
        assert_eq!(f.errors.errors()[0].code, codes::INVALID_UUID);

        let raw = json!({ "id": "67e55044-10b1-426f-9247-bb680e5fe0c8" });
        let mut f = Fields::new(&raw, &ctx);
        assert!(f.uuid("id").is_some());
    }

    #[test]
    fn prices_with_two_decimals_are_accepted() {
        let ctx = ctx();
        for ok in [json!(0.01), json!(10), json!(25.99), json!("15.50"), json!(9999.99), json!("10.500")] {
            let raw = json!({ "price": ok });
            let mut f = Fields::new(&raw, &ctx);
            assert!(f.price("price").is_some(), "{ok} should be accepted");
        }
    }

    #[test]
    fn prices_needing_a_third_decimal_are_rejected() {
        let ctx = ctx();
        for bad in [json!(10.999), json!("0.001"), json!(25.995)] {
            let raw = json!({ "price": bad });
            let mut f = Fields::new(&raw, &ctx);
            assert!(f.price("price").is_none(), "{bad} should be rejected");
            assert_eq!(f.errors.errors()[0].code, codes::INVALID_DECIMAL);
        }
    }

    #[test]
    fn long_price_strings_are_not_rounded_into_range() {
        let ctx = ctx();
        for bad in [
            "10.9999999999999999999999999999999",
            "0.0000000000000000000000000000001",
            "1.5e-3",
        ] {
            let raw = json!({ "price": bad });
            let mut f = Fields::new(&raw, &ctx);
            assert!(f.price("price").is_none(), "{bad} should be rejected");
            assert_eq!(f.errors.errors()[0].code, codes::INVALID_DECIMAL);
        }
    }

    #[test]
    fn json_number_prices_keep_their_source_digits() {
        let ctx = ctx();
        let raw: Value = serde_json::from_str(r#"{ "price": 10.0000000000000001 }"#).unwrap();
        let mut f = Fields::new(&raw, &ctx);
        assert!(f.price("price").is_none());
        assert_eq!(f.errors.errors()[0].code, codes::INVALID_DECIMAL);

        let raw: Value = serde_json::from_str(r#"{ "price": 12.50, "other": 1.2e1 }"#).unwrap();
        let mut f = Fields::new(&raw, &ctx);
        assert_eq!(f.price("price"), Some(Decimal::new(1250, 2)));
        assert_eq!(f.price("other"), Some(Decimal::new(1200, 2)));
    }

    #[test]
    fn prices_outside_range_are_rejected() {
        let ctx = ctx();
        for (bad, code) in [
            (json!(0), codes::TOO_SMALL),
            (json!(-5), codes::TOO_SMALL),
            (json!(10000), codes::TOO_BIG),
        ] {
            let raw = json!({ "price": bad });
            let mut f = Fields::new(&raw, &ctx);
            assert!(f.price("price").is_none());
            assert_eq!(f.errors.errors()[0].code, code);
        }
    }

    #[test]
    fn numbers_and_booleans_are_coerced_from_strings() {
        let raw = json!({ "page": "3", "active": "false" });
        let ctx = ctx();
        let mut f = Fields::new(&raw, &ctx);
        assert_eq!(f.opt_long("page", 1, 100), Some(3));
        assert_eq!(f.opt_bool("active"), Some(false));
    }

    #[test]
    fn fractional_integer_is_rejected() {
        let raw = json!({ "quantity": 2.5 });
        let ctx = ctx();
        let mut f = Fields::new(&raw, &ctx);
        assert!(f.int("quantity", 1, 100).is_none());
        assert_eq!(f.errors.errors()[0].code, codes::INVALID_TYPE);
    }

    #[test]
    fn naive_datetime_is_read_in_local_time() {
        let ctx = ValidationContext::new(
            Utc::now(),
            chrono::FixedOffset::west_opt(5 * 3600).unwrap(),
        );
        let raw = json!({ "at": "2025-03-10T10:00" });
        let mut f = Fields::new(&raw, &ctx);
        assert_eq!(
            f.datetime("at"),
            Some(Utc.with_ymd_and_hms(2025, 3, 10, 15, 0, 0).unwrap())
        );
    }

    #[test]
    fn nested_list_reports_indexed_paths() {
        let raw = json!({ "items": [{ "qty": 1 }, { "qty": 0 }, "junk"] });
        let ctx = ctx();
        let mut f = Fields::new(&raw, &ctx);
        let parsed = f.list("items", 1, 10, |item| item.int("qty", 1, 5));
        assert!(parsed.is_none());
        let fields: Vec<_> = f.errors.errors().iter().map(|e| e.field.as_str()).collect();
        assert!(fields.contains(&"items.1.qty"));
        assert!(fields.contains(&"items.2"));
    }

    #[test]
    fn require_any_flags_empty_update() {
        let raw = json!({ "unknown": 1 });
        let ctx = ctx();
        let mut f = Fields::new(&raw, &ctx);
        f.require_any(&["name", "description"]);
        let errors = f.finish::<()>(Some(())).unwrap_err();
        assert_eq!(errors.errors()[0].code, codes::EMPTY_UPDATE);
        assert_eq!(errors.errors()[0].field, ROOT_FIELD);
    }

    #[test]
    fn non_object_input_is_rejected() {
        let raw = json!([1, 2, 3]);
        let ctx = ctx();
        let f = Fields::new(&raw, &ctx);
        assert!(f.finish(Some(())).is_err());
    }
}
