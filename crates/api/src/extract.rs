//! Validating extractors.
//!
//! Each extractor reads the raw request location (body, path params or
//! query string) as JSON, runs a [`Schema`] over it and hands the handler the
//! typed, normalized value. Failures short-circuit with the uniform
//! validation envelope via [`AppError`].
//!
//! - [`ValidJson`]: body only.
//! - [`ValidPath`]: path params only.
//! - [`ValidQuery`]: query string only.
//! - [`Validated`]: all three in one pass, with failures from every location
//!   reported together under `params.`, `query.` and `body.` prefixes.
//!
//! Path params and query values arrive as strings; the schema readers coerce
//! them.

use std::collections::HashMap;

use axum::body::Bytes;
use axum::extract::{FromRequest, FromRequestParts, Path, Query, Request};
use axum::http::request::Parts;
use salon_core::error::CoreError;
use salon_core::validation::{codes, Schema, ValidationErrors};
use serde_json::{Map, Value};

use crate::error::AppError;
use crate::state::AppState;

/// Field path reported for a body that is not valid JSON.
const BODY_FIELD: &str = "body";

/// A request body validated against `T`.
#[derive(Debug, Clone)]
pub struct ValidJson<T>(pub T);

/// Path params validated against `T`.
#[derive(Debug, Clone)]
pub struct ValidPath<T>(pub T);

/// A query string validated against `T`.
#[derive(Debug, Clone)]
pub struct ValidQuery<T>(pub T);

/// Params, query and body validated together.
///
/// Use `()` for any location the route does not read.
#[derive(Debug, Clone)]
pub struct Validated<P, Q, B> {
    pub params: P,
    pub query: Q,
    pub body: B,
}

// ---------------------------------------------------------------------------
// Raw readers
// ---------------------------------------------------------------------------

fn strings_to_object(values: HashMap<String, String>) -> Value {
    Value::Object(
        values
            .into_iter()
            .map(|(k, v)| (k, Value::String(v)))
            .collect::<Map<String, Value>>(),
    )
}

async fn raw_path(parts: &mut Parts, state: &AppState) -> Result<Value, AppError> {
    let Path(values) = Path::<HashMap<String, String>>::from_request_parts(parts, state)
        .await
        .map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;
    Ok(strings_to_object(values))
}

fn raw_query(parts: &Parts) -> Result<Value, AppError> {
    let Query(values) = Query::<HashMap<String, String>>::try_from_uri(&parts.uri)
        .map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;
    Ok(strings_to_object(values))
}

async fn raw_body(req: Request, state: &AppState) -> Result<Bytes, AppError> {
    Bytes::from_request(req, state)
        .await
        .map_err(|rejection| AppError::BadRequest(rejection.body_text()))
}

/// Decode a JSON body. An empty body reads as `null`, which schemas treat as
/// an object with no fields.
fn decode_json(bytes: &[u8]) -> Result<Value, ValidationErrors> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Null);
    }
    serde_json::from_slice(bytes).map_err(|e| {
        ValidationErrors::single(
            BODY_FIELD,
            codes::INVALID_TYPE,
            format!("Malformed JSON body: {e}"),
        )
    })
}

fn rejected(errors: ValidationErrors) -> AppError {
    AppError::Core(CoreError::Validation(errors))
}

// ---------------------------------------------------------------------------
// Single-location extractors
// ---------------------------------------------------------------------------

impl<T: Schema> FromRequest<AppState> for ValidJson<T> {
    type Rejection = AppError;

    async fn from_request(req: Request, state: &AppState) -> Result<Self, Self::Rejection> {
        let bytes = raw_body(req, state).await?;
        let raw = decode_json(&bytes).map_err(rejected)?;
        let value = T::parse(&raw, &state.validation_context()).map_err(rejected)?;
        Ok(ValidJson(value))
    }
}

impl<T: Schema> FromRequestParts<AppState> for ValidPath<T> {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let raw = raw_path(parts, state).await?;
        let value = T::parse(&raw, &state.validation_context()).map_err(rejected)?;
        Ok(ValidPath(value))
    }
}

impl<T: Schema> FromRequestParts<AppState> for ValidQuery<T> {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let raw = raw_query(parts)?;
        let value = T::parse(&raw, &state.validation_context()).map_err(rejected)?;
        Ok(ValidQuery(value))
    }
}

// ---------------------------------------------------------------------------
// Combined extractor
// ---------------------------------------------------------------------------

impl<P, Q, B> FromRequest<AppState> for Validated<P, Q, B>
where
    P: Schema + Send,
    Q: Schema + Send,
    B: Schema + Send,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &AppState) -> Result<Self, Self::Rejection> {
        let ctx = state.validation_context();
        let (mut parts, body) = req.into_parts();

        let raw_params = raw_path(&mut parts, state).await?;
        let raw_query = raw_query(&parts)?;
        let bytes = raw_body(Request::from_parts(parts, body), state).await?;

        let mut errors = ValidationErrors::new();

        let params = P::parse(&raw_params, &ctx)
            .map_err(|e| errors.extend_prefixed("params", e))
            .ok();
        let query = Q::parse(&raw_query, &ctx)
            .map_err(|e| errors.extend_prefixed("query", e))
            .ok();
        let body = match decode_json(&bytes) {
            Ok(raw_body) => B::parse(&raw_body, &ctx)
                .map_err(|e| errors.extend_prefixed("body", e))
                .ok(),
            Err(e) => {
                errors.extend(e);
                None
            }
        };

        match (params, query, body) {
            (Some(params), Some(query), Some(body)) if errors.is_empty() => Ok(Validated {
                params,
                query,
                body,
            }),
            _ => Err(rejected(errors)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_body_reads_as_null() {
        assert_eq!(decode_json(b"").unwrap(), Value::Null);
        assert_eq!(decode_json(b"  \n").unwrap(), Value::Null);
    }

    #[test]
    fn malformed_body_is_one_failure() {
        let errors = decode_json(b"{\"name\": ").unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.errors()[0].field, "body");
        assert_eq!(errors.errors()[0].code, codes::INVALID_TYPE);
    }

    #[test]
    fn path_values_become_string_fields() {
        let mut values = HashMap::new();
        values.insert("id".to_string(), "abc".to_string());
        assert_eq!(strings_to_object(values), serde_json::json!({ "id": "abc" }));
    }
}
