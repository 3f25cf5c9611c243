//! Response body decoding shared by the resource clients.
//!
//! The API is inconsistent about envelopes: lists arrive bare or wrapped in
//! `rows`/`data`, single records arrive bare or wrapped in `data`, and an
//! absent record is `null`, `{}` or `{"data": null}`. Everything else that
//! fails to decode is an [`ErrorCode::UnexpectedShape`] failure.
//!
//! [`ErrorCode::UnexpectedShape`]: crate::domain::ErrorCode::UnexpectedShape

use pagination::Paginator;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::domain::{Endpoint, Error};

fn shape_error(endpoint: Endpoint, detail: impl std::fmt::Display) -> Error {
    Error::unexpected_shape(format!("{endpoint}: {detail}"))
}

fn from_value<T: DeserializeOwned>(endpoint: Endpoint, value: Value) -> Result<T, Error> {
    serde_json::from_value(value).map_err(|error| shape_error(endpoint, error))
}

/// Unwrap a `{"data": ...}` envelope, leaving other bodies untouched.
pub(crate) fn unwrap_data(body: Value) -> Value {
    match body {
        Value::Object(mut fields) if fields.len() == 1 && fields.contains_key("data") => {
            fields.remove("data").unwrap_or(Value::Null)
        }
        other => other,
    }
}

/// Decode a list body: a bare array, `{"rows": [...]}` or `{"data": [...]}`.
pub(crate) fn list<T: DeserializeOwned>(endpoint: Endpoint, body: Value) -> Result<Vec<T>, Error> {
    let rows = match body {
        rows @ Value::Array(_) => rows,
        Value::Object(mut fields) => match fields.remove("rows").or_else(|| fields.remove("data"))
        {
            Some(Value::Null) => Value::Array(Vec::new()),
            Some(rows @ Value::Array(_)) => rows,
            Some(other) => return Err(shape_error(endpoint, format!("expected rows, got {other}"))),
            None => return Err(shape_error(endpoint, "list body has no rows")),
        },
        other => return Err(shape_error(endpoint, format!("expected a list, got {other}"))),
    };
    from_value(endpoint, rows)
}

/// Decode a single-record body; empty envelopes decode as `None`.
pub(crate) fn record<T: DeserializeOwned>(
    endpoint: Endpoint,
    body: Value,
) -> Result<Option<T>, Error> {
    match unwrap_data(body) {
        Value::Null => Ok(None),
        Value::Object(fields) if fields.is_empty() => Ok(None),
        value => from_value(endpoint, value).map(Some),
    }
}

/// Decode a body that must carry a record, such as a create response.
pub(crate) fn required_record<T: DeserializeOwned>(
    endpoint: Endpoint,
    body: Value,
) -> Result<T, Error> {
    record(endpoint, body)?.ok_or_else(|| shape_error(endpoint, "response carried no record"))
}

/// Decode and validate a page envelope.
pub(crate) fn page<T: DeserializeOwned>(
    endpoint: Endpoint,
    body: Value,
) -> Result<Paginator<T>, Error> {
    let page: Paginator<T> = from_value(endpoint, unwrap_data(body))?;
    page.validate().map_err(|error| shape_error(endpoint, error))?;
    Ok(page)
}

/// Encode a request payload.
pub(crate) fn body<T: Serialize + ?Sized>(endpoint: Endpoint, payload: &T) -> Result<Value, Error> {
    serde_json::to_value(payload)
        .map_err(|error| Error::internal(format!("{endpoint}: failed to encode request: {error}")))
}
