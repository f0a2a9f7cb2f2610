//! Shared validation helpers for inbound HTTP adapters.
//!
//! Request DTOs declare every field as optional so that missing or malformed
//! values surface as `invalid_request` errors with a `details` object
//! (`field`, `code`, and optionally `value` or `index`) instead of the
//! framework's plain-text rejection.

use serde_json::{Value, json};

use crate::domain::{AppId, DatabaseTarget, DatabaseTargetError, Error, PortValue, Record};

/// Validation error codes for HTTP request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorCode {
    MissingField,
    InvalidType,
    InvalidValue,
}

impl ErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            ErrorCode::MissingField => "missing_field",
            ErrorCode::InvalidType => "invalid_type",
            ErrorCode::InvalidValue => "invalid_value",
        }
    }
}

/// Newtype wrapper for HTTP field names to provide type safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    fn as_str(&self) -> &'static str {
        self.0
    }
}

pub(crate) const HOST: FieldName = FieldName::new("host");
pub(crate) const PORT: FieldName = FieldName::new("port");
pub(crate) const SCHEMA: FieldName = FieldName::new("schema");
pub(crate) const DATA: FieldName = FieldName::new("data");
pub(crate) const APP_ID: FieldName = FieldName::new("app_id");

fn field_error(field: FieldName, code: ErrorCode, message: impl Into<String>) -> Error {
    Error::invalid_request(message).with_details(json!({
        "field": field.as_str(),
        "code": code.as_str(),
    }))
}

fn value_error(field: FieldName, value: &str, message: impl Into<String>) -> Error {
    Error::invalid_request(message).with_details(json!({
        "field": field.as_str(),
        "value": value,
        "code": ErrorCode::InvalidValue.as_str(),
    }))
}

pub(crate) fn missing_field_error(field: FieldName) -> Error {
    let name = field.as_str();
    field_error(
        field,
        ErrorCode::MissingField,
        format!("missing required field: {name}"),
    )
}

/// Require a field, reporting it by name when absent.
pub(crate) fn require<T>(value: Option<T>, field: FieldName) -> Result<T, Error> {
    value.ok_or_else(|| missing_field_error(field))
}

fn map_target_error(err: DatabaseTargetError) -> Error {
    let message = err.to_string();
    match err {
        DatabaseTargetError::EmptyHost => field_error(HOST, ErrorCode::InvalidValue, message),
        DatabaseTargetError::EmptySchema => field_error(SCHEMA, ErrorCode::InvalidValue, message),
        DatabaseTargetError::InvalidPort { value } => value_error(PORT, &value, message),
    }
}

/// Validate the `host`, `port`, and `schema` triple of a request.
pub(crate) fn parse_target(
    host: Option<String>,
    port: Option<PortValue>,
    schema: Option<String>,
) -> Result<DatabaseTarget, Error> {
    let host = require(host, HOST)?;
    let port = require(port, PORT)?;
    let schema = require(schema, SCHEMA)?;
    DatabaseTarget::from_parts(host, &port, schema).map_err(map_target_error)
}

/// Validate a `data` member as a list of JSON objects.
pub(crate) fn parse_records(data: Option<Value>) -> Result<Vec<Record>, Error> {
    let data = data.ok_or_else(|| {
        field_error(DATA, ErrorCode::MissingField, "Missing 'data' in body.")
    })?;
    let Value::Array(items) = data else {
        return Err(field_error(
            DATA,
            ErrorCode::InvalidType,
            "'data' must be a list.",
        ));
    };

    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| match item {
            Value::Object(record) => Ok(record),
            _ => Err(
                Error::invalid_request("'data' items must be JSON objects").with_details(json!({
                    "field": DATA.as_str(),
                    "index": index,
                    "code": ErrorCode::InvalidType.as_str(),
                })),
            ),
        })
        .collect()
}

fn app_id_from_text(raw: &str) -> Result<AppId, Error> {
    raw.parse()
        .map_err(|err: crate::domain::InvalidAppId| value_error(APP_ID, raw, err.to_string()))
}

/// Validate the `app_id` query parameter.
pub(crate) fn parse_app_id(value: Option<String>) -> Result<AppId, Error> {
    let raw = require(value, APP_ID)?;
    app_id_from_text(&raw)
}

/// Validate an `app_id` body member given as a number or numeric string.
pub(crate) fn parse_app_id_value(value: Option<Value>) -> Result<AppId, Error> {
    match require(value, APP_ID)? {
        Value::String(text) => app_id_from_text(&text),
        Value::Number(number) => app_id_from_text(&number.to_string()),
        other => Err(field_error(
            APP_ID,
            ErrorCode::InvalidType,
            format!("app_id must be an integer or a numeric string, got {other}"),
        )),
    }
}
