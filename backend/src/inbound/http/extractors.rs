//! Extractor configuration that reports rejected payloads as domain errors.
//!
//! Without these handlers Actix answers malformed JSON bodies and query
//! strings with a plain-text 400; with them clients always receive the JSON
//! error envelope and a `Trace-Id` header.

use actix_web::error::{JsonPayloadError, QueryPayloadError};
use actix_web::{HttpRequest, web};

use crate::domain::Error;

/// Largest accepted request body, JSON or CSV.
pub const MAX_BODY_BYTES: usize = 16 * 1024 * 1024;

fn json_error(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    Error::invalid_request(format!("Invalid JSON: {err}")).into()
}

fn query_error(err: QueryPayloadError, _req: &HttpRequest) -> actix_web::Error {
    Error::invalid_request(format!("Invalid query string: {err}")).into()
}

/// JSON body configuration used by every handler.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(MAX_BODY_BYTES)
        .error_handler(json_error)
}

/// Query string configuration used by every handler.
pub fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(query_error)
}

/// Raw body configuration for CSV uploads.
pub fn payload_config() -> web::PayloadConfig {
    web::PayloadConfig::new(MAX_BODY_BYTES)
}
