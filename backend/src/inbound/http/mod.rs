//! HTTP inbound adapter exposing REST endpoints.

pub mod connectors;
pub(crate) mod csv_records;
pub mod error;
pub mod extractors;
pub mod health;
pub mod root;
pub mod runtime;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod uploads;
pub(crate) mod validation;

pub use error::ApiResult;
