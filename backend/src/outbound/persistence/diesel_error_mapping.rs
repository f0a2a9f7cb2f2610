//! Shared error mapping for the Diesel adapters.
//!
//! Adapters report sanitised messages to the domain. Driver detail (SQLSTATE
//! kind and server message) is only emitted at `debug`.

use tracing::debug;

use super::connection::ConnectionError;

/// Map connection failures onto an adapter's connection or timeout variant.
pub fn map_connection_error<E, C, T>(error: ConnectionError, connection: C, timeout: T) -> E
where
    C: FnOnce(&'static str) -> E,
    T: FnOnce(u64) -> E,
{
    match error {
        ConnectionError::Timeout { seconds } => timeout(seconds),
        ConnectionError::Url { message } | ConnectionError::Connect { message } => {
            debug!(%message, "database connection failed");
            connection("database connection error")
        }
    }
}

/// Map Diesel errors onto an adapter's query or connection variant.
pub fn map_diesel_error<E, Q, C>(error: diesel::result::Error, query: Q, connection: C) -> E
where
    Q: FnOnce(&'static str) -> E,
    C: FnOnce(&'static str) -> E,
{
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(error = %error, "diesel operation failed"),
    }

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            connection("database connection error")
        }
        DieselError::QueryBuilderError(_) => query("database query error"),
        DieselError::DeserializationError(_) => query("unexpected column data"),
        _ => query("database error"),
    }
}
