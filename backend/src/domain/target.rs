//! Database location supplied per request or per connector configuration.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Validation errors raised while building a [`DatabaseTarget`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DatabaseTargetError {
    /// Host was blank.
    #[error("host must not be empty")]
    EmptyHost,
    /// Schema (database name) was blank.
    #[error("schema must not be empty")]
    EmptySchema,
    /// Port was not an integer in `1..=65535`.
    #[error("port `{value}` must be an integer between 1 and 65535")]
    InvalidPort {
        /// Port as received.
        value: String,
    },
}

/// Port as it appears in JSON payloads: the mapping front-end sends strings,
/// other clients send numbers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PortValue {
    /// Numeric JSON port.
    Number(u64),
    /// Textual JSON port such as `"5432"`.
    Text(String),
}

impl PortValue {
    /// Parse into a TCP port.
    pub fn to_port(&self) -> Result<u16, DatabaseTargetError> {
        match self {
            Self::Number(number) => u16::try_from(*number)
                .ok()
                .filter(|port| *port != 0)
                .ok_or_else(|| DatabaseTargetError::InvalidPort {
                    value: number.to_string(),
                }),
            Self::Text(text) => parse_port(text),
        }
    }
}

/// Parse a textual port, tolerating surrounding whitespace.
pub fn parse_port(value: &str) -> Result<u16, DatabaseTargetError> {
    value
        .trim()
        .parse::<u16>()
        .ok()
        .filter(|port| *port != 0)
        .ok_or_else(|| DatabaseTargetError::InvalidPort {
            value: value.to_owned(),
        })
}

/// Host, port, and database ("schema") that a single request writes to.
///
/// ## Invariants
/// - `host` and `schema` are trimmed and non-empty.
/// - `port` is non-zero.
///
/// # Examples
/// ```
/// use sql_connector::domain::DatabaseTarget;
///
/// let target = DatabaseTarget::new("localhost", 5432, "docunotes").expect("valid target");
/// assert_eq!(target.to_string(), "localhost:5432/docunotes");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DatabaseTarget {
    host: String,
    port: u16,
    schema: String,
}

impl DatabaseTarget {
    /// Validate and build a target.
    pub fn new(
        host: impl AsRef<str>,
        port: u16,
        schema: impl AsRef<str>,
    ) -> Result<Self, DatabaseTargetError> {
        let host = host.as_ref().trim();
        if host.is_empty() {
            return Err(DatabaseTargetError::EmptyHost);
        }
        let schema = schema.as_ref().trim();
        if schema.is_empty() {
            return Err(DatabaseTargetError::EmptySchema);
        }
        if port == 0 {
            return Err(DatabaseTargetError::InvalidPort {
                value: port.to_string(),
            });
        }
        Ok(Self {
            host: host.to_owned(),
            port,
            schema: schema.to_owned(),
        })
    }

    /// Build a target from a port in payload form.
    pub fn from_parts(
        host: impl AsRef<str>,
        port: &PortValue,
        schema: impl AsRef<str>,
    ) -> Result<Self, DatabaseTargetError> {
        Self::new(host, port.to_port()?, schema)
    }

    /// Database host name or address.
    pub fn host(&self) -> &str {
        self.host.as_str()
    }

    /// TCP port.
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Database name used as the connection's `dbname`.
    pub fn schema(&self) -> &str {
        self.schema.as_str()
    }
}

impl fmt::Display for DatabaseTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}/{}", self.host, self.port, self.schema)
    }
}
