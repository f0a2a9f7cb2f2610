//! SQL identifier validation and quoting.
//!
//! Table and column names in this service come from request payloads and
//! stored connector configurations, so they are checked against an allow-list
//! before any statement is assembled. Accepted names start with an ASCII
//! letter or underscore, continue with ASCII letters, digits, or underscores,
//! and fit PostgreSQL's 63-byte identifier limit. Rendering always
//! double-quotes the name, preserving case.

use std::fmt;

use serde::Serialize;
use thiserror::Error;

/// Longest identifier PostgreSQL keeps without truncation.
pub const MAX_IDENTIFIER_LEN: usize = 63;

/// Name of the identity column every dynamic table carries.
pub const IDENTITY_COLUMN: &str = "id";

/// Validation failures for [`SqlIdentifier`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SqlIdentifierError {
    /// Identifier was empty.
    #[error("identifier must not be empty")]
    Empty,
    /// Identifier exceeds [`MAX_IDENTIFIER_LEN`] bytes.
    #[error("identifier `{name}` exceeds {MAX_IDENTIFIER_LEN} bytes")]
    TooLong {
        /// Offending identifier.
        name: String,
    },
    /// Identifier starts with a digit or other disallowed character.
    #[error("identifier `{name}` must start with a letter or underscore")]
    InvalidStart {
        /// Offending identifier.
        name: String,
    },
    /// Identifier contains a character outside the allow-list.
    #[error("identifier `{name}` contains disallowed character {ch:?}")]
    InvalidCharacter {
        /// Offending identifier.
        name: String,
        /// First disallowed character.
        ch: char,
    },
    /// Identifier collides with the identity column.
    #[error("column name `{name}` is reserved for the identity key")]
    Reserved {
        /// Offending identifier.
        name: String,
    },
}

/// A table or column name that passed the allow-list.
///
/// # Examples
/// ```
/// use sql_connector::domain::SqlIdentifier;
///
/// let name = SqlIdentifier::new("runtime_app_7").expect("valid identifier");
/// assert_eq!(name.quoted(), "\"runtime_app_7\"");
/// assert!(SqlIdentifier::new("bad\"name").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct SqlIdentifier(String);

impl SqlIdentifier {
    /// Validate `value` as a table or column name.
    pub fn new(value: impl Into<String>) -> Result<Self, SqlIdentifierError> {
        let name = value.into();
        let mut chars = name.chars();
        let Some(first) = chars.next() else {
            return Err(SqlIdentifierError::Empty);
        };
        if name.len() > MAX_IDENTIFIER_LEN {
            return Err(SqlIdentifierError::TooLong { name });
        }
        if !(first.is_ascii_alphabetic() || first == '_') {
            return Err(SqlIdentifierError::InvalidStart { name });
        }
        if let Some(ch) = chars.find(|ch| !(ch.is_ascii_alphanumeric() || *ch == '_')) {
            return Err(SqlIdentifierError::InvalidCharacter { name, ch });
        }
        Ok(Self(name))
    }

    /// Validate `value` as a data column name, rejecting the identity column.
    pub fn column(value: impl Into<String>) -> Result<Self, SqlIdentifierError> {
        let identifier = Self::new(value)?;
        if identifier.0 == IDENTITY_COLUMN {
            return Err(SqlIdentifierError::Reserved { name: identifier.0 });
        }
        Ok(identifier)
    }

    /// Borrow the raw name.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Render the name as a double-quoted SQL identifier.
    pub fn quoted(&self) -> String {
        format!("\"{}\"", self.0.replace('"', "\"\""))
    }
}

impl fmt::Display for SqlIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl AsRef<str> for SqlIdentifier {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}
