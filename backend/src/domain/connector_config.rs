//! Connector configurations: where a tenant's runtime records are written and
//! how their fields are renamed on the way.
//!
//! A configuration is persisted as an opaque JSON document. The document
//! written by [`ConnectorConfig::to_document`] has the shape
//!
//! ```json
//! {
//!   "host": "db.internal",
//!   "port": "5432",
//!   "schema": "sales",
//!   "table_name": "invoices",
//!   "app_id": 7,
//!   "mapping": { "invoice_no": "Invoice Number" }
//! }
//! ```
//!
//! Documents read back are parsed leniently into [`StoredConnectorConfig`]
//! because rows may have been written by other tools; completeness is checked
//! only when a runtime batch needs the configuration.

use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use thiserror::Error;

use super::identifier::{SqlIdentifier, SqlIdentifierError};
use super::records::Record;
use super::target::{DatabaseTarget, DatabaseTargetError, PortValue};

/// Tenant identifier embedded in a connector configuration.
///
/// # Examples
/// ```
/// use sql_connector::domain::AppId;
///
/// let app_id: AppId = "42".parse().expect("numeric app id");
/// assert_eq!(app_id.runtime_table_name(), "runtime_app_42");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct AppId(u64);

/// Error raised when an app id is not a non-negative integer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("app_id `{value}` must be a non-negative integer")]
pub struct InvalidAppId {
    /// Value as received.
    pub value: String,
}

impl AppId {
    /// Wrap a raw integer identifier.
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// Raw integer value.
    pub const fn get(self) -> u64 {
        self.0
    }

    /// Name of the table holding this tenant's runtime records.
    pub fn runtime_table_name(self) -> String {
        format!("runtime_app_{}", self.0)
    }

    /// Whether a stored document's `app_id` refers to this tenant.
    ///
    /// The stored value is compared in its textual form, so both `7` and
    /// `"7"` match `AppId::new(7)`. Any other JSON type never matches.
    pub fn matches_document(self, document: &Value) -> bool {
        let expected = self.0.to_string();
        match document.get("app_id") {
            Some(Value::Number(number)) => number.to_string() == expected,
            Some(Value::String(text)) => *text == expected,
            _ => false,
        }
    }
}

impl fmt::Display for AppId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for AppId {
    type Err = InvalidAppId;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse::<u64>().map(Self).map_err(|_| InvalidAppId {
            value: s.to_owned(),
        })
    }
}

impl<'de> Deserialize<'de> for AppId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Unsigned(u64),
            Signed(i64),
            Text(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Unsigned(number) => Ok(Self(number)),
            Raw::Signed(number) => Err(serde::de::Error::custom(InvalidAppId {
                value: number.to_string(),
            })),
            Raw::Text(text) => text.parse().map_err(serde::de::Error::custom),
        }
    }
}

/// Ordered association from target column name to source field name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldMapping(IndexMap<String, String>);

impl FieldMapping {
    /// Build a mapping from `(target, source)` pairs.
    pub fn from_pairs<I, T, S>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (T, S)>,
        T: Into<String>,
        S: Into<String>,
    {
        Self(
            pairs
                .into_iter()
                .map(|(target, source)| (target.into(), source.into()))
                .collect(),
        )
    }

    /// Whether the mapping has no pairs.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of pairs.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterate `(target, source)` pairs in order.
    pub fn pairs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0
            .iter()
            .map(|(target, source)| (target.as_str(), source.as_str()))
    }

    /// Target column names in order.
    pub fn targets(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Rename a record: each target takes the value of its source field, or
    /// `null` when the record lacks that field. Fields not named by the
    /// mapping are dropped.
    ///
    /// # Examples
    /// ```
    /// use serde_json::json;
    /// use sql_connector::domain::{FieldMapping, Record};
    ///
    /// let mapping = FieldMapping::from_pairs([("name", "full_name"), ("email", "mail")]);
    /// let record: Record = serde_json::from_value(json!({"full_name": "Alice"})).unwrap();
    /// let mapped = mapping.apply(&record);
    /// assert_eq!(serde_json::Value::Object(mapped), json!({"name": "Alice", "email": null}));
    /// ```
    pub fn apply(&self, record: &Record) -> Record {
        self.0
            .iter()
            .map(|(target, source)| {
                let value = record.get(source).cloned().unwrap_or(Value::Null);
                (target.clone(), value)
            })
            .collect()
    }

    /// Check every target against the column allow-list.
    pub fn validate_targets(&self) -> Result<(), SqlIdentifierError> {
        for target in self.targets() {
            SqlIdentifier::column(target)?;
        }
        Ok(())
    }
}

/// Validation errors raised while building a [`ConnectorConfig`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConnectorConfigError {
    /// Host, port, or schema were invalid.
    #[error(transparent)]
    Target(#[from] DatabaseTargetError),
    /// `table_name` was blank.
    #[error("table_name must not be empty")]
    EmptyTableName,
    /// Mapping had no pairs.
    #[error("mapping must contain at least one field")]
    EmptyMapping,
    /// A mapping target is not a usable column name.
    #[error("mapping target is not a valid column name: {0}")]
    MappingTarget(#[from] SqlIdentifierError),
}

/// A validated connector configuration ready to be saved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectorConfig {
    target: DatabaseTarget,
    table_name: String,
    app_id: AppId,
    mapping: FieldMapping,
}

impl ConnectorConfig {
    /// Validate the parts of a configuration.
    pub fn new(
        target: DatabaseTarget,
        table_name: impl Into<String>,
        app_id: AppId,
        mapping: FieldMapping,
    ) -> Result<Self, ConnectorConfigError> {
        let table_name = table_name.into();
        if table_name.trim().is_empty() {
            return Err(ConnectorConfigError::EmptyTableName);
        }
        if mapping.is_empty() {
            return Err(ConnectorConfigError::EmptyMapping);
        }
        mapping.validate_targets()?;
        Ok(Self {
            target,
            table_name,
            app_id,
            mapping,
        })
    }

    /// Database the configuration points at.
    pub fn target(&self) -> &DatabaseTarget {
        &self.target
    }

    /// Table name recorded with the configuration.
    pub fn table_name(&self) -> &str {
        self.table_name.as_str()
    }

    /// Tenant identifier.
    pub fn app_id(&self) -> AppId {
        self.app_id
    }

    /// Field mapping.
    pub fn mapping(&self) -> &FieldMapping {
        &self.mapping
    }

    /// JSON document persisted in the `connector.config` column.
    pub fn to_document(&self) -> Value {
        json!({
            "host": self.target.host(),
            "port": self.target.port().to_string(),
            "schema": self.target.schema(),
            "table_name": self.table_name,
            "app_id": self.app_id,
            "mapping": self.mapping,
        })
    }
}

/// Reasons a stored configuration cannot drive a runtime batch.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoredConfigError {
    /// One of host, port, schema, or mapping is absent or empty.
    #[error("Incomplete config: host, port, schema or mapping missing.")]
    Incomplete,
    /// Host, port, or schema are present but unusable.
    #[error("invalid stored connection settings: {0}")]
    InvalidTarget(#[from] DatabaseTargetError),
}

/// A configuration document as read back from storage.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct StoredConnectorConfig {
    /// Database host.
    #[serde(default)]
    pub host: Option<String>,
    /// Database port, textual or numeric.
    #[serde(default)]
    pub port: Option<PortValue>,
    /// Database name.
    #[serde(default)]
    pub schema: Option<String>,
    /// Table name recorded with the configuration.
    #[serde(default)]
    pub table_name: Option<String>,
    /// Tenant identifier as stored.
    #[serde(default)]
    pub app_id: Option<Value>,
    /// Field mapping.
    #[serde(default)]
    pub mapping: Option<FieldMapping>,
}

impl StoredConnectorConfig {
    /// Resolve the write target and mapping for a runtime batch.
    ///
    /// Missing or empty host, port, schema, or mapping yields
    /// [`StoredConfigError::Incomplete`].
    pub fn runtime_target(&self) -> Result<(DatabaseTarget, &FieldMapping), StoredConfigError> {
        let host = self
            .host
            .as_deref()
            .filter(|host| !host.is_empty())
            .ok_or(StoredConfigError::Incomplete)?;
        let port = self
            .port
            .as_ref()
            .filter(|port| !matches!(port, PortValue::Text(text) if text.is_empty()))
            .ok_or(StoredConfigError::Incomplete)?;
        let schema = self
            .schema
            .as_deref()
            .filter(|schema| !schema.is_empty())
            .ok_or(StoredConfigError::Incomplete)?;
        let mapping = self
            .mapping
            .as_ref()
            .filter(|mapping| !mapping.is_empty())
            .ok_or(StoredConfigError::Incomplete)?;

        let target = DatabaseTarget::from_parts(host, port, schema)?;
        Ok((target, mapping))
    }
}
