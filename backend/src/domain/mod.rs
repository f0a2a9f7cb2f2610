//! Domain primitives, services, and ports.
//!
//! Purpose: hold the rules of the connector independently of HTTP and
//! PostgreSQL. Inbound adapters hand the domain validated values
//! ([`DatabaseTarget`], [`Record`], [`ConnectorConfig`]) and receive
//! transport-agnostic [`Error`]s back; outbound adapters implement the traits
//! in [`ports`].
//!
//! Public surface:
//! - Error / ErrorCode: API error payload and its stable code.
//! - SqlIdentifier: allow-listed table and column names.
//! - DatabaseTarget / PortValue: where a request writes.
//! - Record / Row / TableSchema: record batches and the tables they fill.
//! - AppId / FieldMapping / ConnectorConfig / StoredConnectorConfig:
//!   per-tenant runtime configuration.
//! - RecordUploadService / ConnectorConfigService / RuntimeIngestionService:
//!   implementations of the driving ports.

pub mod connector_config;
pub mod connector_config_service;
pub mod error;
pub mod identifier;
pub mod ports;
pub mod record_upload_service;
pub mod records;
pub mod runtime_ingestion_service;
mod table_writes;
pub mod target;
pub mod trace_id;

pub use self::connector_config::{
    AppId, ConnectorConfig, ConnectorConfigError, FieldMapping, InvalidAppId, StoredConfigError,
    StoredConnectorConfig,
};
pub use self::connector_config_service::ConnectorConfigService;
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::identifier::{IDENTITY_COLUMN, MAX_IDENTIFIER_LEN, SqlIdentifier, SqlIdentifierError};
pub use self::record_upload_service::{RecordUploadService, UPLOAD_TABLE};
pub use self::records::{Record, Row, TableSchema, TableSchemaError, cell_text, union_field_names};
pub use self::runtime_ingestion_service::RuntimeIngestionService;
pub use self::target::{DatabaseTarget, DatabaseTargetError, PortValue, parse_port};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
