//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driven ports ([`DatabaseProbe`], [`DynamicTableRepository`],
//! [`ConnectorConfigRepository`]) are implemented by the Diesel adapters in
//! `outbound::persistence`. Driving ports ([`RecordUploadCommand`],
//! [`ConnectorConfigCommand`], [`RuntimeIngestionCommand`]) are implemented by
//! domain services and called from HTTP handlers.

mod macros;
pub(crate) use macros::define_port_error;

mod connector_config_command;
mod connector_config_repository;
mod database_probe;
mod dynamic_table_repository;
mod record_upload_command;
mod runtime_ingestion_command;

pub use connector_config_command::ConnectorConfigCommand;
#[cfg(test)]
pub use connector_config_command::MockConnectorConfigCommand;
pub use connector_config_repository::{ConnectorConfigRepository, ConnectorConfigRepositoryError};
#[cfg(test)]
pub use connector_config_repository::MockConnectorConfigRepository;
pub use database_probe::{DatabaseProbe, DatabaseProbeError};
#[cfg(test)]
pub use database_probe::MockDatabaseProbe;
pub use dynamic_table_repository::{DynamicTableRepository, DynamicTableRepositoryError};
#[cfg(test)]
pub use dynamic_table_repository::MockDynamicTableRepository;
#[cfg(test)]
pub use record_upload_command::MockRecordUploadCommand;
pub use record_upload_command::{RecordUploadCommand, RecordUploadOutcome, RecordUploadRequest};
#[cfg(test)]
pub use runtime_ingestion_command::MockRuntimeIngestionCommand;
pub use runtime_ingestion_command::{
    RuntimeIngestionCommand, RuntimeIngestionOutcome, RuntimeIngestionRequest,
};
