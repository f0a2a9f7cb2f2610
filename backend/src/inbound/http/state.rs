//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{ConnectorConfigCommand, RecordUploadCommand, RuntimeIngestionCommand};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// JSON and CSV uploads.
    pub uploads: Arc<dyn RecordUploadCommand>,
    /// Connector configuration saves.
    pub connectors: Arc<dyn ConnectorConfigCommand>,
    /// Runtime ingestion by app id.
    pub runtime: Arc<dyn RuntimeIngestionCommand>,
}

impl HttpState {
    /// Bundle the driving ports used by the handlers.
    pub fn new(
        uploads: Arc<dyn RecordUploadCommand>,
        connectors: Arc<dyn ConnectorConfigCommand>,
        runtime: Arc<dyn RuntimeIngestionCommand>,
    ) -> Self {
        Self {
            uploads,
            connectors,
            runtime,
        }
    }
}
