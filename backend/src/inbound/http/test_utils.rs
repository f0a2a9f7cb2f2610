//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_web::web;

use crate::domain::ports::{
    MockConnectorConfigCommand, MockRecordUploadCommand, MockRuntimeIngestionCommand,
};

use super::state::HttpState;

/// Mocked driving ports; unset mocks fail any call made on them.
#[derive(Default)]
pub struct TestPorts {
    /// Upload command mock.
    pub uploads: MockRecordUploadCommand,
    /// Connector save command mock.
    pub connectors: MockConnectorConfigCommand,
    /// Runtime ingestion command mock.
    pub runtime: MockRuntimeIngestionCommand,
}

impl TestPorts {
    /// Wrap the mocks as handler state.
    pub fn into_state(self) -> web::Data<HttpState> {
        web::Data::new(HttpState::new(
            Arc::new(self.uploads),
            Arc::new(self.connectors),
            Arc::new(self.runtime),
        ))
    }
}
