//! Builders wiring outbound adapters into the HTTP state.

use std::sync::Arc;

use actix_web::web;

use crate::domain::{
    ConnectorConfigService, DatabaseTarget, RecordUploadService, RuntimeIngestionService,
};
use crate::inbound::http::state::HttpState;
use crate::outbound::persistence::{
    DieselConnectorConfigRepository, DieselDynamicTableRepository, PgConnectionFactory,
};

/// Build the handler state from a connection factory and the configuration
/// lookup location.
///
/// Every service shares the same factory, so they all use the same
/// credentials and timeout.
pub fn build_http_state(
    connections: &PgConnectionFactory,
    lookup: DatabaseTarget,
) -> web::Data<HttpState> {
    let probe = Arc::new(connections.clone());
    let tables = Arc::new(DieselDynamicTableRepository::new(connections.clone()));
    let configs = Arc::new(DieselConnectorConfigRepository::new(connections.clone()));

    let uploads = Arc::new(RecordUploadService::new(probe, Arc::clone(&tables)));
    let connectors = Arc::new(ConnectorConfigService::new(Arc::clone(&configs)));
    let runtime = Arc::new(RuntimeIngestionService::new(configs, tables, lookup));

    web::Data::new(HttpState::new(uploads, connectors, runtime))
}
