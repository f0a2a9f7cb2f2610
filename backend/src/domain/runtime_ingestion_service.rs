//! Runtime ingestion: resolve a tenant's saved configuration, rename record
//! fields through its mapping, and write the batch to the tenant database.
//!
//! Configurations are looked up at a single service-wide location (the
//! `lookup` target) rather than at the database each configuration was saved
//! to. Deployments that save configurations elsewhere must point the lookup
//! location at the same database.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{error, info};

use crate::domain::ports::{
    ConnectorConfigRepository, ConnectorConfigRepositoryError, DynamicTableRepository,
    RuntimeIngestionCommand, RuntimeIngestionOutcome, RuntimeIngestionRequest,
};
use crate::domain::table_writes::store_batch;
use crate::domain::{AppId, DatabaseTarget, Error, Record, StoredConfigError};

/// Implements [`RuntimeIngestionCommand`].
#[derive(Clone)]
pub struct RuntimeIngestionService<C, T> {
    configs: Arc<C>,
    tables: Arc<T>,
    lookup: DatabaseTarget,
}

impl<C, T> RuntimeIngestionService<C, T> {
    /// Create a service that reads configurations from `lookup`.
    pub fn new(configs: Arc<C>, tables: Arc<T>, lookup: DatabaseTarget) -> Self {
        Self {
            configs,
            tables,
            lookup,
        }
    }
}

impl<C, T> RuntimeIngestionService<C, T>
where
    C: ConnectorConfigRepository,
    T: DynamicTableRepository,
{
    fn map_lookup_error(&self, app_id: AppId, err: ConnectorConfigRepositoryError) -> Error {
        error!(
            lookup = %self.lookup,
            %app_id,
            error = %err,
            "connector configuration lookup failed"
        );
        Error::internal(err.to_string())
    }

    fn map_config_error(app_id: AppId, err: StoredConfigError) -> Error {
        match err {
            StoredConfigError::Incomplete => Error::invalid_request(err.to_string()),
            StoredConfigError::InvalidTarget(inner) => Error::invalid_request(format!(
                "Invalid stored config for app_id {app_id}: {inner}"
            )),
        }
    }
}

#[async_trait]
impl<C, T> RuntimeIngestionCommand for RuntimeIngestionService<C, T>
where
    C: ConnectorConfigRepository,
    T: DynamicTableRepository,
{
    async fn ingest(
        &self,
        request: RuntimeIngestionRequest,
    ) -> Result<RuntimeIngestionOutcome, Error> {
        let RuntimeIngestionRequest { app_id, records } = request;
        let stored = self
            .configs
            .find_by_app_id(&self.lookup, app_id)
            .await
            .map_err(|err| self.map_lookup_error(app_id, err))?
            .ok_or_else(|| Error::not_found(format!("No config found for app_id {app_id}")))?;

        let (target, mapping) = stored
            .runtime_target()
            .map_err(|err| Self::map_config_error(app_id, err))?;
        let mapped: Vec<Record> = records.iter().map(|record| mapping.apply(record)).collect();

        let table = app_id.runtime_table_name();
        let batch = store_batch(self.tables.as_ref(), &target, &table, &mapped).await?;
        info!(%app_id, %target, table = %table, rows = batch.rows, "runtime batch ingested");

        Ok(RuntimeIngestionOutcome {
            table,
            rows: batch.rows,
        })
    }
}
