//! Driving port for tenant runtime ingestion.

use async_trait::async_trait;

use crate::domain::{AppId, Error, Record};

/// A runtime batch for one tenant.
#[derive(Debug, Clone, PartialEq)]
pub struct RuntimeIngestionRequest {
    /// Tenant whose configuration drives the write.
    pub app_id: AppId,
    /// Records before field mapping.
    pub records: Vec<Record>,
}

/// Result of a successful runtime batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeIngestionOutcome {
    /// Table the mapped records were written to.
    pub table: String,
    /// Rows inserted.
    pub rows: usize,
}

/// Maps and stores runtime records using the tenant's saved configuration.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RuntimeIngestionCommand: Send + Sync {
    /// Look up the configuration for `request.app_id`, rename fields, and
    /// write the batch to `runtime_app_{app_id}` at the tenant's database.
    ///
    /// # Errors
    ///
    /// - `NotFound` when no configuration matches the app id. Checked before
    ///   the batch contents.
    /// - `InvalidRequest` for an incomplete configuration or a batch with no
    ///   fields to store.
    /// - `InternalError` for storage failures.
    async fn ingest(
        &self,
        request: RuntimeIngestionRequest,
    ) -> Result<RuntimeIngestionOutcome, Error>;
}
