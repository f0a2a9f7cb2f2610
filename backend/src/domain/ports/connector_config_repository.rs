//! Port for the `connector` configuration table.
//!
//! The table lives in whichever database the caller points at:
//!
//! ```sql
//! CREATE TABLE IF NOT EXISTS connector (
//!     connector_id SERIAL PRIMARY KEY,
//!     connector_type TEXT DEFAULT 'output',
//!     config JSONB,
//!     created_time TIMESTAMPTZ DEFAULT NOW()
//! );
//! ```

use async_trait::async_trait;

use crate::domain::{AppId, ConnectorConfig, DatabaseTarget, StoredConnectorConfig};

use super::define_port_error;

define_port_error! {
    /// Errors raised by connector configuration adapters.
    pub enum ConnectorConfigRepositoryError {
        /// Connection to the configuration database failed.
        Connection { message: String } =>
            "connector repository connection failed: {message}",
        /// A statement failed.
        Query { message: String } =>
            "connector repository query failed: {message}",
        /// A stored document could not be read as a configuration.
        Decode { message: String } =>
            "connector configuration could not be decoded: {message}",
        /// The operation exceeded the configured deadline.
        Timeout { seconds: u64 } =>
            "connector repository timed out after {seconds}s",
    }
}

/// Persists and finds connector configurations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ConnectorConfigRepository: Send + Sync {
    /// Create the `connector` table at `target` if it does not exist.
    async fn ensure_table(
        &self,
        target: &DatabaseTarget,
    ) -> Result<(), ConnectorConfigRepositoryError>;

    /// Insert one row holding `config` as its JSON document.
    async fn save(
        &self,
        target: &DatabaseTarget,
        config: &ConnectorConfig,
    ) -> Result<(), ConnectorConfigRepositoryError>;

    /// Find the earliest-inserted configuration whose `app_id` matches.
    ///
    /// Rows are scanned in `connector_id` order and matched with
    /// [`AppId::matches_document`], so duplicates resolve to the first row.
    /// A database without the `connector` table yields `None`; lookups never
    /// create it.
    async fn find_by_app_id(
        &self,
        target: &DatabaseTarget,
        app_id: AppId,
    ) -> Result<Option<StoredConnectorConfig>, ConnectorConfigRepositoryError>;
}
