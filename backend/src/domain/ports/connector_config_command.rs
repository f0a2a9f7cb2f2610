//! Driving port for saving connector configurations.

use async_trait::async_trait;

use crate::domain::{ConnectorConfig, Error};

/// Saves connector configurations at the database they describe.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ConnectorConfigCommand: Send + Sync {
    /// Ensure the `connector` table exists at `config.target()` and append
    /// the configuration to it.
    ///
    /// # Errors
    ///
    /// Returns `InternalError` when the table cannot be created or the row
    /// cannot be inserted.
    async fn save(&self, config: ConnectorConfig) -> Result<(), Error>;
}
