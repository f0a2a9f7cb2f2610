//! Service saving connector configurations.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{error, info};

use crate::domain::ports::{
    ConnectorConfigCommand, ConnectorConfigRepository, ConnectorConfigRepositoryError,
};
use crate::domain::{ConnectorConfig, Error};

/// Implements [`ConnectorConfigCommand`] against a configuration repository.
#[derive(Clone)]
pub struct ConnectorConfigService<R> {
    repo: Arc<R>,
}

impl<R> ConnectorConfigService<R> {
    /// Create a service from its repository.
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }
}

fn map_save_error(config: &ConnectorConfig, err: ConnectorConfigRepositoryError) -> Error {
    error!(
        target_db = %config.target(),
        app_id = %config.app_id(),
        error = %err,
        "failed to save connector configuration"
    );
    Error::internal("Failed to insert connector config")
}

#[async_trait]
impl<R> ConnectorConfigCommand for ConnectorConfigService<R>
where
    R: ConnectorConfigRepository,
{
    async fn save(&self, config: ConnectorConfig) -> Result<(), Error> {
        self.repo
            .ensure_table(config.target())
            .await
            .map_err(|err| map_save_error(&config, err))?;
        self.repo
            .save(config.target(), &config)
            .await
            .map_err(|err| map_save_error(&config, err))?;

        info!(
            target_db = %config.target(),
            app_id = %config.app_id(),
            "saved connector configuration"
        );
        Ok(())
    }
}
