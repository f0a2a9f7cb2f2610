//! Startup settings loaded via OrthoConfig.
//!
//! Two groups are read once when the process starts:
//!
//! - [`ServerSettings`] (`CONNECTOR_*`): listener, CORS origin, the fixed
//!   location of the connector configuration table used by runtime ingestion,
//!   and the per-operation database timeout.
//! - [`DatabaseCredentialsSettings`] (`DB_*`): the role every outbound
//!   connection authenticates as.
//!
//! Unset values fall back to the defaults exposed by each accessor, or to
//! the `#[ortho_config(default = ...)]` value on the field.

use std::fmt;
use std::net::SocketAddr;
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use thiserror::Error;

use crate::domain::{DatabaseTarget, DatabaseTargetError};
use crate::outbound::persistence::DatabaseCredentials;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8000";
const DEFAULT_CORS_ORIGIN: &str = "http://localhost:3000";
const DEFAULT_LOOKUP_HOST: &str = "localhost";
const DEFAULT_LOOKUP_PORT: u16 = 5432;
const DEFAULT_LOOKUP_SCHEMA: &str = "docunotes";
const DEFAULT_DB_TIMEOUT_SECS: u64 = 30;

/// Errors raised while turning loaded settings into runtime values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SettingsError {
    /// `bind_addr` is not a socket address.
    #[error("invalid bind address `{value}`")]
    BindAddr {
        /// Address as configured.
        value: String,
    },
    /// The configuration lookup location is unusable.
    #[error("invalid lookup location: {0}")]
    Lookup(#[from] DatabaseTargetError),
    /// `DB_USER` is unset or blank.
    #[error("DB_USER must be set")]
    MissingUser,
}

/// HTTP listener and database behaviour settings.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "CONNECTOR")]
pub struct ServerSettings {
    /// Socket address the HTTP server binds to.
    pub bind_addr: Option<String>,
    /// Origin allowed to call the API from a browser.
    pub cors_origin: Option<String>,
    /// Host of the database holding the connector configuration table.
    pub lookup_host: Option<String>,
    /// Port of the database holding the connector configuration table.
    pub lookup_port: Option<u16>,
    /// Name of the database holding the connector configuration table.
    pub lookup_schema: Option<String>,
    /// Deadline in seconds for each connect and statement.
    #[ortho_config(default = DEFAULT_DB_TIMEOUT_SECS)]
    pub db_timeout_secs: u64,
}

impl ServerSettings {
    /// Return the configured bind address, falling back to `0.0.0.0:8000`.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::BindAddr`] when the value does not parse.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let raw = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        raw.parse().map_err(|_| SettingsError::BindAddr {
            value: raw.to_owned(),
        })
    }

    /// Return the allowed CORS origin.
    pub fn cors_origin(&self) -> &str {
        self.cors_origin.as_deref().unwrap_or(DEFAULT_CORS_ORIGIN)
    }

    /// Return where runtime ingestion looks up connector configurations.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::Lookup`] for a blank host or database name.
    pub fn lookup_target(&self) -> Result<DatabaseTarget, SettingsError> {
        let target = DatabaseTarget::new(
            self.lookup_host.as_deref().unwrap_or(DEFAULT_LOOKUP_HOST),
            self.lookup_port.unwrap_or(DEFAULT_LOOKUP_PORT),
            self.lookup_schema
                .as_deref()
                .unwrap_or(DEFAULT_LOOKUP_SCHEMA),
        )?;
        Ok(target)
    }

    /// Return the per-operation database deadline.
    pub fn db_timeout(&self) -> Duration {
        Duration::from_secs(self.db_timeout_secs)
    }
}

/// Credentials shared by every outbound database connection.
#[derive(Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "DB")]
pub struct DatabaseCredentialsSettings {
    /// Database role name.
    pub user: Option<String>,
    /// Database role password; empty when unset.
    #[ortho_config(default = String::new())]
    pub password: String,
}

impl fmt::Debug for DatabaseCredentialsSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatabaseCredentialsSettings")
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .finish()
    }
}

impl DatabaseCredentialsSettings {
    /// Convert into connection credentials.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::MissingUser`] when no user is configured.
    pub fn into_credentials(self) -> Result<DatabaseCredentials, SettingsError> {
        let user = self
            .user
            .filter(|user| !user.trim().is_empty())
            .ok_or(SettingsError::MissingUser)?;
        Ok(DatabaseCredentials::new(user, self.password))
    }
}
