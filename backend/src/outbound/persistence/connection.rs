//! Per-request PostgreSQL connections.
//!
//! Every request names its own host, port, and database, so connections are
//! opened on demand against that target and dropped when the caller is done
//! with them. There is no pool. Credentials are shared service-wide and never
//! appear in logs or error messages.
//!
//! # Example
//!
//! ```ignore
//! let factory = PgConnectionFactory::new(credentials, Duration::from_secs(30));
//! let mut conn = factory.connect(&target).await?;
//! ```

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use diesel_async::{AsyncConnection, AsyncPgConnection};
use tracing::{debug, info, warn};
use url::Url;
use zeroize::Zeroizing;

use crate::domain::DatabaseTarget;
use crate::domain::ports::{DatabaseProbe, DatabaseProbeError};

/// Username and password used for every outbound connection.
#[derive(Clone)]
pub struct DatabaseCredentials {
    user: String,
    password: Zeroizing<String>,
}

impl DatabaseCredentials {
    /// Wrap a username and password.
    pub fn new(user: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            user: user.into(),
            password: Zeroizing::new(password.into()),
        }
    }

    /// Database role name.
    pub fn user(&self) -> &str {
        self.user.as_str()
    }

    fn password(&self) -> &str {
        self.password.as_str()
    }
}

impl fmt::Debug for DatabaseCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatabaseCredentials")
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Errors raised while opening a connection.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConnectionError {
    /// The target could not be expressed as a connection URL.
    #[error("invalid connection target: {message}")]
    Url {
        /// Why the URL could not be built.
        message: String,
    },

    /// The server refused the connection or rejected the credentials.
    #[error("failed to connect: {message}")]
    Connect {
        /// Driver message, free of credentials.
        message: String,
    },

    /// The server did not answer before the deadline.
    #[error("connection timed out after {seconds}s")]
    Timeout {
        /// Deadline that elapsed.
        seconds: u64,
    },
}

impl ConnectionError {
    /// Create a URL error with the given message.
    pub fn url(message: impl Into<String>) -> Self {
        Self::Url {
            message: message.into(),
        }
    }

    /// Create a connect error with the given message.
    pub fn connect(message: impl Into<String>) -> Self {
        Self::Connect {
            message: message.into(),
        }
    }
}

/// Opens [`AsyncPgConnection`]s to caller-supplied targets.
#[derive(Clone)]
pub struct PgConnectionFactory {
    credentials: Arc<DatabaseCredentials>,
    timeout: Duration,
}

impl PgConnectionFactory {
    /// Create a factory using `credentials`, bounding connects and statements
    /// by `timeout`.
    pub fn new(credentials: DatabaseCredentials, timeout: Duration) -> Self {
        Self {
            credentials: Arc::new(credentials),
            timeout,
        }
    }

    /// Deadline applied to connection attempts and each database operation.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Build the `postgres://` URL for `target`, percent-encoding every part.
    fn database_url(&self, target: &DatabaseTarget) -> Result<Zeroizing<String>, ConnectionError> {
        let mut url = Url::parse("postgres://localhost")
            .map_err(|err| ConnectionError::url(err.to_string()))?;
        url.set_host(Some(target.host()))
            .map_err(|err| ConnectionError::url(format!("host `{}`: {err}", target.host())))?;
        url.set_port(Some(target.port()))
            .map_err(|()| ConnectionError::url("port rejected"))?;
        url.set_username(self.credentials.user())
            .map_err(|()| ConnectionError::url("username rejected"))?;
        url.set_password(Some(self.credentials.password()))
            .map_err(|()| ConnectionError::url("password rejected"))?;
        url.path_segments_mut()
            .map_err(|()| ConnectionError::url("database name rejected"))?
            .clear()
            .push(target.schema());
        Ok(Zeroizing::new(String::from(url)))
    }

    /// Open a connection to `target`.
    ///
    /// # Errors
    ///
    /// Returns [`ConnectionError::Timeout`] when the attempt exceeds
    /// [`Self::timeout`], or [`ConnectionError::Connect`] with the driver's
    /// message when the server refuses.
    pub async fn connect(&self, target: &DatabaseTarget) -> Result<AsyncPgConnection, ConnectionError> {
        info!(
            host = target.host(),
            port = target.port(),
            schema = target.schema(),
            "opening database connection"
        );
        let url = self.database_url(target)?;
        match tokio::time::timeout(self.timeout, AsyncPgConnection::establish(url.as_str())).await {
            Ok(Ok(conn)) => Ok(conn),
            Ok(Err(err)) => {
                debug!(%target, error = %err, "database connection refused");
                Err(ConnectionError::connect(err.to_string()))
            }
            Err(_) => Err(ConnectionError::Timeout {
                seconds: self.timeout.as_secs(),
            }),
        }
    }
}

#[async_trait]
impl DatabaseProbe for PgConnectionFactory {
    async fn probe(&self, target: &DatabaseTarget) -> Result<(), DatabaseProbeError> {
        match self.connect(target).await {
            Ok(conn) => {
                drop(conn);
                Ok(())
            }
            Err(err) => {
                warn!(%target, error = %err, "database probe failed");
                Err(match err {
                    ConnectionError::Timeout { seconds } => DatabaseProbeError::timeout(seconds),
                    ConnectionError::Url { message } | ConnectionError::Connect { message } => {
                        DatabaseProbeError::connection(message)
                    }
                })
            }
        }
    }
}
