//! Port for checking that a caller-supplied database is reachable.

use async_trait::async_trait;

use crate::domain::DatabaseTarget;

use super::define_port_error;

define_port_error! {
    /// Reasons a reachability probe failed.
    pub enum DatabaseProbeError {
        /// The server refused the connection or rejected the credentials.
        Connection { message: String } => "database probe failed: {message}",
        /// No answer arrived before the configured deadline.
        Timeout { seconds: u64 } => "database probe timed out after {seconds}s",
    }
}

/// Opens and immediately closes a connection to a target.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DatabaseProbe: Send + Sync {
    /// Succeed when a connection to `target` can be established with the
    /// service credentials.
    async fn probe(&self, target: &DatabaseTarget) -> Result<(), DatabaseProbeError>;
}
