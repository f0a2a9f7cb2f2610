//! PostgreSQL-backed `ConnectorConfigRepository` implementation using Diesel.
//!
//! The `connector` table is created on demand with `CREATE TABLE IF NOT
//! EXISTS`; reads and writes go through the typed [`connector`] table.
//! Lookups never issue DDL: a database without the table has no
//! configurations.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::sql_query;
use diesel::sql_types::Bool;
use diesel_async::RunQueryDsl;
use serde_json::Value;
use tracing::debug;

use crate::domain::ports::{ConnectorConfigRepository, ConnectorConfigRepositoryError};
use crate::domain::{AppId, ConnectorConfig, DatabaseTarget, StoredConnectorConfig};

use super::connection::{ConnectionError, PgConnectionFactory};
use super::diesel_error_mapping::{map_connection_error, map_diesel_error};
use super::schema::connector;

const CREATE_CONNECTOR_TABLE_SQL: &str = "CREATE TABLE IF NOT EXISTS connector (\
     connector_id SERIAL PRIMARY KEY, \
     connector_type TEXT DEFAULT 'output', \
     config JSONB, \
     created_time TIMESTAMPTZ DEFAULT NOW())";

const CONNECTOR_TABLE_PRESENT_SQL: &str = "SELECT to_regclass('connector') IS NOT NULL AS present";

#[derive(QueryableByName)]
struct TablePresence {
    #[diesel(sql_type = Bool)]
    present: bool,
}

/// Diesel-backed implementation of [`ConnectorConfigRepository`].
#[derive(Clone)]
pub struct DieselConnectorConfigRepository {
    connections: PgConnectionFactory,
}

impl DieselConnectorConfigRepository {
    /// Create a repository that opens connections through `connections`.
    pub fn new(connections: PgConnectionFactory) -> Self {
        Self { connections }
    }

    fn timeout_error(&self) -> ConnectorConfigRepositoryError {
        ConnectorConfigRepositoryError::timeout(self.connections.timeout().as_secs())
    }
}

fn map_connection(error: ConnectionError) -> ConnectorConfigRepositoryError {
    map_connection_error(
        error,
        ConnectorConfigRepositoryError::connection,
        ConnectorConfigRepositoryError::timeout,
    )
}

fn map_query(error: diesel::result::Error) -> ConnectorConfigRepositoryError {
    map_diesel_error(
        error,
        ConnectorConfigRepositoryError::query,
        ConnectorConfigRepositoryError::connection,
    )
}

/// Pick the first document whose `app_id` matches and decode it.
fn first_match(
    documents: Vec<Option<Value>>,
    app_id: AppId,
) -> Result<Option<StoredConnectorConfig>, ConnectorConfigRepositoryError> {
    documents
        .into_iter()
        .flatten()
        .find(|document| app_id.matches_document(document))
        .map(|document| {
            serde_json::from_value(document)
                .map_err(|err| ConnectorConfigRepositoryError::decode(err.to_string()))
        })
        .transpose()
}

#[async_trait]
impl ConnectorConfigRepository for DieselConnectorConfigRepository {
    async fn ensure_table(
        &self,
        target: &DatabaseTarget,
    ) -> Result<(), ConnectorConfigRepositoryError> {
        let mut conn = self.connections.connect(target).await.map_err(map_connection)?;
        tokio::time::timeout(
            self.connections.timeout(),
            sql_query(CREATE_CONNECTOR_TABLE_SQL).execute(&mut conn),
        )
        .await
        .map_err(|_| self.timeout_error())?
        .map_err(map_query)?;
        Ok(())
    }

    async fn save(
        &self,
        target: &DatabaseTarget,
        config: &ConnectorConfig,
    ) -> Result<(), ConnectorConfigRepositoryError> {
        let mut conn = self.connections.connect(target).await.map_err(map_connection)?;
        let insert = diesel::insert_into(connector::table)
            .values(connector::config.eq(config.to_document()))
            .execute(&mut conn);

        tokio::time::timeout(self.connections.timeout(), insert)
            .await
            .map_err(|_| self.timeout_error())?
            .map_err(map_query)?;
        debug!(%target, app_id = %config.app_id(), "connector row inserted");
        Ok(())
    }

    async fn find_by_app_id(
        &self,
        target: &DatabaseTarget,
        app_id: AppId,
    ) -> Result<Option<StoredConnectorConfig>, ConnectorConfigRepositoryError> {
        let mut conn = self.connections.connect(target).await.map_err(map_connection)?;
        let load = async {
            let presence = sql_query(CONNECTOR_TABLE_PRESENT_SQL)
                .get_result::<TablePresence>(&mut conn)
                .await?;
            let documents = if presence.present {
                let rows = connector::table
                    .select(connector::config)
                    .order(connector::connector_id.asc())
                    .load::<Option<Value>>(&mut conn)
                    .await?;
                Some(rows)
            } else {
                None
            };
            Ok::<_, diesel::result::Error>(documents)
        };

        let documents = tokio::time::timeout(self.connections.timeout(), load)
            .await
            .map_err(|_| self.timeout_error())?
            .map_err(map_query)?;
        let Some(documents) = documents else {
            debug!(%target, %app_id, "connector table absent");
            return Ok(None);
        };
        first_match(documents, app_id)
    }
}

#[cfg(test)]
mod tests {
    //! Document matching without a database.
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    fn first_match_prefers_earliest_row() {
        let documents = vec![
            None,
            Some(json!({"app_id": "5", "host": "first"})),
            Some(json!({"app_id": 5, "host": "second"})),
        ];
        let found = first_match(documents, AppId::new(5))
            .expect("decodes")
            .expect("found");
        assert_eq!(found.host.as_deref(), Some("first"));
    }

    #[rstest]
    fn first_match_returns_none_without_match() {
        let documents = vec![Some(json!({"app_id": 6}))];
        assert_eq!(first_match(documents, AppId::new(5)), Ok(None));
    }

    #[rstest]
    fn first_match_reports_undecodable_documents() {
        let documents = vec![Some(json!({"app_id": 5, "host": 42}))];
        assert!(matches!(
            first_match(documents, AppId::new(5)),
            Err(ConnectorConfigRepositoryError::Decode { .. })
        ));
    }
}
