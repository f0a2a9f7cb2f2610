//! PostgreSQL-backed `DynamicTableRepository` using `diesel::sql_query`.
//!
//! Table and column names are only known at request time, so statements are
//! assembled by [`super::dynamic_sql`] and values are bound as nullable
//! `TEXT` parameters on a boxed query.

use async_trait::async_trait;
use diesel::pg::Pg;
use diesel::sql_query;
use diesel::sql_types::{Nullable, Text};
use diesel_async::RunQueryDsl;
use tracing::debug;

use crate::domain::ports::{DynamicTableRepository, DynamicTableRepositoryError};
use crate::domain::{DatabaseTarget, Row, SqlIdentifier, TableSchema};

use super::connection::{ConnectionError, PgConnectionFactory};
use super::diesel_error_mapping::{map_connection_error, map_diesel_error};
use super::dynamic_sql::{create_table_sql, insert_row_sql};

/// Diesel-backed implementation of [`DynamicTableRepository`].
#[derive(Clone)]
pub struct DieselDynamicTableRepository {
    connections: PgConnectionFactory,
}

impl DieselDynamicTableRepository {
    /// Create a repository that opens connections through `connections`.
    pub fn new(connections: PgConnectionFactory) -> Self {
        Self { connections }
    }

    fn timeout_error(&self) -> DynamicTableRepositoryError {
        DynamicTableRepositoryError::timeout(self.connections.timeout().as_secs())
    }
}

fn map_connection(error: ConnectionError) -> DynamicTableRepositoryError {
    map_connection_error(
        error,
        DynamicTableRepositoryError::connection,
        DynamicTableRepositoryError::timeout,
    )
}

fn map_query(error: diesel::result::Error) -> DynamicTableRepositoryError {
    map_diesel_error(
        error,
        DynamicTableRepositoryError::query,
        DynamicTableRepositoryError::connection,
    )
}

#[async_trait]
impl DynamicTableRepository for DieselDynamicTableRepository {
    async fn ensure_table(
        &self,
        target: &DatabaseTarget,
        schema: &TableSchema,
    ) -> Result<(), DynamicTableRepositoryError> {
        let mut conn = self.connections.connect(target).await.map_err(map_connection)?;
        let statement = create_table_sql(schema);
        debug!(%target, table = %schema.table(), "ensuring dynamic table");

        tokio::time::timeout(
            self.connections.timeout(),
            sql_query(statement).execute(&mut conn),
        )
        .await
        .map_err(|_| self.timeout_error())?
        .map_err(map_query)?;
        Ok(())
    }

    async fn insert_rows(
        &self,
        target: &DatabaseTarget,
        table: &SqlIdentifier,
        rows: &[Row],
    ) -> Result<usize, DynamicTableRepositoryError> {
        use diesel_async::AsyncConnection as _;
        use diesel_async::scoped_futures::ScopedFutureExt as _;

        let mut conn = self.connections.connect(target).await.map_err(map_connection)?;

        // One transaction per batch; any failed row rolls back the rest.
        let transaction = conn.transaction(|conn| {
            async move {
                let mut inserted = 0;
                for row in rows {
                    let mut query = sql_query(insert_row_sql(table, row)).into_boxed::<Pg>();
                    for value in row.values() {
                        query = query.bind::<Nullable<Text>, _>(value.clone());
                    }
                    inserted += query.execute(conn).await?;
                }
                Ok::<_, diesel::result::Error>(inserted)
            }
            .scope_boxed()
        });

        tokio::time::timeout(self.connections.timeout(), transaction)
            .await
            .map_err(|_| self.timeout_error())?
            .map_err(map_query)
    }
}
