//! Shared steps for writing a record batch into a dynamic table.

use serde_json::json;
use tracing::{error, info};

use crate::domain::ports::{DynamicTableRepository, DynamicTableRepositoryError};
use crate::domain::{
    DatabaseTarget, Error, Record, Row, SqlIdentifierError, TableSchema, TableSchemaError,
    union_field_names,
};

/// What a batch write produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct StoredBatch {
    /// Union of field names used as the table's columns.
    pub headers: Vec<String>,
    /// Rows inserted.
    pub rows: usize,
}

/// Ensure `table` exists with the union of the batch's fields, then insert
/// every record in one transaction.
pub(crate) async fn store_batch<R>(
    tables: &R,
    target: &DatabaseTarget,
    table: &str,
    records: &[Record],
) -> Result<StoredBatch, Error>
where
    R: DynamicTableRepository + ?Sized,
{
    let headers = union_field_names(records);
    let schema = TableSchema::new(table, headers.iter().cloned()).map_err(map_schema_error)?;
    let rows = records
        .iter()
        .map(Row::from_record)
        .collect::<Result<Vec<_>, _>>()
        .map_err(|err| map_identifier_error(&err))?;

    tables
        .ensure_table(target, &schema)
        .await
        .map_err(|err| map_table_error(target, table, err))?;
    let inserted = tables
        .insert_rows(target, schema.table(), &rows)
        .await
        .map_err(|err| map_table_error(target, table, err))?;

    info!(%target, table, rows = inserted, "stored record batch");
    Ok(StoredBatch {
        headers,
        rows: inserted,
    })
}

fn map_schema_error(err: TableSchemaError) -> Error {
    match err {
        TableSchemaError::NoColumns { .. } => Error::invalid_request(err.to_string())
            .with_details(json!({ "field": "data", "code": "no_fields" })),
        TableSchemaError::Identifier(inner) => map_identifier_error(&inner),
    }
}

fn map_identifier_error(err: &SqlIdentifierError) -> Error {
    Error::invalid_request(err.to_string())
        .with_details(json!({ "field": "data", "code": "invalid_field_name" }))
}

fn map_table_error(target: &DatabaseTarget, table: &str, err: DynamicTableRepositoryError) -> Error {
    error!(%target, table, error = %err, "dynamic table write failed");
    Error::internal(err.to_string())
}
