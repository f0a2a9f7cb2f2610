//! SQL text for dynamic tables.
//!
//! Names come from [`SqlIdentifier`], which has already passed the allow-list,
//! and are always double-quoted. Values are never interpolated; insert
//! statements use `$n` placeholders bound by the caller.

use crate::domain::{IDENTITY_COLUMN, Row, SqlIdentifier, TableSchema};

/// `CREATE TABLE IF NOT EXISTS` for `schema`: identity key plus one `TEXT`
/// column per data field.
pub fn create_table_sql(schema: &TableSchema) -> String {
    let columns = schema
        .columns()
        .map(|column| format!(", {} TEXT", column.quoted()))
        .collect::<String>();
    format!(
        "CREATE TABLE IF NOT EXISTS {} ({IDENTITY_COLUMN} SERIAL PRIMARY KEY{columns})",
        schema.table().quoted()
    )
}

/// Parameterised `INSERT` naming exactly the columns present in `row`.
///
/// A row without columns inserts default values.
pub fn insert_row_sql(table: &SqlIdentifier, row: &Row) -> String {
    if row.is_empty() {
        return format!("INSERT INTO {} DEFAULT VALUES", table.quoted());
    }
    let columns = row
        .columns()
        .map(SqlIdentifier::quoted)
        .collect::<Vec<_>>()
        .join(", ");
    let placeholders = (1..=row.len())
        .map(|index| format!("${index}"))
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        "INSERT INTO {} ({columns}) VALUES ({placeholders})",
        table.quoted()
    )
}
