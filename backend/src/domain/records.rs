//! Inbound records, text rows, and dynamic table schemas.
//!
//! Records arrive as JSON objects (or CSV rows lifted into JSON objects) and
//! are written to tables whose data columns are all `TEXT`. Conversion to
//! text happens here so every adapter stores values the same way:
//!
//! - strings are stored verbatim;
//! - numbers and booleans use their JSON spelling (`1`, `2.5`, `true`);
//! - arrays and objects are stored as compact JSON;
//! - `null` becomes SQL `NULL`.

use indexmap::{IndexMap, IndexSet};
use serde_json::{Map, Value};
use thiserror::Error;

use super::identifier::{SqlIdentifier, SqlIdentifierError};

/// A single inbound record keyed by field name.
pub type Record = Map<String, Value>;

/// Render a JSON value as the text stored in a dynamic column.
pub fn cell_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(text) => Some(text.clone()),
        Value::Bool(_) | Value::Number(_) | Value::Array(_) | Value::Object(_) => {
            Some(value.to_string())
        }
    }
}

/// Collect the union of field names across `records`, in first-seen order.
///
/// # Examples
/// ```
/// use serde_json::json;
/// use sql_connector::domain::{union_field_names, Record};
///
/// let records: Vec<Record> = serde_json::from_value(json!([
///     {"a": 1, "b": 2},
///     {"b": 3, "c": 4},
/// ]))
/// .expect("records");
/// assert_eq!(union_field_names(&records), vec!["a", "b", "c"]);
/// ```
pub fn union_field_names(records: &[Record]) -> Vec<String> {
    let mut names: IndexSet<&str> = IndexSet::new();
    for record in records {
        names.extend(record.keys().map(String::as_str));
    }
    names.into_iter().map(str::to_owned).collect()
}

/// One row ready for insertion: validated column names and text values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Row(IndexMap<SqlIdentifier, Option<String>>);

impl Row {
    /// Build a row from a record, validating every key as a column name.
    pub fn from_record(record: &Record) -> Result<Self, SqlIdentifierError> {
        let mut cells = IndexMap::with_capacity(record.len());
        for (key, value) in record {
            cells.insert(SqlIdentifier::column(key.as_str())?, cell_text(value));
        }
        Ok(Self(cells))
    }

    /// Column names in insertion order.
    pub fn columns(&self) -> impl Iterator<Item = &SqlIdentifier> {
        self.0.keys()
    }

    /// Values aligned with [`Row::columns`].
    pub fn values(&self) -> impl Iterator<Item = &Option<String>> {
        self.0.values()
    }

    /// Value stored under `column`, if the row has that column.
    pub fn get(&self, column: &str) -> Option<&Option<String>> {
        self.0
            .iter()
            .find_map(|(name, value)| (name.as_str() == column).then_some(value))
    }

    /// Number of columns.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the row has no columns.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Validation errors for [`TableSchema`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TableSchemaError {
    /// No data columns were supplied.
    #[error("table `{table}` needs at least one data column")]
    NoColumns {
        /// Table that would have been created.
        table: String,
    },
    /// A name failed identifier validation.
    #[error(transparent)]
    Identifier(#[from] SqlIdentifierError),
}

/// Shape of a dynamic table: name plus its `TEXT` columns.
///
/// ## Invariants
/// - At least one data column.
/// - Column names are unique; repeats collapse onto the first occurrence.
/// - No column is named `id`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableSchema {
    table: SqlIdentifier,
    columns: IndexSet<SqlIdentifier>,
}

impl TableSchema {
    /// Validate a table name and its column names.
    pub fn new<I, S>(table: &str, columns: I) -> Result<Self, TableSchemaError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let table = SqlIdentifier::new(table)?;
        let columns = columns
            .into_iter()
            .map(SqlIdentifier::column)
            .collect::<Result<IndexSet<_>, _>>()?;
        if columns.is_empty() {
            return Err(TableSchemaError::NoColumns {
                table: table.to_string(),
            });
        }
        Ok(Self { table, columns })
    }

    /// Table name.
    pub fn table(&self) -> &SqlIdentifier {
        &self.table
    }

    /// Data columns in declaration order.
    pub fn columns(&self) -> impl Iterator<Item = &SqlIdentifier> {
        self.columns.iter()
    }

    /// Data column names as plain strings.
    pub fn column_names(&self) -> Vec<String> {
        self.columns.iter().map(ToString::to_string).collect()
    }
}

#[cfg(test)]
mod tests {
    //! Cell rendering, field unions and schema construction.
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    fn record(value: Value) -> Record {
        serde_json::from_value(value).expect("record object")
    }

    #[rstest]
    #[case(json!("Alice"), Some("Alice"))]
    #[case(json!(1), Some("1"))]
    #[case(json!(2.5), Some("2.5"))]
    #[case(json!(true), Some("true"))]
    #[case(json!({"k": [1, 2]}), Some("{\"k\":[1,2]}"))]
    #[case(Value::Null, None)]
    fn cell_text_renders_json_values(#[case] value: Value, #[case] expected: Option<&str>) {
        assert_eq!(cell_text(&value).as_deref(), expected);
    }

    #[rstest]
    fn row_from_record_keeps_order_and_values() {
        let row = Row::from_record(&record(json!({"b": 2, "a": null}))).expect("row");
        let columns: Vec<&str> = row.columns().map(SqlIdentifier::as_str).collect();
        assert_eq!(columns, vec!["b", "a"]);
        assert_eq!(row.get("b"), Some(&Some("2".to_owned())));
        assert_eq!(row.get("a"), Some(&None));
        assert_eq!(row.get("c"), None);
    }

    #[rstest]
    fn row_from_record_rejects_unsafe_keys() {
        let result = Row::from_record(&record(json!({"bad key": 1})));
        assert!(matches!(
            result,
            Err(SqlIdentifierError::InvalidCharacter { .. })
        ));
    }

    #[rstest]
    fn table_schema_deduplicates_columns() {
        let schema = TableSchema::new("json_invoice", ["a", "b", "a"]).expect("schema");
        assert_eq!(schema.column_names(), vec!["a", "b"]);
        assert_eq!(schema.table().as_str(), "json_invoice");
    }

    #[rstest]
    fn table_schema_rejects_zero_columns() {
        let result = TableSchema::new("json_invoice", Vec::<String>::new());
        assert_eq!(
            result,
            Err(TableSchemaError::NoColumns {
                table: "json_invoice".to_owned()
            })
        );
    }

    #[rstest]
    fn table_schema_rejects_identity_column() {
        let result = TableSchema::new("json_invoice", ["id", "total"]);
        assert!(matches!(
            result,
            Err(TableSchemaError::Identifier(SqlIdentifierError::Reserved { .. }))
        ));
    }
}
