//! Port for tables whose columns are derived from inbound records.
//!
//! Every dynamic table has an `id SERIAL PRIMARY KEY` plus one nullable
//! `TEXT` column per data field. Adapters open a private connection to the
//! requested [`DatabaseTarget`] for each call and release it before
//! returning.

use async_trait::async_trait;

use crate::domain::{DatabaseTarget, Row, SqlIdentifier, TableSchema};

use super::define_port_error;

define_port_error! {
    /// Errors raised by dynamic table adapters.
    pub enum DynamicTableRepositoryError {
        /// Connection to the target database failed.
        Connection { message: String } =>
            "dynamic table connection failed: {message}",
        /// A statement failed; any open transaction was rolled back.
        Query { message: String } =>
            "dynamic table statement failed: {message}",
        /// The operation exceeded the configured deadline.
        Timeout { seconds: u64 } =>
            "dynamic table operation timed out after {seconds}s",
    }
}

/// Creates dynamic tables and writes record batches into them.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DynamicTableRepository: Send + Sync {
    /// Create `schema.table()` if it does not exist.
    ///
    /// Existing tables are left untouched, including their columns.
    async fn ensure_table(
        &self,
        target: &DatabaseTarget,
        schema: &TableSchema,
    ) -> Result<(), DynamicTableRepositoryError>;

    /// Insert `rows` into `table` inside one transaction.
    ///
    /// Each row names only its own columns; a row with no columns inserts
    /// default values. Any failure rolls the whole batch back. Returns the
    /// number of rows written.
    async fn insert_rows(
        &self,
        target: &DatabaseTarget,
        table: &SqlIdentifier,
        rows: &[Row],
    ) -> Result<usize, DynamicTableRepositoryError>;
}
