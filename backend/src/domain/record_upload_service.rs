//! Upload service for ad-hoc JSON and CSV record batches.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use tracing::warn;

use crate::domain::ports::{
    DatabaseProbe, DynamicTableRepository, RecordUploadCommand, RecordUploadOutcome,
    RecordUploadRequest,
};
use crate::domain::table_writes::store_batch;
use crate::domain::Error;

/// Table every upload is written to.
pub const UPLOAD_TABLE: &str = "json_invoice";

/// Implements [`RecordUploadCommand`] on top of a probe and a table adapter.
#[derive(Clone)]
pub struct RecordUploadService<P, T> {
    probe: Arc<P>,
    tables: Arc<T>,
}

impl<P, T> RecordUploadService<P, T> {
    /// Create a service from its adapters.
    pub fn new(probe: Arc<P>, tables: Arc<T>) -> Self {
        Self { probe, tables }
    }
}

#[async_trait]
impl<P, T> RecordUploadCommand for RecordUploadService<P, T>
where
    P: DatabaseProbe,
    T: DynamicTableRepository,
{
    async fn upload(&self, request: RecordUploadRequest) -> Result<RecordUploadOutcome, Error> {
        let RecordUploadRequest { target, records } = request;

        if let Err(err) = self.probe.probe(&target).await {
            warn!(%target, error = %err, "upload target rejected");
            return Err(Error::invalid_request("Invalid DB credentials / schema"));
        }
        if records.is_empty() {
            return Err(Error::invalid_request("Invalid JSON: No records")
                .with_details(json!({ "field": "data", "code": "empty" })));
        }

        let batch = store_batch(self.tables.as_ref(), &target, UPLOAD_TABLE, &records).await?;
        let mapping = batch
            .headers
            .iter()
            .map(|header| (header.clone(), header.clone()))
            .collect();

        Ok(RecordUploadOutcome {
            table: UPLOAD_TABLE.to_owned(),
            headers: batch.headers,
            row_count: batch.rows,
            mapping,
        })
    }
}

#[cfg(test)]
mod tests {
    //! Upload service behaviour against mocked ports.
    use super::*;
    use crate::domain::ports::{DatabaseProbeError, MockDatabaseProbe, MockDynamicTableRepository};
    use crate::domain::{DatabaseTarget, ErrorCode, Record};
    use rstest::{fixture, rstest};

    #[fixture]
    fn target() -> DatabaseTarget {
        DatabaseTarget::new("h", 5432, "s").expect("target")
    }

    fn records(value: serde_json::Value) -> Vec<Record> {
        serde_json::from_value(value).expect("records")
    }

    fn reachable() -> MockDatabaseProbe {
        let mut probe = MockDatabaseProbe::new();
        probe.expect_probe().times(1).return_once(|_| Ok(()));
        probe
    }

    fn make_service(
        probe: MockDatabaseProbe,
        tables: MockDynamicTableRepository,
    ) -> RecordUploadService<MockDatabaseProbe, MockDynamicTableRepository> {
        RecordUploadService::new(Arc::new(probe), Arc::new(tables))
    }

    #[rstest]
    #[tokio::test]
    async fn upload_writes_records_to_upload_table(target: DatabaseTarget) {
        let mut tables = MockDynamicTableRepository::new();
        tables
            .expect_ensure_table()
            .withf(|_, schema| {
                schema.table().as_str() == UPLOAD_TABLE && schema.column_names() == vec!["a", "b"]
            })
            .times(1)
            .return_once(|_, _| Ok(()));
        tables
            .expect_insert_rows()
            .times(1)
            .return_once(|_, _, rows| Ok(rows.len()));

        let service = make_service(reachable(), tables);
        let outcome = service
            .upload(RecordUploadRequest {
                target,
                records: records(json!([{"a": 1, "b": 2}])),
            })
            .await
            .expect("upload succeeds");

        assert_eq!(outcome.table, "json_invoice");
        assert_eq!(outcome.headers, vec!["a", "b"]);
        assert_eq!(outcome.row_count, 1);
        assert_eq!(outcome.mapping.get("a").map(String::as_str), Some("a"));
        assert_eq!(outcome.mapping.get("b").map(String::as_str), Some("b"));
    }

    #[rstest]
    #[tokio::test]
    async fn unreachable_target_is_a_bad_request(target: DatabaseTarget) {
        let mut probe = MockDatabaseProbe::new();
        probe
            .expect_probe()
            .times(1)
            .return_once(|_| Err(DatabaseProbeError::connection("password authentication failed")));

        let service = make_service(probe, MockDynamicTableRepository::new());
        let err = service
            .upload(RecordUploadRequest {
                target,
                records: records(json!([{"a": 1}])),
            })
            .await
            .expect_err("probe fails");

        assert_eq!(err.code(), ErrorCode::InvalidRequest);
        assert_eq!(err.message(), "Invalid DB credentials / schema");
    }

    #[rstest]
    #[tokio::test]
    async fn empty_batch_is_rejected_without_writes(target: DatabaseTarget) {
        let service = make_service(reachable(), MockDynamicTableRepository::new());
        let err = service
            .upload(RecordUploadRequest {
                target,
                records: Vec::new(),
            })
            .await
            .expect_err("empty batch");

        assert_eq!(err.code(), ErrorCode::InvalidRequest);
        assert_eq!(err.message(), "Invalid JSON: No records");
    }
}
