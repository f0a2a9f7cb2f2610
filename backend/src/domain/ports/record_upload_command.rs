//! Driving port for ad-hoc record uploads.
//!
//! JSON and CSV uploads both reach the domain as a list of records plus the
//! database they should be written to; the inbound adapter owns parsing.

use async_trait::async_trait;
use indexmap::IndexMap;

use crate::domain::{DatabaseTarget, Error, Record};

/// Records to store in the upload table at `target`.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordUploadRequest {
    /// Database receiving the records.
    pub target: DatabaseTarget,
    /// Records in request order.
    pub records: Vec<Record>,
}

/// Result of a successful upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordUploadOutcome {
    /// Table the records were written to.
    pub table: String,
    /// Union of field names across the batch, in first-seen order.
    pub headers: Vec<String>,
    /// Rows inserted.
    pub row_count: usize,
    /// Identity mapping from each header to itself.
    pub mapping: IndexMap<String, String>,
}

/// Stores uploaded records.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RecordUploadCommand: Send + Sync {
    /// Probe the target, derive the table shape, and insert the batch.
    ///
    /// # Errors
    ///
    /// - `InvalidRequest` when the target is unreachable, the batch is empty,
    ///   or a field name is not a usable column.
    /// - `InternalError` when table creation or insertion fails.
    async fn upload(&self, request: RecordUploadRequest) -> Result<RecordUploadOutcome, Error>;
}
