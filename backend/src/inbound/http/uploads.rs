//! Ad-hoc record upload handlers.
//!
//! ```text
//! POST /upload_json/                               {host, port, schema, data}
//! POST /upload_csv/?host=..&port=..&schema=..      text/csv body
//! ```
//!
//! Both write to the `json_invoice` table at the requested database.

use actix_web::{HttpResponse, post, web};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::{IntoParams, ToSchema};

use crate::domain::ports::{RecordUploadOutcome, RecordUploadRequest};
use crate::domain::{Error, PortValue};
use crate::inbound::http::ApiResult;
use crate::inbound::http::csv_records::parse_csv_records;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{parse_records, parse_target};

/// Request payload for `POST /upload_json/`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct UploadJsonRequest {
    /// Database host.
    #[schema(example = "localhost")]
    pub host: Option<String>,
    /// Database port as a string or number.
    #[schema(value_type = Option<String>, example = "5432")]
    pub port: Option<PortValue>,
    /// Database name.
    #[schema(example = "docunotes")]
    pub schema: Option<String>,
    /// Records to store.
    #[schema(value_type = Option<Vec<Object>>)]
    pub data: Option<Value>,
}

/// Query parameters for `POST /upload_csv/`.
#[derive(Debug, Deserialize, IntoParams)]
pub struct UploadCsvQuery {
    /// Database host.
    pub host: Option<String>,
    /// Database port.
    pub port: Option<String>,
    /// Database name.
    pub schema: Option<String>,
}

/// Response payload for both upload endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct UploadResponse {
    /// Human-readable summary naming the table.
    #[schema(example = "JSON uploaded and stored in table 'json_invoice'")]
    pub message: String,
    /// Columns derived from the batch, in first-seen order.
    pub headers: Vec<String>,
    /// Rows inserted.
    pub row_count: usize,
    /// Identity mapping from each header to itself.
    #[schema(value_type = Object)]
    pub mapping: indexmap::IndexMap<String, String>,
}

impl UploadResponse {
    fn from_outcome(format: &str, outcome: RecordUploadOutcome) -> Self {
        Self {
            message: format!(
                "{format} uploaded and stored in table '{}'",
                outcome.table
            ),
            headers: outcome.headers,
            row_count: outcome.row_count,
            mapping: outcome.mapping,
        }
    }
}

/// Store a JSON record batch.
#[utoipa::path(
    post,
    path = "/upload_json/",
    request_body = UploadJsonRequest,
    responses(
        (status = 200, description = "Records stored", body = UploadResponse),
        (status = 400, description = "Invalid payload or unreachable database", body = Error),
        (status = 500, description = "Storage failure", body = Error)
    ),
    tags = ["uploads"],
    operation_id = "uploadJson"
)]
#[post("/upload_json/")]
pub async fn upload_json(
    state: web::Data<HttpState>,
    payload: web::Json<UploadJsonRequest>,
) -> ApiResult<HttpResponse> {
    let UploadJsonRequest {
        host,
        port,
        schema,
        data,
    } = payload.into_inner();
    let target = parse_target(host, port, schema)?;
    let records = parse_records(data)?;

    let outcome = state
        .uploads
        .upload(RecordUploadRequest { target, records })
        .await?;
    Ok(HttpResponse::Ok().json(UploadResponse::from_outcome("JSON", outcome)))
}

/// Store a CSV record batch; the first row names the columns.
#[utoipa::path(
    post,
    path = "/upload_csv/",
    params(UploadCsvQuery),
    request_body(content = String, content_type = "text/csv"),
    responses(
        (status = 200, description = "Records stored", body = UploadResponse),
        (status = 400, description = "Invalid CSV or unreachable database", body = Error),
        (status = 500, description = "Storage failure", body = Error)
    ),
    tags = ["uploads"],
    operation_id = "uploadCsv"
)]
#[post("/upload_csv/")]
pub async fn upload_csv(
    state: web::Data<HttpState>,
    query: web::Query<UploadCsvQuery>,
    body: web::Bytes,
) -> ApiResult<HttpResponse> {
    let UploadCsvQuery { host, port, schema } = query.into_inner();
    let target = parse_target(host, port.map(PortValue::Text), schema)?;
    let records = parse_csv_records(&body)?;

    let outcome = state
        .uploads
        .upload(RecordUploadRequest { target, records })
        .await?;
    Ok(HttpResponse::Ok().json(UploadResponse::from_outcome("CSV", outcome)))
}
