//! Runtime ingestion handler.
//!
//! ```text
//! POST /runtime_process/?app_id=7  {data: [{..}, ..]}
//! ```
//!
//! Records are renamed through the tenant's saved mapping and written to
//! `runtime_app_{app_id}` at the tenant's database.

use actix_web::{HttpResponse, post, web};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::{IntoParams, ToSchema};

use crate::domain::Error;
use crate::domain::ports::{RuntimeIngestionOutcome, RuntimeIngestionRequest};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{parse_app_id, parse_records};

/// Query parameters for `POST /runtime_process/`.
#[derive(Debug, Deserialize, IntoParams)]
pub struct RuntimeProcessQuery {
    /// Tenant identifier.
    #[param(example = "7")]
    pub app_id: Option<String>,
}

/// Request payload for `POST /runtime_process/`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct RuntimeProcessRequest {
    /// Records keyed by source field name.
    #[schema(value_type = Option<Vec<Object>>)]
    pub data: Option<Value>,
}

/// Response payload for runtime ingestion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct RuntimeProcessResponse {
    /// Human-readable summary naming the table.
    #[schema(example = "Runtime data stored in table 'runtime_app_7'")]
    pub message: String,
    /// Rows inserted.
    pub rows: usize,
    /// Destination table.
    #[schema(example = "runtime_app_7")]
    pub table: String,
}

impl From<RuntimeIngestionOutcome> for RuntimeProcessResponse {
    fn from(outcome: RuntimeIngestionOutcome) -> Self {
        Self {
            message: format!("Runtime data stored in table '{}'", outcome.table),
            rows: outcome.rows,
            table: outcome.table,
        }
    }
}

/// Map and store a runtime batch for one tenant.
#[utoipa::path(
    post,
    path = "/runtime_process/",
    params(RuntimeProcessQuery),
    request_body = RuntimeProcessRequest,
    responses(
        (status = 200, description = "Records stored", body = RuntimeProcessResponse),
        (status = 400, description = "Invalid payload or incomplete configuration", body = Error),
        (status = 404, description = "No configuration for app id", body = Error),
        (status = 500, description = "Storage failure", body = Error)
    ),
    tags = ["runtime"],
    operation_id = "runtimeProcess"
)]
#[post("/runtime_process/")]
pub async fn runtime_process(
    state: web::Data<HttpState>,
    query: web::Query<RuntimeProcessQuery>,
    payload: web::Json<RuntimeProcessRequest>,
) -> ApiResult<HttpResponse> {
    let app_id = parse_app_id(query.into_inner().app_id)?;
    let records = parse_records(payload.into_inner().data)?;

    let outcome = state
        .runtime
        .ingest(RuntimeIngestionRequest { app_id, records })
        .await?;
    Ok(HttpResponse::Ok().json(RuntimeProcessResponse::from(outcome)))
}

#[cfg(test)]
mod tests {
    //! Handler tests for `POST /runtime_process/`.
    use super::*;
    use crate::domain::AppId;
    use crate::inbound::http::extractors::{json_config, query_config};
    use crate::inbound::http::test_utils::TestPorts;
    use actix_web::http::StatusCode;
    use actix_web::{App, test as actix_test};
    use rstest::rstest;
    use serde_json::json;

    macro_rules! init_app {
        ($ports:expr) => {
            actix_test::init_service(
                App::new()
                    .app_data($ports.into_state())
                    .app_data(json_config())
                    .app_data(query_config())
                    .service(runtime_process),
            )
            .await
        };
    }

    #[actix_web::test]
    async fn runtime_process_reports_table_and_rows() {
        let mut ports = TestPorts::default();
        ports
            .runtime
            .expect_ingest()
            .withf(|request| request.app_id == AppId::new(7) && request.records.len() == 2)
            .times(1)
            .return_once(|_| {
                Ok(RuntimeIngestionOutcome {
                    table: "runtime_app_7".to_owned(),
                    rows: 2,
                })
            });
        let app = init_app!(ports);

        let request = actix_test::TestRequest::post()
            .uri("/runtime_process/?app_id=7")
            .set_json(json!({"data": [{"name": "A"}, {"name": "B"}]}))
            .to_request();
        let body: RuntimeProcessResponse = actix_test::call_and_read_body_json(&app, request).await;

        assert_eq!(
            body,
            RuntimeProcessResponse {
                message: "Runtime data stored in table 'runtime_app_7'".to_owned(),
                rows: 2,
                table: "runtime_app_7".to_owned(),
            }
        );
    }

    #[actix_web::test]
    async fn unknown_app_id_is_not_found() {
        let mut ports = TestPorts::default();
        ports
            .runtime
            .expect_ingest()
            .return_once(|_| Err(Error::not_found("No config found for app_id 99")));
        let app = init_app!(ports);

        let request = actix_test::TestRequest::post()
            .uri("/runtime_process/?app_id=99")
            .set_json(json!({"data": [{"name": "A"}]}))
            .to_request();
        let response = actix_test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let body: Value = actix_test::read_body_json(response).await;
        assert_eq!(body["message"], json!("No config found for app_id 99"));
    }

    #[actix_web::test]
    async fn missing_data_is_rejected_before_lookup() {
        let app = init_app!(TestPorts::default());
        let request = actix_test::TestRequest::post()
            .uri("/runtime_process/?app_id=7")
            .set_json(json!({}))
            .to_request();
        let response = actix_test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body: Value = actix_test::read_body_json(response).await;
        assert_eq!(body["message"], json!("Missing 'data' in body."));
    }

    #[rstest]
    #[case("abc")]
    #[case("-3")]
    #[actix_web::test]
    async fn app_ids_that_are_not_non_negative_integers_are_rejected(#[case] app_id: &str) {
        let app = init_app!(TestPorts::default());
        let request = actix_test::TestRequest::post()
            .uri(&format!("/runtime_process/?app_id={app_id}"))
            .set_json(json!({"data": [{"name": "A"}]}))
            .to_request();
        let response = actix_test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body: Value = actix_test::read_body_json(response).await;
        assert_eq!(body["details"]["field"], json!("app_id"));
    }
}
