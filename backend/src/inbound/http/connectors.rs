//! Connector configuration handler.
//!
//! ```text
//! POST /save_connector_config/  {host, port, schema, table_name, app_id, mapping}
//! ```

use actix_web::{HttpResponse, post, web};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use utoipa::ToSchema;

use crate::domain::{ConnectorConfig, ConnectorConfigError, Error, FieldMapping, PortValue};
use crate::inbound::http::ApiResult;
use crate::inbound::http::root::MessageResponse;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, parse_app_id_value, parse_target, require};

const TABLE_NAME: FieldName = FieldName::new("table_name");
const MAPPING: FieldName = FieldName::new("mapping");

/// Request payload for `POST /save_connector_config/`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct SaveConnectorConfigRequest {
    /// Tenant database host.
    pub host: Option<String>,
    /// Tenant database port as a string or number.
    #[schema(value_type = Option<String>, example = "5432")]
    pub port: Option<PortValue>,
    /// Tenant database name.
    pub schema: Option<String>,
    /// Table name recorded with the configuration.
    pub table_name: Option<String>,
    /// Tenant identifier; an integer or a numeric string.
    #[schema(value_type = Option<u64>, example = 7)]
    pub app_id: Option<Value>,
    /// Target column to source field pairs.
    #[schema(value_type = Option<Object>)]
    pub mapping: Option<FieldMapping>,
}

fn map_config_error(err: ConnectorConfigError) -> Error {
    let field = match &err {
        ConnectorConfigError::EmptyTableName => "table_name",
        ConnectorConfigError::EmptyMapping | ConnectorConfigError::MappingTarget(_) => "mapping",
        ConnectorConfigError::Target(_) => "target",
    };
    Error::invalid_request(err.to_string()).with_details(json!({
        "field": field,
        "code": "invalid_value",
    }))
}

fn parse_config(payload: SaveConnectorConfigRequest) -> Result<ConnectorConfig, Error> {
    let SaveConnectorConfigRequest {
        host,
        port,
        schema,
        table_name,
        app_id,
        mapping,
    } = payload;
    let target = parse_target(host, port, schema)?;
    let table_name = require(table_name, TABLE_NAME)?;
    let app_id = parse_app_id_value(app_id)?;
    let mapping = require(mapping, MAPPING)?;
    ConnectorConfig::new(target, table_name, app_id, mapping).map_err(map_config_error)
}

/// Save a connector configuration at the database it describes.
#[utoipa::path(
    post,
    path = "/save_connector_config/",
    request_body = SaveConnectorConfigRequest,
    responses(
        (status = 200, description = "Configuration saved", body = MessageResponse),
        (status = 400, description = "Invalid configuration", body = Error),
        (status = 500, description = "Failed to insert connector config", body = Error)
    ),
    tags = ["connectors"],
    operation_id = "saveConnectorConfig"
)]
#[post("/save_connector_config/")]
pub async fn save_connector_config(
    state: web::Data<HttpState>,
    payload: web::Json<SaveConnectorConfigRequest>,
) -> ApiResult<HttpResponse> {
    let config = parse_config(payload.into_inner())?;
    state.connectors.save(config).await?;
    Ok(HttpResponse::Ok().json(MessageResponse::new(
        "Connector configuration saved successfully.",
    )))
}
