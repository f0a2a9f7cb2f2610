//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every HTTP endpoint from the inbound layer together
//! with the request, response, and error schemas they reference. The document
//! is served by Swagger UI in debug builds and printed by the `openapi-dump`
//! binary for external tooling.

use utoipa::OpenApi;

use crate::domain::{Error, ErrorCode};
use crate::inbound::http::connectors::SaveConnectorConfigRequest;
use crate::inbound::http::root::MessageResponse;
use crate::inbound::http::runtime::{RuntimeProcessRequest, RuntimeProcessResponse};
use crate::inbound::http::uploads::{UploadJsonRequest, UploadResponse};

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "SQL Connector API",
        description = "Stores JSON and CSV records in per-tenant PostgreSQL tables.",
        license(name = "MIT")
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::root::root,
        crate::inbound::http::uploads::upload_json,
        crate::inbound::http::uploads::upload_csv,
        crate::inbound::http::connectors::save_connector_config,
        crate::inbound::http::runtime::runtime_process,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        Error,
        ErrorCode,
        MessageResponse,
        UploadJsonRequest,
        UploadResponse,
        SaveConnectorConfigRequest,
        RuntimeProcessRequest,
        RuntimeProcessResponse,
    )),
    tags(
        (name = "service", description = "Service banner"),
        (name = "uploads", description = "Ad-hoc JSON and CSV uploads"),
        (name = "connectors", description = "Per-tenant connector configuration"),
        (name = "runtime", description = "Mapped runtime ingestion"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
