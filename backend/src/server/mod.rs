//! Server construction and middleware wiring.

mod config;
mod state_builders;

pub use config::ServerConfig;
pub use state_builders::build_http_state;

use actix_cors::Cors;
use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, http::header, web};
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

use crate::Trace;
#[cfg(debug_assertions)]
use crate::doc::ApiDoc;
use crate::inbound::http::connectors::save_connector_config;
use crate::inbound::http::extractors::{json_config, payload_config, query_config};
use crate::inbound::http::health::{HealthState, live, ready};
use crate::inbound::http::root::root;
use crate::inbound::http::runtime::runtime_process;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::uploads::{upload_csv, upload_json};

fn cors(origin: &str) -> Cors {
    Cors::default()
        .allowed_origin(origin)
        .allow_any_method()
        .allow_any_header()
        .expose_headers([header::HeaderName::from_static(
            crate::domain::TRACE_ID_HEADER,
        )])
        .supports_credentials()
        .max_age(3600)
}

fn build_app(
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
    cors_layer: Cors,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl actix_web::body::MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .app_data(json_config())
        .app_data(query_config())
        .app_data(payload_config())
        .wrap(cors_layer)
        .wrap(Trace)
        .service(root)
        .service(upload_json)
        .service(upload_csv)
        .service(save_connector_config)
        .service(runtime_process)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));

    app
}

/// Construct an Actix HTTP server using the provided health state and configuration.
///
/// # Returns
/// A spawned [`Server`] that must be awaited to drive the listener.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let server_health_state = health_state.clone();
    let ServerConfig {
        bind_addr,
        cors_origin,
        http_state,
    } = config;

    let server = HttpServer::new(move || {
        build_app(
            server_health_state.clone(),
            http_state.clone(),
            cors(&cors_origin),
        )
    })
    .bind(bind_addr)?
    .run();

    health_state.mark_ready();
    Ok(server)
}

#[cfg(test)]
mod tests {
    //! Wiring checks for the assembled application.
    use super::*;
    use crate::domain::TRACE_ID_HEADER;
    use crate::inbound::http::test_utils::TestPorts;
    use actix_web::http::StatusCode;
    use actix_web::test as actix_test;
    use rstest::rstest;
    use serde_json::{Value, json};
    use std::net::SocketAddr;

    const ORIGIN: &str = "http://localhost:3000";

    #[rstest]
    #[case("/")]
    #[case("/health/live")]
    #[actix_web::test]
    async fn get_routes_are_mounted(#[case] path: &str) {
        let app = actix_test::init_service(build_app(
            web::Data::new(HealthState::new()),
            TestPorts::default().into_state(),
            cors(ORIGIN),
        ))
        .await;
        let response =
            actix_test::call_service(&app, actix_test::TestRequest::get().uri(path).to_request()).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().contains_key(TRACE_ID_HEADER));
    }

    #[actix_web::test]
    async fn create_server_binds_and_marks_ready() {
        let health = web::Data::new(HealthState::new());
        let config = ServerConfig::new(
            SocketAddr::from(([127, 0, 0, 1], 0)),
            ORIGIN,
            TestPorts::default().into_state(),
        );

        let server = create_server(health.clone(), config).expect("bind ephemeral port");
        assert!(health.is_ready());
        server.handle().stop(false).await;
    }

    #[actix_web::test]
    async fn readiness_reflects_health_state() {
        let health = web::Data::new(HealthState::new());
        let app = actix_test::init_service(build_app(
            health.clone(),
            TestPorts::default().into_state(),
            cors(ORIGIN),
        ))
        .await;

        let before = actix_test::call_service(
            &app,
            actix_test::TestRequest::get().uri("/health/ready").to_request(),
        )
        .await;
        assert_eq!(before.status(), StatusCode::SERVICE_UNAVAILABLE);

        health.mark_ready();
        let after = actix_test::call_service(
            &app,
            actix_test::TestRequest::get().uri("/health/ready").to_request(),
        )
        .await;
        assert_eq!(after.status(), StatusCode::OK);
    }

    #[actix_web::test]
    async fn configured_origin_passes_preflight() {
        let app = actix_test::init_service(build_app(
            web::Data::new(HealthState::new()),
            TestPorts::default().into_state(),
            cors(ORIGIN),
        ))
        .await;
        let request = actix_test::TestRequest::default()
            .method(actix_web::http::Method::OPTIONS)
            .uri("/save_connector_config/")
            .insert_header((header::ORIGIN, ORIGIN))
            .insert_header((header::ACCESS_CONTROL_REQUEST_METHOD, "POST"))
            .to_request();
        let response = actix_test::call_service(&app, request).await;
        assert_eq!(
            response
                .headers()
                .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
                .and_then(|value| value.to_str().ok()),
            Some(ORIGIN)
        );
    }

    #[actix_web::test]
    async fn malformed_json_gets_error_envelope() {
        let app = actix_test::init_service(build_app(
            web::Data::new(HealthState::new()),
            TestPorts::default().into_state(),
            cors(ORIGIN),
        ))
        .await;
        let request = actix_test::TestRequest::post()
            .uri("/runtime_process/?app_id=1")
            .insert_header((header::CONTENT_TYPE, "application/json"))
            .set_payload("[")
            .to_request();
        let response = actix_test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body: Value = actix_test::read_body_json(response).await;
        assert_eq!(body["code"], json!("invalid_request"));
    }
}
