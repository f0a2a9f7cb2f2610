//! Service entry-point: loads settings, wires adapters, and runs the server.

use std::ffi::OsString;

use actix_web::web;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use sql_connector::inbound::http::health::HealthState;
use sql_connector::outbound::persistence::PgConnectionFactory;
use sql_connector::server::{ServerConfig, build_http_state, create_server};
use sql_connector::settings::{DatabaseCredentialsSettings, ServerSettings};

fn config_error(err: impl std::fmt::Display) -> std::io::Error {
    std::io::Error::other(format!("configuration error: {err}"))
}

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = ServerSettings::load().map_err(config_error)?;
    // Credentials come from the environment or config file, never argv.
    let credentials = DatabaseCredentialsSettings::load_from_iter([OsString::from("sql-connector")])
        .map_err(config_error)?
        .into_credentials()
        .map_err(config_error)?;

    let bind_addr = settings.bind_addr().map_err(config_error)?;
    let lookup = settings.lookup_target().map_err(config_error)?;
    let connections = PgConnectionFactory::new(credentials, settings.db_timeout());
    info!(%bind_addr, %lookup, "starting SQL connector");

    let http_state = build_http_state(&connections, lookup);
    let config = ServerConfig::new(bind_addr, settings.cors_origin(), http_state);
    let health_state = web::Data::new(HealthState::new());
    create_server(health_state, config)?.await
}
