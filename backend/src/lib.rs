//! SQL Connector: stores JSON and CSV records in per-tenant PostgreSQL
//! tables and replays runtime batches through saved field mappings.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod server;
pub mod settings;

pub use middleware::Trace;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
