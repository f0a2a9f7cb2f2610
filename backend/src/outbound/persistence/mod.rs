//! PostgreSQL persistence adapters using Diesel.
//!
//! # Architecture
//!
//! - **Per-request connections**: each call opens an `AsyncPgConnection` to
//!   the target named by the request through [`PgConnectionFactory`] and
//!   drops it before returning. There is no pool because targets vary per
//!   request.
//! - **Thin adapters**: repositories translate between SQL and domain types
//!   only; table shapes and mappings are decided in the domain.
//! - **Bounded operations**: connects and statements share one configurable
//!   deadline.
//! - **Sanitised errors**: driver messages are logged at `debug` and replaced
//!   with fixed text in the port errors.
//!
//! # Example
//!
//! ```ignore
//! use sql_connector::outbound::persistence::{
//!     DatabaseCredentials, DieselDynamicTableRepository, PgConnectionFactory,
//! };
//!
//! let factory = PgConnectionFactory::new(
//!     DatabaseCredentials::new("connector", "secret"),
//!     Duration::from_secs(30),
//! );
//! let tables = DieselDynamicTableRepository::new(factory);
//! ```

mod connection;
mod diesel_connector_config_repository;
mod diesel_dynamic_table_repository;
mod diesel_error_mapping;
mod dynamic_sql;
mod schema;

pub use connection::{ConnectionError, DatabaseCredentials, PgConnectionFactory};
pub use diesel_connector_config_repository::DieselConnectorConfigRepository;
pub use diesel_dynamic_table_repository::DieselDynamicTableRepository;
