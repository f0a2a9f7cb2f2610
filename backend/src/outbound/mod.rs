//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **persistence**: PostgreSQL adapters built on Diesel and `diesel-async`.
//!
//! Adapters are thin translators between domain types and SQL. They contain
//! no business logic.

pub mod persistence;
