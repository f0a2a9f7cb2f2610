//! Diesel table definitions for tables with a fixed shape.
//!
//! Dynamic tables are not declared here; see `dynamic_sql`.

diesel::table! {
    /// Saved connector configurations, one JSON document per row.
    connector (connector_id) {
        /// Serial primary key; insertion order.
        connector_id -> Int4,
        /// Connector kind, `output` unless set otherwise.
        connector_type -> Nullable<Text>,
        /// Configuration document.
        config -> Nullable<Jsonb>,
        /// Insertion timestamp.
        created_time -> Nullable<Timestamptz>,
    }
}
