//! CSV request bodies lifted into records.
//!
//! The first row names the fields. Every later row becomes a record mapping
//! header to cell text; empty cells become `null`. Rows whose length differs
//! from the header row are rejected.

use csv::{ReaderBuilder, Trim};
use serde_json::{Value, json};

use crate::domain::{Error, Record};

fn invalid_csv(err: &csv::Error) -> Error {
    let mut error = Error::invalid_request(format!("Invalid CSV: {err}"));
    if let Some(position) = err.position() {
        error = error.with_details(json!({
            "line": position.line(),
            "code": "invalid_csv",
        }));
    }
    error
}

/// Parse `body` as CSV with a header row.
pub(crate) fn parse_csv_records(body: &[u8]) -> Result<Vec<Record>, Error> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .trim(Trim::Headers)
        .from_reader(body);
    let headers = reader.headers().map_err(|err| invalid_csv(&err))?.clone();

    let mut records = Vec::new();
    for row in reader.records() {
        let row = row.map_err(|err| invalid_csv(&err))?;
        let record: Record = headers
            .iter()
            .zip(row.iter())
            .map(|(header, cell)| {
                let value = if cell.is_empty() {
                    Value::Null
                } else {
                    Value::String(cell.to_owned())
                };
                (header.to_owned(), value)
            })
            .collect();
        records.push(record);
    }
    Ok(records)
}
