//! CSV parsing and serialization
//!
//! `parse` turns delimiter-separated text with a header row into rows.
//! `serialize` is its inverse for export payloads.
//!
//! Serializer contract: the header is the payload's column list, and a
//! column a row does not carry (or carries as `None`) is written as an empty
//! field, so every record has exactly one field per exported column. A
//! payload without rows serializes to an empty string.
//!
//! A header that repeats a name gets `_1`, `_2`, ... suffixes on the later
//! occurrences so no field is lost.

use crate::error::IngestError;
use crate::model::export::ExportPayload;
use crate::model::row::{cell, Row};
use anyhow::Result;
use std::collections::HashSet;
use tracing::debug;

/// Parse CSV text whose first record names the columns
///
/// Records shorter than the header leave the trailing columns out of the
/// row; fields beyond the header are ignored.
pub fn parse(text: &str) -> Result<Vec<Row>, IngestError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(text.as_bytes());

    let headers = unique_headers(reader.headers()?);
    let mut rows = Vec::new();
    let mut overflow = 0usize;

    for record in reader.records() {
        let record = record?;
        if record.len() > headers.len() {
            overflow += 1;
        }
        let row: Row = headers
            .iter()
            .zip(record.iter())
            .map(|(name, value)| (name.clone(), Some(value.to_string())))
            .collect();
        rows.push(row);
    }

    debug!(
        rows = rows.len(),
        columns = headers.len(),
        overflow,
        "Parsed CSV"
    );
    Ok(rows)
}

/// Header names with repeats renamed `name_1`, `name_2`, ...
fn unique_headers(record: &csv::StringRecord) -> Vec<String> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut names = Vec::with_capacity(record.len());

    for name in record.iter() {
        let mut candidate = name.to_string();
        let mut suffix = 1;
        while seen.contains(&candidate) {
            candidate = format!("{}_{}", name, suffix);
            suffix += 1;
        }
        seen.insert(candidate.clone());
        names.push(candidate);
    }
    names
}

/// Serialize an export payload as CSV text
pub fn serialize(payload: &ExportPayload) -> Result<String> {
    if payload.columns.is_empty() || payload.rows.is_empty() {
        return Ok(String::new());
    }

    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(&payload.columns)?;
    for row in &payload.rows {
        writer.write_record(payload.columns.iter().map(|col| cell(row, col)))?;
    }

    let bytes = writer.into_inner()?;
    Ok(String::from_utf8(bytes)?)
}
