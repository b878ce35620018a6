//! View filter - free-text search over visible columns

use super::row::{cell, Row};
use std::collections::HashMap;

/// Lowercased, space-joined values of the visible columns of `row`
///
/// Columns follow schema order; missing values contribute an empty string.
pub fn haystack(row: &Row, schema: &[String], visibility: &HashMap<String, bool>) -> String {
    schema
        .iter()
        .filter(|col| visibility.get(*col).copied().unwrap_or(false))
        .map(|col| cell(row, col))
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Rows whose haystack contains `term`, case-insensitively, in input order
///
/// An empty term matches every row.
pub fn filter_rows<'a>(
    rows: &'a [Row],
    schema: &[String],
    visibility: &HashMap<String, bool>,
    term: &str,
) -> Vec<&'a Row> {
    let needle = term.to_lowercase();
    rows.iter()
        .filter(|row| haystack(row, schema, visibility).contains(&needle))
        .collect()
}
