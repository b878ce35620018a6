//! Row representation shared by the engine and its collaborators

use indexmap::IndexMap;

/// A single record: column name to optional scalar value
///
/// Key order is the order the parser produced, which is what schema
/// inference uses for first-seen ordering.
pub type Row = IndexMap<String, Option<String>>;

/// Value of `column` in `row`, with missing keys and `None` read as ""
pub fn cell<'a>(row: &'a Row, column: &str) -> &'a str {
    row.get(column).and_then(|v| v.as_deref()).unwrap_or("")
}

#[cfg(test)]
pub fn row(pairs: &[(&str, &str)]) -> Row {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), Some(v.to_string())))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_reads_missing_and_none_as_empty() {
        let mut r = row(&[("Title", "Alpha")]);
        r.insert("Region".to_string(), None);

        assert_eq!(cell(&r, "Title"), "Alpha");
        assert_eq!(cell(&r, "Region"), "");
        assert_eq!(cell(&r, "Serial"), "");
    }
}
