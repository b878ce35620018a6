//! Schema inference over heterogeneous row sets
//!
//! The schema is the ordered union of keys across all rows. Rows that carry
//! no value at all are ingestion artifacts (trailing newlines, separator-only
//! lines) and are dropped before anything else looks at the data.

use super::row::Row;
use indexmap::IndexSet;

/// True when no field of `row` holds a non-empty value
pub fn is_blank(row: &Row) -> bool {
    !row
        .values()
        .any(|value| value.as_deref().is_some_and(|v| !v.is_empty()))
}

/// Remove blank rows, keeping the order of the rest
pub fn drop_blank_rows(rows: Vec<Row>) -> Vec<Row> {
    rows.into_iter().filter(|row| !is_blank(row)).collect()
}

/// Ordered, deduplicated column names in first-occurrence order
///
/// Rows are scanned in sequence and keys within a row in their own order.
/// A name seen again later never moves.
pub fn infer_schema(rows: &[Row]) -> Vec<String> {
    let mut seen: IndexSet<&str> = IndexSet::new();
    for row in rows {
        for key in row.keys() {
            seen.insert(key.as_str());
        }
    }
    seen.into_iter().map(str::to_string).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::row::row;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_infer_schema_empty() {
        assert!(infer_schema(&[]).is_empty());
    }

    #[test]
    fn test_infer_schema_first_occurrence_order() {
        let rows = vec![
            row(&[("Title", "Alpha"), ("Region", "US")]),
            row(&[("Serial", "SLUS-001"), ("Title", "Beta")]),
            row(&[("Region", "EU"), ("Languages", "En,Fr"), ("Serial", "x")]),
        ];

        assert_eq!(
            infer_schema(&rows),
            vec!["Title", "Region", "Serial", "Languages"]
        );
    }

    #[test]
    fn test_infer_schema_is_deterministic() {
        let rows = vec![
            row(&[("b", "1"), ("a", "2")]),
            row(&[("c", "3"), ("a", "4")]),
        ];
        assert_eq!(infer_schema(&rows), infer_schema(&rows));
        assert_eq!(infer_schema(&rows), vec!["b", "a", "c"]);
    }

    #[test]
    fn test_is_blank() {
        assert!(is_blank(&row(&[("Title", ""), ("Region", "")])));
        assert!(is_blank(&Row::new()));

        let mut with_none = row(&[("Title", "")]);
        with_none.insert("Region".to_string(), None);
        assert!(is_blank(&with_none));

        assert!(!is_blank(&row(&[("Title", ""), ("Region", "US")])));
        // "0" is a non-empty string and therefore a real value
        assert!(!is_blank(&row(&[("Count", "0")])));
    }

    #[test]
    fn test_drop_blank_rows_before_inference() {
        let rows = vec![
            row(&[("Title", "Alpha"), ("Region", "US")]),
            row(&[("Title", "Beta"), ("Region", "EU")]),
            row(&[("Title", ""), ("Region", "")]),
        ];

        let kept = drop_blank_rows(rows);
        assert_eq!(kept.len(), 2);
        assert_eq!(kept[1], row(&[("Title", "Beta"), ("Region", "EU")]));
        assert_eq!(infer_schema(&kept), vec!["Title", "Region"]);
    }

    #[test]
    fn test_blank_row_keys_do_not_enter_schema() {
        let rows = drop_blank_rows(vec![
            row(&[("Title", "Alpha")]),
            row(&[("__parsed_extra", "")]),
        ]);
        assert_eq!(infer_schema(&rows), vec!["Title"]);
    }
}
