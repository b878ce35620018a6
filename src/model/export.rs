//! Export projection - the column-pruned rows handed to the serializer

use super::row::Row;
use std::collections::HashMap;

/// Rows to serialize together with the header they should be written under
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExportPayload {
    /// Visible columns in schema order
    pub columns: Vec<String>,
    pub rows: Vec<Row>,
}

impl ExportPayload {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Keep only the visible columns of each row, in schema order
///
/// Values are passed through untouched. A visible column the source row
/// does not have is omitted from that row; the serializer writes it as an
/// empty field.
pub fn project<'a, I>(rows: I, schema: &[String], visibility: &HashMap<String, bool>) -> Vec<Row>
where
    I: IntoIterator<Item = &'a Row>,
{
    let visible: Vec<&String> = schema
        .iter()
        .filter(|col| visibility.get(*col).copied().unwrap_or(false))
        .collect();

    rows.into_iter()
        .map(|row| {
            visible
                .iter()
                .filter_map(|col| {
                    row.get(col.as_str())
                        .map(|value| ((*col).clone(), value.clone()))
                })
                .collect()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::row::row;
    use pretty_assertions::assert_eq;

    fn schema() -> Vec<String> {
        vec!["Title".to_string(), "Region".to_string()]
    }

    #[test]
    fn test_project_drops_hidden_columns() {
        let visibility =
            HashMap::from([("Title".to_string(), true), ("Region".to_string(), false)]);
        let rows = vec![row(&[("Title", "A"), ("Region", "US")])];

        let projected = project(&rows, &schema(), &visibility);
        assert_eq!(projected, vec![row(&[("Title", "A")])]);
    }

    #[test]
    fn test_project_follows_schema_order() {
        let visibility = HashMap::from([("Title".to_string(), true), ("Region".to_string(), true)]);
        let rows = vec![row(&[("Region", "EU"), ("Title", "B")])];

        let projected = project(&rows, &schema(), &visibility);
        let keys: Vec<&String> = projected[0].keys().collect();
        assert_eq!(keys, vec!["Title", "Region"]);
    }

    #[test]
    fn test_project_omits_absent_visible_keys_and_keeps_none() {
        let visibility = HashMap::from([("Title".to_string(), true), ("Region".to_string(), true)]);
        let mut with_none = row(&[("Title", "C")]);
        with_none.insert("Region".to_string(), None);
        let rows = vec![row(&[("Title", "B")]), with_none.clone()];

        let projected = project(&rows, &schema(), &visibility);
        assert_eq!(projected[0], row(&[("Title", "B")]));
        assert_eq!(projected[1], with_none);
    }

    #[test]
    fn test_project_never_emits_hidden_keys() {
        let visibility =
            HashMap::from([("Title".to_string(), false), ("Region".to_string(), true)]);
        let rows = vec![
            row(&[("Title", "A"), ("Region", "US")]),
            row(&[("Title", "B"), ("Region", "EU"), ("Extra", "x")]),
        ];

        for out in project(&rows, &schema(), &visibility) {
            assert!(!out.contains_key("Title"));
            assert!(!out.contains_key("Extra"));
            assert!(out.contains_key("Region"));
        }
    }

    #[test]
    fn test_project_empty_input() {
        let visibility = HashMap::from([("Title".to_string(), true)]);
        assert!(project(&Vec::<Row>::new(), &schema(), &visibility).is_empty());
    }
}
