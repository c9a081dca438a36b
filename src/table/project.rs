//! Projection of a multi-page result onto one shared column set.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::{Map, Value};

use super::columns::order_columns;
use super::flatten::{cell_text, flatten_fields};
use crate::result::ExtractionResult;

/// One extraction result rendered as a flat table.
#[derive(Debug, Clone, Serialize)]
pub struct DocumentTable {
    pub doc_type: String,
    pub ordered_columns: Vec<String>,
    pub rows: Vec<TableRow>,
}

/// One page projected onto the table's columns. Columns the page has no
/// value for hold the empty string.
#[derive(Debug, Clone, Serialize)]
pub struct TableRow {
    /// Page label shown to the reader: the declared page number when it is
    /// a positive integer, otherwise the 1-based page position.
    pub label: u64,
    pub cells: BTreeMap<String, String>,
}

/// Project a result's pages onto the union of their flattened columns.
///
/// Returns `None` when the result has no pages to project.
pub fn project_table(result: &ExtractionResult) -> Option<DocumentTable> {
    let pages = result.pages();
    if pages.is_empty() {
        return None;
    }

    let flattened: Vec<Map<String, Value>> = pages
        .iter()
        .map(|page| page.fields.map(flatten_fields).unwrap_or_default())
        .collect();

    let ordered_columns = order_columns(
        flattened
            .iter()
            .flat_map(|flat| flat.keys().cloned()),
    );

    let rows = pages
        .iter()
        .zip(&flattened)
        .enumerate()
        .map(|(idx, (page, flat))| {
            let label = match page.number {
                Some(n) if n > 0 => n,
                _ => idx as u64 + 1,
            };
            let cells = ordered_columns
                .iter()
                .map(|key| {
                    let text = flat.get(key).map(cell_text).unwrap_or_default();
                    (key.clone(), text)
                })
                .collect();
            TableRow { label, cells }
        })
        .collect();

    Some(DocumentTable {
        doc_type: result.doc_type().to_string(),
        ordered_columns,
        rows,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn result(v: Value) -> ExtractionResult {
        ExtractionResult::new(v)
    }

    #[test]
    fn pages_share_the_union_of_columns() {
        let table = project_table(&result(json!({
            "document_type": "invoice",
            "pages": [
                {"page": 1, "fields": {"customer": {"first_name": "Ada"}, "total": 12.5}},
                {"page": 2, "fields": {"total": 99}}
            ]
        })))
        .unwrap();

        assert_eq!(table.doc_type, "invoice");
        assert_eq!(table.ordered_columns, vec!["first_name", "total"]);
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[0].cells["first_name"], "Ada");
        assert_eq!(table.rows[0].cells["total"], "12.5");
        // Absent columns render as empty cells.
        assert_eq!(table.rows[1].cells["first_name"], "");
        assert_eq!(table.rows[1].cells["total"], "99");
    }

    #[test]
    fn missing_or_zero_page_numbers_fall_back_to_position() {
        let table = project_table(&result(json!({
            "pages": [
                {"fields": {"a": 1}},
                {"page": 0, "fields": {"a": 2}},
                {"page": 7, "fields": {"a": 3}}
            ]
        })))
        .unwrap();

        let labels: Vec<u64> = table.rows.iter().map(|r| r.label).collect();
        assert_eq!(labels, vec![1, 2, 7]);
    }

    #[test]
    fn legacy_fields_project_as_one_row() {
        let table = project_table(&result(json!({
            "fields": {"name": "Ada", "email": "ada@example.com"}
        })))
        .unwrap();

        assert_eq!(table.rows.len(), 1);
        assert_eq!(table.rows[0].label, 1);
        assert_eq!(table.ordered_columns, vec!["name", "email"]);
        assert_eq!(table.rows[0].cells["name"], "Ada");
    }

    #[test]
    fn page_without_fields_projects_empty_cells() {
        let table = project_table(&result(json!({
            "pages": [
                {"page": 1, "fields": {"a": 1}},
                {"page": 2}
            ]
        })))
        .unwrap();

        assert_eq!(table.rows[1].cells["a"], "");
    }

    #[test]
    fn no_pages_yields_no_table() {
        assert!(project_table(&result(json!({}))).is_none());
        assert!(project_table(&result(Value::Null)).is_none());
        assert!(project_table(&result(json!({"other": 1}))).is_none());
    }

    #[test]
    fn identity_columns_lead_the_projection() {
        let table = project_table(&result(json!({
            "pages": [
                {"page": 1, "fields": {"zip": "10115", "first_name": "Ada", "last_name": "Lovelace"}}
            ]
        })))
        .unwrap();

        assert_eq!(table.ordered_columns, vec!["first_name", "last_name", "zip"]);
    }
}
