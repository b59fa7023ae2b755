//! Workbook access (`.xlsx`, `.xlsm`, `.xls`, `.ods`) through calamine

use super::{parse_nodes, Cell, NodeColumns, SheetTable};
use crate::error::{ReportgenError, Result};
use calamine::{open_workbook_auto_from_rs, Data, Reader, Sheets};
use indexmap::IndexMap;
use serde_json::Value;
use std::io::Cursor;

type Workbook = Sheets<Cursor<Vec<u8>>>;

fn open(bytes: &[u8]) -> Result<Workbook> {
    open_workbook_auto_from_rs(Cursor::new(bytes.to_vec()))
        .map_err(|e| ReportgenError::SheetRead(e.to_string()))
}

fn to_cell(data: &Data) -> Cell {
    match data {
        Data::Empty => Cell::Empty,
        Data::Int(i) => Cell::Int(*i),
        Data::Float(f) => Cell::Number(*f),
        Data::Bool(b) => Cell::Bool(*b),
        Data::String(s) => Cell::Text(s.clone()),
        Data::DateTime(dt) => Cell::Number(dt.as_f64()),
        Data::DateTimeIso(s) | Data::DurationIso(s) => Cell::Text(s.clone()),
        Data::Error(e) => Cell::Text(e.to_string()),
    }
}

/// Worksheet names in workbook order
pub fn list_sheets(bytes: &[u8]) -> Result<Vec<String>> {
    Ok(open(bytes)?.sheet_names())
}

/// Read one worksheet; the first row holds the headers
pub fn read_sheet(bytes: &[u8], sheet: &str) -> Result<SheetTable> {
    let mut workbook = open(bytes)?;
    let available = workbook.sheet_names();
    if !available.iter().any(|name| name == sheet) {
        return Err(ReportgenError::SheetNotFound {
            sheet: sheet.to_string(),
            available,
        });
    }

    let range = workbook
        .worksheet_range(sheet)
        .map_err(|e| ReportgenError::SheetRead(e.to_string()))?;

    let mut rows = range.rows();
    let headers: Vec<String> = rows
        .next()
        .map(|row| row.iter().map(|c| to_cell(c).text().trim().to_string()).collect())
        .unwrap_or_default();
    let rows: Vec<Vec<Cell>> = rows.map(|row| row.iter().map(to_cell).collect()).collect();

    Ok(SheetTable {
        name: sheet.to_string(),
        headers,
        rows,
    })
}

/// [`read_sheet`] followed by [`parse_nodes`]
pub fn parse_workbook_nodes(
    bytes: &[u8],
    sheet: &str,
    columns: &NodeColumns,
    only: Option<&[String]>,
) -> Result<IndexMap<String, Value>> {
    parse_nodes(&read_sheet(bytes, sheet)?, columns, only)
}

#[cfg(test)]
mod tests {
    use super::*;
    use reportgen_testkit::{xlsx_with_rows, xlsx_with_sheets};
    use serde_json::json;

    fn survey_workbook() -> Vec<u8> {
        let nodes: &[&[&str]] = &[
            &[" Node ", "X", "Y", "Z"],
            &["Port Ant", "512345.25", "6123456.5", "-2.75"],
            &["Stbd Ant", "", "6123460.5", "-2.5"],
        ];
        let summary: &[&[&str]] = &[&["Vessel"], &["Sea Star"]];
        xlsx_with_sheets(&[("Summary", summary), ("Nodes", nodes)])
    }

    #[test]
    fn test_sheets_listed_in_workbook_order() {
        assert_eq!(list_sheets(&survey_workbook()).unwrap(), vec!["Summary", "Nodes"]);
    }

    #[test]
    fn test_first_row_becomes_trimmed_headers() {
        let table = read_sheet(&survey_workbook(), "Nodes").unwrap();
        assert_eq!(table.name, "Nodes");
        assert_eq!(table.headers, vec!["Node", "X", "Y", "Z"]);
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[0][0], Cell::Text("Port Ant".to_string()));
        assert_eq!(table.rows[0][1], Cell::Number(512345.25));
        assert_eq!(table.rows[1][1], Cell::Empty);
    }

    #[test]
    fn test_missing_sheet_lists_available_names() {
        let bytes = xlsx_with_rows("Nodes", &[&["Node"]]);
        match read_sheet(&bytes, "Offsets").unwrap_err() {
            ReportgenError::SheetNotFound { sheet, available } => {
                assert_eq!(sheet, "Offsets");
                assert_eq!(available, vec!["Nodes"]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_workbook_nodes_become_axis_keys() {
        let nodes = parse_workbook_nodes(&survey_workbook(), "Nodes", &NodeColumns::default(), None).unwrap();

        let keys: Vec<&str> = nodes.keys().map(String::as_str).collect();
        assert_eq!(
            keys,
            vec!["Port_Ant_X", "Port_Ant_Y", "Port_Ant_Z", "Stbd_Ant_X", "Stbd_Ant_Y", "Stbd_Ant_Z"]
        );
        assert_eq!(nodes["Port_Ant_X"], json!(512345.25));
        assert_eq!(nodes["Port_Ant_Z"], json!(-2.75));
        assert_eq!(nodes["Stbd_Ant_X"], Value::Null);
    }

    #[test]
    fn test_workbook_nodes_honour_only_filter() {
        let only = vec!["Stbd Ant".to_string()];
        let nodes =
            parse_workbook_nodes(&survey_workbook(), "Nodes", &NodeColumns::default(), Some(only.as_slice())).unwrap();
        assert_eq!(nodes.len(), 3);
        assert_eq!(nodes["Stbd_Ant_Y"], json!(6123460.5));
    }

    #[test]
    fn test_non_workbook_bytes_are_a_read_error() {
        let err = list_sheets(b"Node,X,Y,Z\nA1,1,2,3\n").unwrap_err();
        assert_eq!(err.code(), "SHEET_READ_ERROR");
    }

    #[test]
    fn test_data_cells_convert() {
        assert_eq!(to_cell(&Data::Empty), Cell::Empty);
        assert_eq!(to_cell(&Data::Int(3)), Cell::Int(3));
        assert_eq!(to_cell(&Data::Float(1.25)), Cell::Number(1.25));
        assert_eq!(to_cell(&Data::String("A1".to_string())), Cell::Text("A1".to_string()));
        assert_eq!(to_cell(&Data::Bool(true)), Cell::Bool(true));
    }
}
