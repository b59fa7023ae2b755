//! Spreadsheet collaborator - survey node coordinates as job overrides
//!
//! A node sheet has one row per surveyed point with a name column and X/Y/Z
//! columns. Each row becomes three flat keys, `{node}_X`, `{node}_Y` and
//! `{node}_Z`, that are merged over the job data before rendering.

mod workbook;

pub use workbook::{list_sheets, parse_workbook_nodes, read_sheet};

use crate::error::{ReportgenError, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};
use std::collections::HashSet;
use tracing::{debug, warn};

/// Make a cell text usable as a placeholder key
pub fn sanitize_key(raw: &str) -> String {
    raw.trim()
        .chars()
        .filter(|c| !matches!(c, '(' | ')'))
        .map(|c| match c {
            ' ' | '/' | '\\' | '-' | '.' | ':' => '_',
            other => other,
        })
        .collect()
}

/// Header names of the node, X, Y and Z columns
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NodeColumns {
    #[serde(rename = "node_column")]
    pub node: String,
    #[serde(rename = "x_column")]
    pub x: String,
    #[serde(rename = "y_column")]
    pub y: String,
    #[serde(rename = "z_column")]
    pub z: String,
}

impl Default for NodeColumns {
    fn default() -> Self {
        Self {
            node: "Node".to_string(),
            x: "X".to_string(),
            y: "Y".to_string(),
            z: "Z".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Empty,
    Number(f64),
    Int(i64),
    Text(String),
    Bool(bool),
}

impl Cell {
    /// Text form used for node names and filters
    pub fn text(&self) -> String {
        match self {
            Cell::Empty => String::new(),
            Cell::Number(n) => n.to_string(),
            Cell::Int(i) => i.to_string(),
            Cell::Text(s) => s.clone(),
            Cell::Bool(b) => b.to_string(),
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Cell::Empty => true,
            Cell::Text(s) => s.trim().is_empty(),
            _ => false,
        }
    }

    /// Job value of the cell; blanks and NaN become `null`
    pub fn to_value(&self) -> Value {
        match self {
            Cell::Empty => Value::Null,
            Cell::Number(n) => Number::from_f64(*n).map_or(Value::Null, Value::Number),
            Cell::Int(i) => Value::Number((*i).into()),
            Cell::Text(s) if s.trim().is_empty() => Value::Null,
            Cell::Text(s) => Value::String(s.clone()),
            Cell::Bool(b) => Value::Bool(*b),
        }
    }
}

/// One worksheet: the first row as headers, the rest as data
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SheetTable {
    pub name: String,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
}

impl SheetTable {
    /// Index of `column`: exact header match first, then case-insensitive
    pub fn column_index(&self, column: &str) -> Result<usize> {
        self.headers
            .iter()
            .position(|h| h == column)
            .or_else(|| {
                let wanted = column.to_lowercase();
                self.headers.iter().position(|h| h.to_lowercase() == wanted)
            })
            .ok_or_else(|| ReportgenError::SheetColumn {
                column: column.to_string(),
                sheet: self.name.clone(),
                found: self.headers.clone(),
            })
    }
}

fn cell(row: &[Cell], idx: usize) -> &Cell {
    row.get(idx).unwrap_or(&Cell::Empty)
}

fn is_blank_name(name: &str) -> bool {
    name.is_empty() || matches!(name.to_lowercase().as_str(), "nan" | "none")
}

/// Unique key for `node`; repeats get `_2`, `_3`, ... in encounter order
fn unique_node(node: String, used: &mut HashSet<String>) -> String {
    if used.insert(node.clone()) {
        return node;
    }
    let mut n = 2;
    loop {
        let candidate = format!("{}_{}", node, n);
        if used.insert(candidate.clone()) {
            return candidate;
        }
        n += 1;
    }
}

/// Turn node rows into flat `{node}_X/Y/Z` keys
///
/// With `only`, rows whose raw node text is not listed are skipped; an empty
/// list means no filter.
pub fn parse_nodes(
    table: &SheetTable,
    columns: &NodeColumns,
    only: Option<&[String]>,
) -> Result<IndexMap<String, Value>> {
    let node_idx = table.column_index(&columns.node)?;
    let axes = [
        ("X", table.column_index(&columns.x)?),
        ("Y", table.column_index(&columns.y)?),
        ("Z", table.column_index(&columns.z)?),
    ];
    let only = only.filter(|names| !names.is_empty());

    let mut used = HashSet::new();
    let mut out = IndexMap::new();
    for (row_no, row) in table.rows.iter().enumerate() {
        let raw = cell(row, node_idx).text();
        if only.is_some_and(|names| !names.iter().any(|n| n == raw.trim())) {
            continue;
        }

        let node = sanitize_key(&raw);
        if is_blank_name(&node) {
            if axes.iter().any(|(_, idx)| !cell(row, *idx).is_empty()) {
                warn!(sheet = %table.name, row = row_no + 2, "skipping row with coordinates but no node name");
            } else {
                debug!(sheet = %table.name, row = row_no + 2, "skipping blank row");
            }
            continue;
        }

        let node = unique_node(node, &mut used);
        for (axis, idx) in axes {
            out.insert(format!("{}_{}", node, axis), cell(row, idx).to_value());
        }
    }

    debug!(sheet = %table.name, keys = out.len(), "parsed node coordinates");
    Ok(out)
}
