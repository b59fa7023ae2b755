//! Nodes command - print the node keys a worksheet contributes to a render

use crate::cli::GlobalArgs;
use crate::context::Context;
use crate::output::{print_json, print_text};
use anyhow::{Context as _, Result};
use colored::Colorize;
use reportgen_core::sheet::parse_workbook_nodes;
use serde_json::Value;
use std::fs;
use std::path::PathBuf;

pub fn run(
    file: PathBuf,
    sheet: String,
    nodes: Vec<String>,
    json: bool,
    global: &GlobalArgs,
) -> Result<()> {
    let ctx = Context::new(global)?;
    let bytes =
        fs::read(&file).with_context(|| format!("Failed to read spreadsheet {}", file.display()))?;
    let keys = parse_workbook_nodes(&bytes, &sheet, &ctx.node_columns(), Some(nodes.as_slice()))?;

    if json {
        print_json(&serde_json::to_string_pretty(&keys)?)?;
        return Ok(());
    }

    if keys.is_empty() {
        print_text(&format!("{} No nodes found in '{}'", "!".yellow(), sheet))?;
        return Ok(());
    }
    for (key, value) in &keys {
        let value = match value {
            Value::Null => String::new(),
            other => other.to_string(),
        };
        print_text(&format!("{key} = {value}"))?;
    }
    Ok(())
}
