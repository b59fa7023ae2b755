//! Sheets command - list worksheet names

use crate::output::print_text;
use anyhow::{Context as _, Result};
use reportgen_core::sheet::list_sheets;
use std::fs;
use std::path::PathBuf;

pub fn run(file: PathBuf) -> Result<()> {
    let bytes =
        fs::read(&file).with_context(|| format!("Failed to read spreadsheet {}", file.display()))?;
    for name in list_sheets(&bytes)? {
        print_text(&name)?;
    }
    Ok(())
}
