//! Convert command - job interchange between YAML and JSON

use crate::output::print_text;
use anyhow::Result;
use colored::Colorize;
use reportgen_core::interchange::{load_job_file, save_job_file};
use std::path::PathBuf;

pub fn run(input: PathBuf, output: PathBuf) -> Result<()> {
    let job = load_job_file(&input)?;
    save_job_file(&output, &job)?;
    print_text(&format!(
        "{} Converted {} → {}",
        "✓".green(),
        input.display(),
        output.display()
    ))?;
    Ok(())
}
