//! Specs command - list the loaded template specs

use crate::cli::GlobalArgs;
use crate::context::Context;
use crate::output::{print_json, print_text};
use anyhow::Result;
use colored::Colorize;
use serde_json::json;
use std::path::PathBuf;

pub fn run(specs: Option<PathBuf>, json: bool, global: &GlobalArgs) -> Result<()> {
    let ctx = Context::new(global)?;
    let specs_dir = ctx.specs_dir(specs.as_deref());
    let specs = ctx.load_specs(specs.as_deref())?;

    if json {
        let list: Vec<_> = specs
            .iter()
            .map(|spec| {
                json!({
                    "name": spec.name,
                    "template_file": spec.template_file.display().to_string(),
                    "output_pattern": spec.output_pattern,
                    "required_fields": spec.required_fields.len(),
                    "aliases": spec.aliases.len(),
                })
            })
            .collect();
        print_json(&serde_json::to_string_pretty(&list)?)?;
        return Ok(());
    }

    if specs.is_empty() {
        print_text(&format!(
            "{} No template specs in {}",
            "!".yellow(),
            specs_dir.display()
        ))?;
        return Ok(());
    }

    for spec in &specs {
        print_text(&format!(
            "{} {}\n    template: {}\n    output:   {}\n    required: {}  aliases: {}",
            "→".cyan(),
            spec.name.bold(),
            spec.template_file.display(),
            spec.output_pattern,
            spec.required_fields.len(),
            spec.aliases.len()
        ))?;
    }
    Ok(())
}
