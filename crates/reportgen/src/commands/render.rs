//! Render command - fill every template for one job

use super::explain;
use crate::cli::{GlobalArgs, RenderArgs};
use crate::context::Context;
use anyhow::{Context as _, Result};
use colored::Colorize;
use reportgen_core::filler::DocxFiller;
use reportgen_core::interchange::load_job_file;
use reportgen_core::job::render_input;
use reportgen_core::render::Renderer;
use reportgen_core::session::{bundle_zip, flatten_output_names};
use reportgen_core::sheet::parse_workbook_nodes;
use std::fs;

/// Render all specs for `--job` and write the documents to the output directory
///
/// Nothing is written unless every spec renders.
pub fn run(args: RenderArgs, global: &GlobalArgs) -> Result<()> {
    let ctx = Context::new(global)?;
    let raw = load_job_file(&args.job)?;

    let overrides = match (&args.sheet, &args.sheet_name) {
        (Some(sheet), Some(sheet_name)) => {
            let bytes = fs::read(sheet)
                .with_context(|| format!("Failed to read spreadsheet {}", sheet.display()))?;
            let nodes = parse_workbook_nodes(
                &bytes,
                sheet_name,
                &ctx.node_columns(),
                Some(args.nodes.as_slice()),
            )?;
            if global.verbose {
                println!("{} Merged {} node keys from '{}'", "→".cyan(), nodes.len(), sheet_name);
            }
            nodes
        }
        _ => Default::default(),
    };

    let input = render_input(&raw, overrides).map_err(explain)?;
    let specs = ctx.load_specs(args.specs.as_deref())?;
    if specs.is_empty() {
        println!("{} No template specs found", "!".yellow());
        return Ok(());
    }

    let filler = DocxFiller::new();
    let outputs = Renderer::new(&filler).render_all(&input, &specs).map_err(explain)?;

    let out_dir = ctx.output_dir(args.out.as_deref());
    fs::create_dir_all(&out_dir)
        .with_context(|| format!("Failed to create output directory {}", out_dir.display()))?;

    let files = flatten_output_names(&outputs);
    for (name, bytes) in &files {
        let path = out_dir.join(name);
        fs::write(&path, bytes).with_context(|| format!("Failed to write {}", path.display()))?;
        println!("{} {}", "✓".green(), path.display());
    }

    if let Some(name) = args.zip {
        let name = name.unwrap_or_else(|| ctx.bundle_name());
        let path = out_dir.join(name);
        fs::write(&path, bundle_zip(&files)?)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        println!("{} {}", "✓".green(), path.display());
    }

    println!(
        "\n{} Rendered {} document(s) from {} spec(s)",
        "→".cyan(),
        files.len(),
        specs.len()
    );
    Ok(())
}
