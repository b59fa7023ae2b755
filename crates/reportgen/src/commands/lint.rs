//! Lint command - report placeholders the job cannot supply

use crate::cli::GlobalArgs;
use crate::context::Context;
use crate::output::{bullets, print_json, print_text};
use anyhow::{Result, anyhow};
use colored::Colorize;
use reportgen_core::filler::DocxFiller;
use reportgen_core::interchange::load_job_file;
use reportgen_core::lint::{LintResult, lint_specs};
use std::path::PathBuf;

/// Lint every spec against the job file
///
/// # Exit Code
///
/// Unresolved placeholders are a report, not a failure: exits 0 unless the
/// job or the spec set cannot be loaded.
pub fn run(job: PathBuf, specs: Option<PathBuf>, json: bool, global: &GlobalArgs) -> Result<()> {
    let ctx = Context::new(global)?;
    let data = load_job_file(&job)?;
    let data = data
        .as_object()
        .ok_or_else(|| anyhow!("Job data must be a mapping"))?;

    let specs = ctx.load_specs(specs.as_deref())?;
    let results = lint_specs(&specs, data, &DocxFiller::new());

    if json {
        print_json(&serde_json::to_string_pretty(&results)?)?;
    } else {
        render_human(&results)?;
    }
    Ok(())
}

fn render_human(results: &[LintResult]) -> Result<()> {
    if results.is_empty() {
        print_text(&format!("{} No template specs found", "!".yellow()))?;
        return Ok(());
    }

    for result in results {
        let line = match (&result.error, result.unresolved.len()) {
            (Some(error), _) => format!("{} {}: {}", "✗".red(), result.template, error),
            (None, 0) => format!("{} {}", "✓".green(), result.template),
            (None, n) => format!(
                "{} {}: {} unresolved placeholder(s)\n{}",
                "!".yellow(),
                result.template,
                n,
                bullets(&result.unresolved)
            ),
        };
        print_text(&line)?;
        if result.error.is_none() && !result.blank.is_empty() {
            print_text(&format!(
                "  {} {} placeholder(s) hold null and will render blank\n{}",
                "!".yellow(),
                result.blank.len(),
                bullets(&result.blank)
            ))?;
        }
    }

    let clean = results.iter().filter(|r| r.is_clean()).count();
    print_text(&format!(
        "\n{} {}/{} spec(s) clean",
        "→".cyan(),
        clean,
        results.len()
    ))?;
    Ok(())
}
