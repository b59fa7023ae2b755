//! Validate command - check a job file against the job schema

use crate::output::{bullets, print_json, print_text};
use anyhow::{Result, anyhow};
use colored::Colorize;
use reportgen_core::interchange::load_job_file;
use reportgen_core::job::validate_job;
use serde_json::json;
use std::path::PathBuf;

pub fn run(job: PathBuf, json: bool) -> Result<()> {
    let raw = load_job_file(&job)?;
    let violations = match validate_job(&raw) {
        Ok(_) => Vec::new(),
        Err(violations) => violations,
    };

    if json {
        let report = json!({
            "job": job.display().to_string(),
            "valid": violations.is_empty(),
            "violations": violations,
        });
        print_json(&serde_json::to_string_pretty(&report)?)?;
    } else if violations.is_empty() {
        print_text(&format!("{} {} is valid", "✓".green(), job.display()))?;
    } else {
        print_text(&format!(
            "{} {} has {} problem(s)\n{}",
            "✗".red(),
            job.display(),
            violations.len(),
            bullets(&violations)
        ))?;
    }

    if violations.is_empty() {
        Ok(())
    } else {
        Err(anyhow!("{} is not a valid job", job.display()))
    }
}
