//! Session - the named jobs a user is working on and their last render
//!
//! Everything a front end needs to keep between interactions lives in one
//! [`Session`] value that is passed around explicitly.

use crate::dotted::set_by_dotted;
use crate::error::{ReportgenError, Result};
use crate::filler::TemplateFiller;
use crate::interchange::{load_job, save_job, JobFormat};
use crate::job::{merge_overrides, render_input};
use crate::lint::{lint_specs, LintResult};
use crate::render::{RenderOutput, Renderer};
use crate::spec::TemplateSpec;
use indexmap::IndexMap;
use serde_json::{json, Map, Value};
use std::io::{Cursor, Write};
use std::path::Path;
use tracing::{debug, info, warn};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

const FIRST_JOB: &str = "Job 1";

#[derive(Debug, Clone)]
pub struct Session {
    jobs: IndexMap<String, Map<String, Value>>,
    current: String,
    overrides: IndexMap<String, Value>,
    outputs: RenderOutput,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    /// One job, `Job 1`, with a blank project name and a default date
    pub fn new() -> Self {
        let mut first = Map::new();
        first.insert("ProjectName".to_string(), json!(""));
        first.insert("Date".to_string(), json!("2025-01-01"));

        let mut jobs = IndexMap::new();
        jobs.insert(FIRST_JOB.to_string(), first);
        Self {
            jobs,
            current: FIRST_JOB.to_string(),
            overrides: IndexMap::new(),
            outputs: RenderOutput::new(),
        }
    }

    pub fn job_names(&self) -> impl Iterator<Item = &str> {
        self.jobs.keys().map(String::as_str)
    }

    pub fn current_name(&self) -> &str {
        &self.current
    }

    /// Raw data of the current job
    pub fn current(&self) -> &Map<String, Value> {
        // `current` always names an existing job
        &self.jobs[self.current.as_str()]
    }

    fn current_mut(&mut self) -> &mut Map<String, Value> {
        self.jobs.entry(self.current.clone()).or_default()
    }

    fn insert_and_select(&mut self, name: String, data: Map<String, Value>) -> &str {
        debug!(job = %name, "selected job");
        self.jobs.insert(name.clone(), data);
        self.current = name;
        &self.current
    }

    /// Add an empty job named `Job N` and select it
    pub fn new_job(&mut self) -> &str {
        let mut n = self.jobs.len() + 1;
        while self.jobs.contains_key(&format!("Job {}", n)) {
            n += 1;
        }
        self.insert_and_select(format!("Job {}", n), Map::new())
    }

    /// Copy the current job to `<current> (copy)` and select the copy
    ///
    /// An existing job of that name is replaced.
    pub fn copy_job(&mut self) -> &str {
        let name = format!("{} (copy)", self.current);
        let data = self.current().clone();
        self.insert_and_select(name, data)
    }

    pub fn select(&mut self, name: &str) -> Result<()> {
        if !self.jobs.contains_key(name) {
            return Err(ReportgenError::JobNotFound(name.to_string()));
        }
        self.current = name.to_string();
        Ok(())
    }

    /// Set one field of the current job; dotted paths create nested mappings
    pub fn set_field(&mut self, path: &str, value: Value) {
        set_by_dotted(self.current_mut(), path, value);
    }

    /// Replace the current job's data with a parsed job file
    pub fn load_current(&mut self, bytes: &[u8], format: JobFormat) -> Result<()> {
        let Value::Object(data) = load_job(bytes, format)? else {
            return Err(ReportgenError::JobFormat(
                "job data must be a mapping at the top level".to_string(),
            ));
        };
        *self.current_mut() = data;
        info!(job = %self.current, format = %format, "loaded job data");
        Ok(())
    }

    pub fn export_current(&self, format: JobFormat) -> Result<String> {
        save_job(&Value::Object(self.current().clone()), format)
    }

    /// Spreadsheet-derived keys merged over every render and lint
    pub fn set_overrides(&mut self, overrides: IndexMap<String, Value>) {
        self.overrides = overrides;
    }

    pub fn overrides(&self) -> &IndexMap<String, Value> {
        &self.overrides
    }

    /// Schema-check the current job, merge overrides and render every spec
    ///
    /// On success the result replaces the stored outputs; on failure the
    /// previous outputs are kept.
    pub fn render_all(
        &mut self,
        specs: &[TemplateSpec],
        filler: &dyn TemplateFiller,
    ) -> Result<&RenderOutput> {
        let raw = Value::Object(self.current().clone());
        let input = render_input(&raw, self.overrides.clone())?;
        self.outputs = Renderer::new(filler).render_all(&input, specs)?;
        Ok(&self.outputs)
    }

    /// Lint the current job (plus overrides) as entered, without schema checks
    pub fn lint(&self, specs: &[TemplateSpec], filler: &dyn TemplateFiller) -> Vec<LintResult> {
        let mut input = self.current().clone();
        merge_overrides(&mut input, self.overrides.clone());
        lint_specs(specs, &input, filler)
    }

    /// Outputs of the last successful render
    pub fn outputs(&self) -> &RenderOutput {
        &self.outputs
    }
}

/// Final path component of an output filename
pub fn output_file_name(filename: &str) -> String {
    Path::new(filename)
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| filename.to_string())
}

/// Re-key outputs by the file name they are written under
///
/// Outputs whose names share a final path component collapse onto one file;
/// the last one wins and a warning is logged.
pub fn flatten_output_names(outputs: &RenderOutput) -> RenderOutput {
    let mut flat = RenderOutput::new();
    for (filename, bytes) in outputs {
        let name = output_file_name(filename);
        if flat.insert(name.clone(), bytes.clone()).is_some() {
            warn!(
                filename = %filename,
                file = %name,
                "output file name already used by an earlier output; replacing it"
            );
        }
    }
    flat
}

/// Pack every output into one deflated zip archive, one entry per file name
pub fn bundle_zip(outputs: &RenderOutput) -> Result<Vec<u8>> {
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    for (name, bytes) in flatten_output_names(outputs) {
        zip.start_file(name, options)?;
        zip.write_all(&bytes)?;
    }

    Ok(zip.finish()?.into_inner())
}
