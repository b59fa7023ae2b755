//! Render engine - specs plus job data in, named documents out

use crate::context::{build_context, RenderContext};
use crate::error::{ReportgenError, Result};
use crate::filler::{DocxFiller, FillError, TemplateFiller};
use crate::lint::null_placeholders;
use crate::spec::{SpecRepository, TemplateSpec};
use crate::template::{TemplateEngine, TemplateError};
use crate::validate::find_missing;
use indexmap::IndexMap;
use serde_json::{Map, Value};
use std::path::Path;
use tracing::{debug, info, warn};

/// Output filename → filled document bytes, in spec order
pub type RenderOutput = IndexMap<String, Vec<u8>>;

/// Attach the spec name to an engine failure
fn template_error(spec: &TemplateSpec, location: &str, err: TemplateError) -> ReportgenError {
    match err {
        TemplateError::UndefinedKey { key, .. } => ReportgenError::UnresolvedPlaceholder {
            spec: spec.name.clone(),
            placeholder: key,
        },
        other => ReportgenError::TemplateSyntax {
            spec: spec.name.clone(),
            message: format!("{}: {}", location, other),
        },
    }
}

fn fill_error(spec: &TemplateSpec, err: FillError) -> ReportgenError {
    match err {
        FillError::Template { part, source } => template_error(spec, &part, source),
        FillError::Container(reason) => ReportgenError::InvalidTemplate {
            spec: spec.name.clone(),
            path: spec.template_file.clone(),
            reason,
        },
    }
}

fn hex_prefix(bytes: &[u8], len: usize) -> String {
    bytes
        .iter()
        .take(len)
        .map(|b| format!("{:02X}", b))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Load a spec's template and check its container signature
///
/// Shared with the linter so both report the same failures.
pub(crate) fn read_template(spec: &TemplateSpec, filler: &dyn TemplateFiller) -> Result<Vec<u8>> {
    if !spec.template_file.is_file() {
        return Err(ReportgenError::TemplateNotFound {
            spec: spec.name.clone(),
            path: spec.template_file.clone(),
        });
    }

    let bytes = std::fs::read(&spec.template_file)?;
    let signature = filler.signature();
    if !bytes.starts_with(signature) {
        return Err(ReportgenError::InvalidTemplate {
            spec: spec.name.clone(),
            path: spec.template_file.clone(),
            reason: format!(
                "expected signature [{}], found [{}]",
                hex_prefix(signature, signature.len()),
                hex_prefix(&bytes, signature.len())
            ),
        });
    }
    Ok(bytes)
}

/// Renders specs through one templating capability
pub struct Renderer<'a> {
    filler: &'a dyn TemplateFiller,
}

impl<'a> Renderer<'a> {
    pub fn new(filler: &'a dyn TemplateFiller) -> Self {
        Self { filler }
    }

    /// Render one spec to `(filename, bytes)`
    ///
    /// Steps run in a fixed order: template exists, container signature,
    /// context, required fields, document fill, filename. The first failing
    /// step is returned.
    pub fn render_spec(&self, job: &Map<String, Value>, spec: &TemplateSpec) -> Result<(String, Vec<u8>)> {
        let template = read_template(spec, self.filler)?;

        let context = build_context(job, &spec.aliases);
        debug!(spec = %spec.name, "built render context");

        let missing = find_missing(&context, &spec.required_fields);
        if !missing.is_empty() {
            return Err(ReportgenError::MissingFields {
                spec: spec.name.clone(),
                missing,
            });
        }

        if let Ok(declared) = self.filler.declared_placeholders(&template) {
            let blank = null_placeholders(&context, &declared);
            if !blank.is_empty() {
                warn!(
                    spec = %spec.name,
                    placeholders = %blank.join(", "),
                    "placeholders hold null and will render blank"
                );
            }
        }

        let document = self
            .filler
            .fill(&template, &context)
            .map_err(|e| fill_error(spec, e))?;
        let filename = render_filename(spec, &context)?;

        debug!(spec = %spec.name, filename = %filename, bytes = document.len(), "rendered document");
        Ok((filename, document))
    }

    /// Render every spec in order; the first failure aborts the whole call
    pub fn render_all(&self, job: &Map<String, Value>, specs: &[TemplateSpec]) -> Result<RenderOutput> {
        let mut output = RenderOutput::new();
        for spec in specs {
            let (filename, document) = self.render_spec(job, spec)?;
            if output.insert(filename.clone(), document).is_some() {
                warn!(
                    spec = %spec.name,
                    filename = %filename,
                    "output filename already produced by an earlier spec; replacing it"
                );
            }
        }

        info!(specs = specs.len(), outputs = output.len(), "rendered report package");
        Ok(output)
    }
}

/// Evaluate a spec's output pattern against its render context
pub fn render_filename(spec: &TemplateSpec, context: &RenderContext) -> Result<String> {
    TemplateEngine::new()
        .render(&spec.output_pattern, context.template_context())
        .map_err(|e| template_error(spec, "output_pattern", e))
}

/// Load specs from `specs_dir` and render them all as `.docx` documents
///
/// Template paths resolve against `template_root`, or the parent of
/// `specs_dir` when it is `None`.
pub fn render_all_from_dir(
    job: &Map<String, Value>,
    specs_dir: &Path,
    template_root: Option<&Path>,
) -> Result<RenderOutput> {
    let mut repository = SpecRepository::new(specs_dir);
    if let Some(root) = template_root {
        repository = repository.with_template_root(root);
    }
    let specs = repository.load()?;
    let filler = DocxFiller::new();
    Renderer::new(&filler).render_all(job, &specs)
}
