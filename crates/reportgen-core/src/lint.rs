//! Placeholder linter - which template placeholders would not resolve
//!
//! Runs the same context building as a render but compares the template's
//! declared placeholders against the context instead of filling anything.

use crate::context::{build_context, RenderContext};
use crate::error::Result;
use crate::filler::TemplateFiller;
use crate::render::read_template;
use crate::spec::{SpecRepository, TemplateSpec};
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::BTreeSet;
use std::path::Path;
use tracing::{debug, info};

/// Lint outcome for one spec
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LintResult {
    /// Spec name
    pub template: String,
    /// Declared placeholders the context cannot supply, sorted
    pub unresolved: Vec<String>,
    /// Declared placeholders holding `null`; they render as empty text
    pub blank: Vec<String>,
    /// Why the spec could not be linted at all
    pub error: Option<String>,
}

impl LintResult {
    fn failed(spec: &TemplateSpec, error: String) -> Self {
        Self {
            template: spec.name.clone(),
            unresolved: Vec::new(),
            blank: Vec::new(),
            error: Some(error),
        }
    }

    /// No error and nothing unresolved
    pub fn is_clean(&self) -> bool {
        self.error.is_none() && self.unresolved.is_empty()
    }
}

/// Exact path present, or any ancestor of it present
///
/// Ancestors count so that leaves the flattener cannot enumerate do not show
/// up as false positives.
fn is_resolvable(placeholder: &str, available: &BTreeSet<String>) -> bool {
    if available.contains(placeholder) {
        return true;
    }
    placeholder
        .match_indices('.')
        .any(|(idx, _)| available.contains(&placeholder[..idx]))
}

/// Declared placeholders whose context value is `null`, sorted
pub fn null_placeholders(context: &RenderContext, declared: &BTreeSet<String>) -> Vec<String> {
    declared.iter().filter(|p| context.is_null(p)).cloned().collect()
}

fn lint_spec(spec: &TemplateSpec, job: &Map<String, Value>, filler: &dyn TemplateFiller) -> LintResult {
    let template = match read_template(spec, filler) {
        Ok(bytes) => bytes,
        Err(e) => return LintResult::failed(spec, e.to_string()),
    };
    let declared = match filler.declared_placeholders(&template) {
        Ok(declared) => declared,
        Err(e) => return LintResult::failed(spec, format!("[{}] {}", spec.name, e)),
    };

    let context = build_context(job, &spec.aliases);
    let available = context.flatten_paths();
    let blank = null_placeholders(&context, &declared);
    let unresolved: Vec<String> = declared
        .into_iter()
        .filter(|p| !is_resolvable(p, &available))
        .collect();

    debug!(spec = %spec.name, unresolved = unresolved.len(), blank = blank.len(), "linted spec");
    LintResult {
        template: spec.name.clone(),
        unresolved,
        blank,
        error: None,
    }
}

/// Lint already-loaded specs; never fails as a whole
pub fn lint_specs(
    specs: &[TemplateSpec],
    job: &Map<String, Value>,
    filler: &dyn TemplateFiller,
) -> Vec<LintResult> {
    let results: Vec<LintResult> = specs.iter().map(|s| lint_spec(s, job, filler)).collect();
    info!(
        specs = results.len(),
        clean = results.iter().filter(|r| r.is_clean()).count(),
        "lint finished"
    );
    results
}

/// Load specs and lint each one
///
/// # Errors
///
/// Only when the spec set itself cannot be loaded. Per-spec problems are
/// reported in [`LintResult::error`].
pub fn lint(
    specs_dir: &Path,
    template_root: Option<&Path>,
    job: &Map<String, Value>,
    filler: &dyn TemplateFiller,
) -> Result<Vec<LintResult>> {
    let mut repository = SpecRepository::new(specs_dir);
    if let Some(root) = template_root {
        repository = repository.with_template_root(root);
    }
    Ok(lint_specs(&repository.load()?, job, filler))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::TextFiller;
    use reportgen_testkit::ProjectFixture;
    use serde_json::json;

    fn available(paths: &[&str]) -> BTreeSet<String> {
        paths.iter().map(|p| p.to_string()).collect()
    }

    fn job(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_ancestor_prefix_makes_placeholder_resolvable() {
        let paths = available(&["Equipment", "Equipment.MBES"]);
        assert!(is_resolvable("Equipment.MBES.Make", &paths));
        assert!(!is_resolvable("Nonexistent.Field", &paths));
    }

    #[test]
    fn test_prefix_must_end_on_a_segment_boundary() {
        let paths = available(&["Equip"]);
        assert!(!is_resolvable("Equipment.MBES", &paths));
        assert!(is_resolvable("Equip.Anything", &paths));
    }

    #[test]
    fn test_lint_reports_unresolved_and_errors_per_spec() {
        let project = ProjectFixture::new();
        project
            .file(
                "templates/a.txt",
                &TextFiller::template("{{ProjectName}} {{Vessel}} {{Equipment.MBES.Make}} {{Ghost.Field}}"),
            )
            .file("templates/plain.txt", b"no header")
            .spec(
                "a",
                "template_file: templates/a.txt\noutput_pattern: a.txt\naliases:\n  Vessel: SurveyVessel\n",
            )
            .spec("b", "template_file: templates/missing.txt\noutput_pattern: b.txt\n")
            .spec("c", "template_file: templates/plain.txt\noutput_pattern: c.txt\n");

        let data = job(json!({"ProjectName": "P"}));
        let results = lint(&project.specs_dir(), None, &data, &TextFiller::default()).unwrap();

        assert_eq!(results.len(), 3);
        assert_eq!(results[0].template, "a");
        assert_eq!(results[0].unresolved, vec!["Equipment.MBES.Make", "Ghost.Field"]);
        assert!(results[0].error.is_none());

        let missing = results[1].error.as_deref().unwrap();
        assert!(missing.starts_with("TEMPLATE_NOT_FOUND"));
        let invalid = results[2].error.as_deref().unwrap();
        assert!(invalid.starts_with("INVALID_TEMPLATE"));
        assert!(!results[2].is_clean());
    }

    #[test]
    fn test_alias_targets_count_as_available() {
        let project = ProjectFixture::new();
        project
            .file("t.txt", &TextFiller::template("{{Vessel}}"))
            .spec(
                "v",
                "template_file: t.txt\noutput_pattern: v.txt\naliases:\n  Vessel: SurveyVessel\n",
            );

        let results = lint(&project.specs_dir(), Some(project.root()), &job(json!({})), &TextFiller::default())
            .unwrap();
        assert!(results[0].is_clean());
    }

    #[test]
    fn test_null_placeholders_are_reported_as_blank() {
        let project = ProjectFixture::new();
        project
            .file("t.txt", &TextFiller::template("{{ProjectName}} {{Vessel}} {{Notes}}"))
            .spec(
                "v",
                "template_file: t.txt\noutput_pattern: v.txt\naliases:\n  Vessel: SurveyVessel\n",
            );

        let data = job(json!({"ProjectName": "P", "Notes": null}));
        let results = lint(&project.specs_dir(), Some(project.root()), &data, &TextFiller::default()).unwrap();
        assert_eq!(results[0].blank, vec!["Notes", "Vessel"]);
        assert!(results[0].unresolved.is_empty());
        assert!(results[0].is_clean());
    }

    #[test]
    fn test_spec_set_failure_is_an_error() {
        let project = ProjectFixture::new();
        project.spec("broken", "output_pattern: x\n");

        let result = lint(&project.specs_dir(), None, &job(json!({})), &TextFiller::default());
        assert!(result.is_err());
    }
}
