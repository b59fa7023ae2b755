use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Alias names use this sequence where the injected path has a dot
pub const ALIAS_DOT_ESCAPE: &str = "__";

/// One output document type: template, naming rule and data requirements
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TemplateSpec {
    /// Spec file stem
    pub name: String,
    /// Resolved path of the template container
    pub template_file: PathBuf,
    /// Filename pattern rendered against the same context as the document
    pub output_pattern: String,
    /// Dotted paths that must hold a non-empty value before rendering
    pub required_fields: Vec<String>,
    /// Alias name → dotted source path in the raw input, in declaration order
    pub aliases: IndexMap<String, String>,
}

/// On-disk shape of a spec file (YAML or TOML)
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct SpecFile {
    pub template_file: String,
    pub output_pattern: String,
    #[serde(default)]
    pub required_fields: Option<Vec<String>>,
    #[serde(default)]
    pub aliases: Option<IndexMap<String, String>>,
}

impl SpecFile {
    /// Reject values that parse but cannot work
    pub(crate) fn check(&self) -> Result<(), String> {
        if self.template_file.trim().is_empty() {
            return Err("template_file must not be empty".to_string());
        }
        if self.output_pattern.trim().is_empty() {
            return Err("output_pattern must not be empty".to_string());
        }
        if let Some(fields) = &self.required_fields {
            if fields.iter().any(|f| f.trim().is_empty()) {
                return Err("required_fields must not contain empty paths".to_string());
            }
        }
        if let Some(aliases) = &self.aliases {
            if let Some((name, _)) = aliases
                .iter()
                .find(|(name, source)| name.trim().is_empty() || source.trim().is_empty())
            {
                return Err(format!("alias '{}' has an empty name or source path", name));
            }
        }
        Ok(())
    }
}
