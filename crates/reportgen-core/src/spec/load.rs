//! Loading spec files from a directory

use crate::error::{ReportgenError, Result};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

use super::model::{SpecFile, TemplateSpec};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SpecFormat {
    Yaml,
    Toml,
}

impl SpecFormat {
    fn from_path(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()?.to_ascii_lowercase().as_str() {
            "yaml" | "yml" => Some(SpecFormat::Yaml),
            "toml" => Some(SpecFormat::Toml),
            _ => None,
        }
    }
}

fn spec_error(path: &Path, reason: impl Into<String>) -> ReportgenError {
    ReportgenError::SpecLoad {
        path: path.to_path_buf(),
        reason: reason.into(),
    }
}

/// Reads every spec file of one directory
#[derive(Debug, Clone)]
pub struct SpecRepository {
    specs_dir: PathBuf,
    template_root: PathBuf,
}

impl SpecRepository {
    /// Spec template paths resolve against the parent of `specs_dir`
    pub fn new(specs_dir: impl Into<PathBuf>) -> Self {
        let specs_dir = specs_dir.into();
        let template_root = specs_dir
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();
        Self {
            specs_dir,
            template_root,
        }
    }

    /// Resolve spec template paths against `root` instead
    pub fn with_template_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.template_root = root.into();
        self
    }

    pub fn specs_dir(&self) -> &Path {
        &self.specs_dir
    }

    pub fn template_root(&self) -> &Path {
        &self.template_root
    }

    /// Load all specs, sorted by name
    ///
    /// # Errors
    ///
    /// `SpecLoad` if the directory cannot be read, any spec file is
    /// malformed or lacks a mandatory key, or two files share a name.
    pub fn load(&self) -> Result<Vec<TemplateSpec>> {
        if !self.specs_dir.is_dir() {
            return Err(spec_error(&self.specs_dir, "specs directory does not exist"));
        }

        let mut by_name: BTreeMap<String, TemplateSpec> = BTreeMap::new();
        for entry in WalkDir::new(&self.specs_dir).min_depth(1).max_depth(1) {
            let entry = entry.map_err(|e| spec_error(&self.specs_dir, e.to_string()))?;
            let path = entry.path();
            if !entry.file_type().is_file() {
                continue;
            }
            let Some(format) = SpecFormat::from_path(path) else {
                continue;
            };

            let spec = self.load_file(path, format)?;
            if by_name.contains_key(&spec.name) {
                return Err(spec_error(
                    path,
                    format!("another spec file is already named '{}'", spec.name),
                ));
            }
            by_name.insert(spec.name.clone(), spec);
        }

        debug!(
            specs_dir = %self.specs_dir.display(),
            count = by_name.len(),
            "loaded template specs"
        );
        Ok(by_name.into_values().collect())
    }

    fn load_file(&self, path: &Path, format: SpecFormat) -> Result<TemplateSpec> {
        let content =
            std::fs::read_to_string(path).map_err(|e| spec_error(path, e.to_string()))?;

        let raw: SpecFile = match format {
            SpecFormat::Yaml => {
                serde_yaml::from_str(&content).map_err(|e| spec_error(path, e.to_string()))?
            }
            SpecFormat::Toml => {
                toml::from_str(&content).map_err(|e| spec_error(path, e.to_string()))?
            }
        };
        raw.check().map_err(|reason| spec_error(path, reason))?;

        let name = path
            .file_stem()
            .and_then(|s| s.to_str())
            .ok_or_else(|| spec_error(path, "spec file name is not valid UTF-8"))?
            .to_string();

        Ok(TemplateSpec {
            name,
            template_file: self.template_root.join(raw.template_file.trim()),
            output_pattern: raw.output_pattern,
            required_fields: raw.required_fields.unwrap_or_default(),
            aliases: raw.aliases.unwrap_or_default(),
        })
    }
}

/// Load specs from `specs_dir`, resolving templates against its parent
pub fn load_specs(specs_dir: impl AsRef<Path>) -> Result<Vec<TemplateSpec>> {
    SpecRepository::new(specs_dir.as_ref()).load()
}
