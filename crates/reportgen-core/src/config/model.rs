use crate::error::{ReportgenError, Result};
use crate::sheet::NodeColumns;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// reportgen.toml schema - every section and key is optional
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub project: ProjectConfig,
    #[serde(default)]
    pub paths: PathsConfig,
    #[serde(default)]
    pub render: RenderConfig,
    #[serde(default)]
    pub sheet: NodeColumns,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectConfig {
    #[serde(default)]
    pub name: Option<String>,
}

/// Paths relative to the directory holding reportgen.toml
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathsConfig {
    #[serde(default = "default_specs_dir")]
    pub specs_dir: PathBuf,
    /// Base for spec `template_file` paths
    #[serde(default = "default_template_root")]
    pub template_root: PathBuf,
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            specs_dir: default_specs_dir(),
            template_root: default_template_root(),
            output_dir: default_output_dir(),
        }
    }
}

fn default_specs_dir() -> PathBuf {
    PathBuf::from("template_specs")
}

fn default_template_root() -> PathBuf {
    PathBuf::from(".")
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("out")
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderConfig {
    #[serde(default = "default_bundle_name")]
    pub bundle_name: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            bundle_name: default_bundle_name(),
        }
    }
}

fn default_bundle_name() -> String {
    "reports.zip".to_string()
}

impl Config {
    /// Read reportgen.toml
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| ReportgenError::ConfigParse {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        toml::from_str(&content).map_err(|e| ReportgenError::ConfigParse {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }

    /// Write reportgen.toml
    pub fn to_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let content = toml::to_string_pretty(self).map_err(|e| ReportgenError::ConfigParse {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
