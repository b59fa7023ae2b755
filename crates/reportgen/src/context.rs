//! Resolved paths and settings for CLI commands

use crate::cli::GlobalArgs;
use anyhow::{Result, anyhow};
use reportgen_core::config::{Config, Project};
use reportgen_core::sheet::NodeColumns;
use reportgen_core::spec::{SpecRepository, TemplateSpec};
use std::env;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Project configuration (when one is found) plus the working directory
pub struct Context {
    pub project: Option<Project>,
    pub cwd: PathBuf,
}

impl Context {
    /// Load the project named by `--config`, or search upwards for one
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `--config` names a file that does not exist
    /// - The config file cannot be read or parsed
    pub fn new(global: &GlobalArgs) -> Result<Self> {
        let cwd = env::current_dir()?;
        let project = match &global.config {
            Some(path) => {
                if !path.is_file() {
                    return Err(anyhow!("Config file not found: {}", path.display()));
                }
                Some(Project::load(path)?)
            }
            None => Project::find_root(&cwd)?,
        };

        match &project {
            Some(p) => debug!(root = %p.root.display(), "using project configuration"),
            None => debug!("no reportgen.toml found, using defaults"),
        }
        Ok(Self { project, cwd })
    }

    fn config(&self) -> Config {
        self.project
            .as_ref()
            .map(|p| p.config.clone())
            .unwrap_or_default()
    }

    /// `--specs`, else the configured specs directory, else `./template_specs`
    pub fn specs_dir(&self, flag: Option<&Path>) -> PathBuf {
        match (flag, &self.project) {
            (Some(dir), _) => self.cwd.join(dir),
            (None, Some(project)) => project.specs_dir(),
            (None, None) => self.cwd.join(Config::default().paths.specs_dir),
        }
    }

    /// Spec repository for the resolved specs directory
    ///
    /// Without a project, template paths resolve against the parent of the
    /// specs directory.
    pub fn repository(&self, flag: Option<&Path>) -> SpecRepository {
        let repository = SpecRepository::new(self.specs_dir(flag));
        match &self.project {
            Some(project) => repository.with_template_root(project.template_root()),
            None => repository,
        }
    }

    pub fn load_specs(&self, flag: Option<&Path>) -> Result<Vec<TemplateSpec>> {
        Ok(self.repository(flag).load()?)
    }

    pub fn output_dir(&self, flag: Option<&Path>) -> PathBuf {
        match (flag, &self.project) {
            (Some(dir), _) => self.cwd.join(dir),
            (None, Some(project)) => project.output_dir(),
            (None, None) => self.cwd.join(Config::default().paths.output_dir),
        }
    }

    pub fn bundle_name(&self) -> String {
        self.config().render.bundle_name
    }

    pub fn node_columns(&self) -> NodeColumns {
        self.config().sheet
    }
}
