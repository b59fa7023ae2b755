//! Project configuration (`reportgen.toml`)

mod model;

pub use model::{Config, PathsConfig, ProjectConfig, RenderConfig};

use crate::error::Result;
use std::path::{Path, PathBuf};
use tracing::debug;

pub const CONFIG_FILE: &str = "reportgen.toml";

/// A directory holding reportgen.toml, with its parsed configuration
#[derive(Debug, Clone)]
pub struct Project {
    pub root: PathBuf,
    pub config: Config,
}

impl Project {
    /// Load the configuration at `path`; its directory becomes the root
    pub fn load(path: &Path) -> Result<Self> {
        let config = Config::from_file(path)?;
        let root = path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();
        debug!(config = %path.display(), "loaded project configuration");
        Ok(Self { root, config })
    }

    /// Find reportgen.toml in `start` or any of its ancestors
    pub fn find_root(start: &Path) -> Result<Option<Self>> {
        for dir in start.ancestors() {
            let candidate = dir.join(CONFIG_FILE);
            if candidate.is_file() {
                return Self::load(&candidate).map(Some);
            }
        }
        Ok(None)
    }

    pub fn specs_dir(&self) -> PathBuf {
        self.root.join(&self.config.paths.specs_dir)
    }

    pub fn template_root(&self) -> PathBuf {
        self.root.join(&self.config.paths.template_root)
    }

    pub fn output_dir(&self) -> PathBuf {
        self.root.join(&self.config.paths.output_dir)
    }
}
