//! On-disk project fixtures

use std::path::{Path, PathBuf};
use tempfile::TempDir;

use crate::temp_dir_in_workspace;

/// Temporary report project: `template_specs/` plus arbitrary files
///
/// Removed when dropped.
pub struct ProjectFixture {
    temp: TempDir,
}

impl Default for ProjectFixture {
    fn default() -> Self {
        Self::new()
    }
}

impl ProjectFixture {
    pub fn new() -> Self {
        let temp = temp_dir_in_workspace();
        std::fs::create_dir_all(temp.path().join("template_specs")).unwrap();
        Self { temp }
    }

    pub fn root(&self) -> &Path {
        self.temp.path()
    }

    pub fn specs_dir(&self) -> PathBuf {
        self.root().join("template_specs")
    }

    pub fn path(&self, relative: &str) -> PathBuf {
        self.root().join(relative)
    }

    /// Write `template_specs/<name>.yaml`
    pub fn spec(&self, name: &str, yaml: &str) -> &Self {
        self.file(&format!("template_specs/{}.yaml", name), yaml.as_bytes())
    }

    /// Write `reportgen.toml` at the project root
    pub fn config(&self, toml: &str) -> &Self {
        self.file("reportgen.toml", toml.as_bytes())
    }

    /// Write any file, creating parent directories
    pub fn file(&self, relative: &str, contents: &[u8]) -> &Self {
        let path = self.path(relative);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(&path, contents).unwrap();
        self
    }
}
