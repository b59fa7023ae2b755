//! Test utilities for reportgen
//!
//! Shared helpers used across the reportgen workspace: temporary
//! directories, in-memory `.docx` and `.xlsx` fixtures, and on-disk project fixtures.

mod docx;
mod project;
mod xlsx;

pub use docx::{docx_part, docx_text, docx_with_body, docx_with_parts};
pub use project::ProjectFixture;
pub use xlsx::{xlsx_with_rows, xlsx_with_sheets};

use tempfile::TempDir;

/// Creates a temporary directory within `.tmp/` at the project root
///
/// All test temporary files live in a single gitignored location that is
/// easy to clean up by hand.
///
/// # Panics
///
/// Panics if the current directory cannot be determined or `.tmp/` or the
/// subdirectory cannot be created.
///
/// # Examples
///
/// ```rust
/// use reportgen_testkit::temp_dir_in_workspace;
///
/// let temp = temp_dir_in_workspace();
/// std::fs::write(temp.path().join("job.yaml"), "ProjectName: Alpha\n").unwrap();
/// ```
pub fn temp_dir_in_workspace() -> TempDir {
    try_temp_dir_in_workspace().expect("Failed to create temporary directory in .tmp/")
}

/// Alternative with Result for non-test code
pub fn try_temp_dir_in_workspace() -> std::io::Result<TempDir> {
    let workspace_root = std::env::current_dir()?;
    let tmp_base = workspace_root.join(".tmp");
    std::fs::create_dir_all(&tmp_base)?;
    TempDir::new_in(&tmp_base)
}
