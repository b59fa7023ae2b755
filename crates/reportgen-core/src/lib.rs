// Core modules
pub mod config;
pub mod context;
pub mod dotted;
pub mod error;
pub mod filler;
pub mod interchange;
pub mod job;
pub mod lint;
pub mod render;
pub mod session;
pub mod sheet;
pub mod spec;
pub mod template;
pub mod validate;

#[cfg(test)]
pub(crate) mod test_support;

// Re-export commonly used types
pub use error::{FieldViolation, ReportgenError, Result};
