//! Templating capability - fills a template container with a context
//!
//! The render engine and the linter only talk to [`TemplateFiller`]; the
//! document format lives behind it. [`DocxFiller`] handles WordprocessingML
//! (`.docx`) containers.

mod docx;

use crate::context::RenderContext;
use crate::template::TemplateError;
use std::collections::BTreeSet;
use thiserror::Error;

pub use docx::{DocxFiller, DOCX_SIGNATURE};

/// Failure inside a filler
///
/// Carries no spec name; the render engine attaches it.
#[derive(Error, Debug)]
pub enum FillError {
    /// A document part failed to render
    #[error("{part}: {source}")]
    Template {
        part: String,
        #[source]
        source: TemplateError,
    },

    /// The container could not be read or written
    #[error("{0}")]
    Container(String),
}

impl From<zip::result::ZipError> for FillError {
    fn from(err: zip::result::ZipError) -> Self {
        FillError::Container(err.to_string())
    }
}

impl From<std::io::Error> for FillError {
    fn from(err: std::io::Error) -> Self {
        FillError::Container(err.to_string())
    }
}

/// Narrow interface to a document templating implementation
pub trait TemplateFiller {
    /// Fill `template` with `context` under strict-undefined rules
    fn fill(&self, template: &[u8], context: &RenderContext) -> Result<Vec<u8>, FillError>;

    /// Every placeholder path the template reads
    fn declared_placeholders(&self, template: &[u8]) -> Result<BTreeSet<String>, FillError>;

    /// Leading bytes every valid template container starts with
    fn signature(&self) -> &[u8];
}
