//! Plain-text stand-in for a document container

use crate::context::RenderContext;
use crate::filler::{FillError, TemplateFiller};
use crate::template::{declared_placeholders, TemplateEngine};
use std::cell::Cell;
use std::collections::BTreeSet;

pub(crate) const TEXT_SIGNATURE: &[u8] = b"TXT:";

/// Template bytes are `TXT:` followed by template text
#[derive(Default)]
pub(crate) struct TextFiller {
    pub fills: Cell<usize>,
}

impl TextFiller {
    pub fn template(text: &str) -> Vec<u8> {
        let mut bytes = TEXT_SIGNATURE.to_vec();
        bytes.extend_from_slice(text.as_bytes());
        bytes
    }

    fn body(template: &[u8]) -> Result<&str, FillError> {
        let body = template
            .strip_prefix(TEXT_SIGNATURE)
            .ok_or_else(|| FillError::Container("missing TXT: header".to_string()))?;
        std::str::from_utf8(body).map_err(|e| FillError::Container(e.to_string()))
    }
}

impl TemplateFiller for TextFiller {
    fn fill(&self, template: &[u8], context: &RenderContext) -> Result<Vec<u8>, FillError> {
        self.fills.set(self.fills.get() + 1);
        let rendered = TemplateEngine::new()
            .render(Self::body(template)?, context.template_context())
            .map_err(|source| FillError::Template {
                part: "body".to_string(),
                source,
            })?;
        Ok(rendered.into_bytes())
    }

    fn declared_placeholders(&self, template: &[u8]) -> Result<BTreeSet<String>, FillError> {
        Ok(declared_placeholders(Self::body(template)?))
    }

    fn signature(&self) -> &[u8] {
        TEXT_SIGNATURE
    }
}
