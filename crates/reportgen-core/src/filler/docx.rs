//! WordprocessingML (`.docx`) filler

use super::{FillError, TemplateFiller};
use crate::context::RenderContext;
use crate::template::{declared_placeholders, Escape, TemplateEngine};
use std::collections::BTreeSet;
use std::io::{Cursor, Read, Write};
use tracing::debug;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

/// Local file header magic of a zip container
pub const DOCX_SIGNATURE: &[u8] = b"PK\x03\x04";

/// Fills every `word/*.xml` part of a `.docx` container
#[derive(Debug, Clone, Copy)]
pub struct DocxFiller {
    engine: TemplateEngine,
}

impl Default for DocxFiller {
    fn default() -> Self {
        Self::new()
    }
}

impl DocxFiller {
    pub fn new() -> Self {
        Self {
            engine: TemplateEngine::with_escape(Escape::WordprocessingMl),
        }
    }
}

/// Parts holding document text: body, headers, footers, notes, comments
fn is_content_part(name: &str) -> bool {
    name.strip_prefix("word/")
        .is_some_and(|rest| !rest.contains('/') && rest.ends_with(".xml"))
}

/// Length of the run of XML tags at the start of `text`
fn leading_tags_len(text: &str) -> usize {
    let mut len = 0;
    while text[len..].starts_with('<') {
        match text[len..].find('>') {
            Some(end) => len += end + 1,
            None => break,
        }
    }
    len
}

/// Rejoin `{{` and `}}` that were split by run boundaries
///
/// `{</w:t></w:r><w:r><w:t>{` becomes `{{`. Only markup sitting directly
/// between two identical braces is removed.
fn join_split_braces(xml: &str) -> String {
    let mut out = String::with_capacity(xml.len());
    let mut rest = xml;
    while let Some(idx) = rest.find(['{', '}']) {
        let brace = rest.as_bytes()[idx];
        out.push_str(&rest[..=idx]);
        rest = &rest[idx + 1..];
        let tags = leading_tags_len(rest);
        if tags > 0 && rest.as_bytes().get(tags) == Some(&brace) {
            rest = &rest[tags..];
        }
    }
    out.push_str(rest);
    out
}

/// Placeholder text as the author typed it
///
/// Drops run markup, decodes entities and straightens typographic quotes
/// that autocorrect inserts into filter arguments.
fn clean_expression(inner: &str) -> String {
    let mut text = String::with_capacity(inner.len());
    let mut rest = inner;
    while let Some(open) = rest.find('<') {
        text.push_str(&rest[..open]);
        match rest[open..].find('>') {
            Some(close) => rest = &rest[open + close + 1..],
            None => {
                rest = &rest[open..];
                break;
            }
        }
    }
    text.push_str(rest);

    html_escape::decode_html_entities(&text)
        .chars()
        .map(|c| match c {
            '\u{2018}' | '\u{2019}' => '\'',
            '\u{201C}' | '\u{201D}' => '"',
            other => other,
        })
        .collect()
}

fn clean_placeholders(xml: &str) -> String {
    let mut out = String::with_capacity(xml.len());
    let mut rest = xml;
    while let Some(start) = rest.find("{{") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        let Some(end) = after.find("}}") else {
            out.push_str(&rest[start..]);
            return out;
        };
        // unclosed marker; leave it for the engine to report
        if after[..end].contains("{{") {
            out.push_str("{{");
            rest = after;
            continue;
        }
        out.push_str("{{");
        out.push_str(&clean_expression(&after[..end]));
        out.push_str("}}");
        rest = &after[end + 2..];
    }
    out.push_str(rest);
    out
}

/// Normalize a document part so every placeholder is one contiguous token
pub(crate) fn prepare_part(xml: &str) -> String {
    clean_placeholders(&join_split_braces(xml))
}

fn content_parts(template: &[u8]) -> Result<Vec<(String, String)>, FillError> {
    let mut archive = ZipArchive::new(Cursor::new(template))?;
    let mut parts = Vec::new();
    for i in 0..archive.len() {
        let mut entry = archive.by_index(i)?;
        if !is_content_part(entry.name()) {
            continue;
        }
        let mut xml = String::new();
        entry.read_to_string(&mut xml)?;
        parts.push((entry.name().to_string(), xml));
    }
    Ok(parts)
}

impl TemplateFiller for DocxFiller {
    fn fill(&self, template: &[u8], context: &RenderContext) -> Result<Vec<u8>, FillError> {
        let mut archive = ZipArchive::new(Cursor::new(template))?;
        let mut writer = ZipWriter::new(Cursor::new(Vec::with_capacity(template.len())));
        let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

        for i in 0..archive.len() {
            let mut entry = archive.by_index(i)?;
            if !is_content_part(entry.name()) {
                writer.raw_copy_file(entry)?;
                continue;
            }

            let name = entry.name().to_string();
            let mut xml = String::new();
            entry.read_to_string(&mut xml)?;
            let rendered = self
                .engine
                .render(&prepare_part(&xml), context.template_context())
                .map_err(|source| FillError::Template {
                    part: name.clone(),
                    source,
                })?;

            debug!(part = %name, "filled document part");
            writer.start_file(name, options)?;
            writer.write_all(rendered.as_bytes())?;
        }

        Ok(writer.finish()?.into_inner())
    }

    fn declared_placeholders(&self, template: &[u8]) -> Result<BTreeSet<String>, FillError> {
        let mut declared = BTreeSet::new();
        for (_, xml) in content_parts(template)? {
            declared.extend(declared_placeholders(&prepare_part(&xml)));
        }
        Ok(declared)
    }

    fn signature(&self) -> &[u8] {
        DOCX_SIGNATURE
    }
}
