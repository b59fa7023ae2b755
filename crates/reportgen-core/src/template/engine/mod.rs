//! Template engine implementation
//!
//! Rendering scans the template left to right. Text between markers is copied
//! through; each `{{...}}` marker is either a literal (odd number of
//! backslashes before it), an `each` block or a placeholder.

mod blocks;
mod declared;
mod filters;
mod helpers;
mod tokenize;

use crate::template::error::TemplateError;
use serde_json::Value;
use std::time::{Duration, Instant};

use blocks::find_each_end;
use filters::{apply_filters, parse_expression};
use helpers::{create_loop_context, parse_each_syntax, resolve_key, stringify_value};

pub use declared::declared_placeholders;

/// Wall-clock limit for one top-level render, loop bodies included
const RENDER_TIMEOUT: Duration = Duration::from_secs(10);

fn check_timeout(started: Instant) -> Result<(), TemplateError> {
    let elapsed = started.elapsed();
    if elapsed >= RENDER_TIMEOUT {
        return Err(TemplateError::Timeout {
            max_duration: RENDER_TIMEOUT,
            elapsed,
        });
    }
    Ok(())
}

fn count_newlines(text: &str) -> usize {
    text.bytes().filter(|&b| b == b'\n').count()
}

/// Backslashes directly before byte `pos`
fn backslashes_before(text: &str, pos: usize) -> usize {
    text.as_bytes()[..pos]
        .iter()
        .rev()
        .take_while(|&&b| b == b'\\')
        .count()
}

/// Read position within one template, with the current line number
struct Scan<'t> {
    template: &'t str,
    pos: usize,
    line: usize,
}

impl<'t> Scan<'t> {
    fn new(template: &'t str) -> Self {
        Self {
            template,
            pos: 0,
            line: 1,
        }
    }

    fn rest(&self) -> &'t str {
        &self.template[self.pos..]
    }

    /// Consume `len` bytes and return them
    fn advance(&mut self, len: usize) -> &'t str {
        let taken = &self.template[self.pos..self.pos + len];
        self.line += count_newlines(taken);
        self.pos += len;
        taken
    }

    /// Consume a whole `{{...}}` marker starting at the read position
    fn marker(&mut self, unclosed: &str) -> Result<&'t str, TemplateError> {
        let close = self.rest()[2..]
            .find("}}")
            .ok_or_else(|| TemplateError::malformed(unclosed, self.line))?;
        Ok(self.advance(close + 4))
    }
}

fn resolve_array<'a>(data: &'a Value, key: &str, line: usize) -> Result<&'a Vec<Value>, TemplateError> {
    resolve_key(data, key)
        .ok_or_else(|| TemplateError::UndefinedKey {
            key: key.to_string(),
            line,
        })?
        .as_array()
        .ok_or_else(|| TemplateError::malformed(format!("'{}' is not a list", key), line))
}

/// How substituted values are escaped before they reach the output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Escape {
    /// Values are written as-is (filenames, plain text)
    #[default]
    None,
    /// Values are escaped for an XML text node
    Xml,
    /// XML escaping plus line breaks turned into WordprocessingML `<w:br/>` runs
    WordprocessingMl,
}

impl Escape {
    fn apply(self, text: String) -> String {
        match self {
            Escape::None => text,
            Escape::Xml => html_escape::encode_text(&text).into_owned(),
            Escape::WordprocessingMl => {
                let escaped = html_escape::encode_text(&text);
                if escaped.contains('\n') {
                    escaped
                        .replace("\r\n", "\n")
                        .replace('\n', "</w:t><w:br/><w:t xml:space=\"preserve\">")
                } else {
                    escaped.into_owned()
                }
            }
        }
    }
}

/// The data a template is rendered against
#[derive(Debug, Clone, PartialEq)]
pub struct TemplateContext {
    data: Value,
}

impl TemplateContext {
    pub fn new(data: Value) -> Self {
        Self { data }
    }

    pub fn data(&self) -> &Value {
        &self.data
    }
}

/// Strict template renderer
#[derive(Debug, Clone, Copy, Default)]
pub struct TemplateEngine {
    escape: Escape,
}

impl TemplateEngine {
    /// Engine that writes values unescaped
    pub fn new() -> Self {
        Self::default()
    }

    /// Engine that escapes every substituted value
    pub fn with_escape(escape: Escape) -> Self {
        Self { escape }
    }

    /// Render `template` against `context`
    ///
    /// # Errors
    ///
    /// The first undefined key, malformed marker, misused list or mapping,
    /// unknown filter, or a render that runs past its time limit.
    pub fn render(&self, template: &str, context: &TemplateContext) -> Result<String, TemplateError> {
        self.render_from(template, context, Instant::now())
    }

    fn render_from(
        &self,
        template: &str,
        context: &TemplateContext,
        started: Instant,
    ) -> Result<String, TemplateError> {
        let mut scan = Scan::new(template);
        let mut output = String::with_capacity(template.len());

        while let Some(open) = scan.rest().find("{{") {
            check_timeout(started)?;

            let backslashes = backslashes_before(scan.rest(), open);
            output.push_str(scan.advance(open - backslashes));
            scan.advance(backslashes);
            output.extend(std::iter::repeat('\\').take(backslashes / 2));

            if backslashes % 2 == 1 {
                output.push_str(scan.marker("Unclosed escaped placeholder")?);
            } else {
                self.expand_marker(&mut scan, context, started, &mut output)?;
            }
        }

        output.push_str(scan.rest());
        Ok(output)
    }

    fn expand_marker(
        &self,
        scan: &mut Scan<'_>,
        context: &TemplateContext,
        started: Instant,
        output: &mut String,
    ) -> Result<(), TemplateError> {
        let line = scan.line;
        let marker = scan.marker("Unclosed placeholder or each loop")?;
        let expr = marker[2..marker.len() - 2].trim();

        if let Some(args) = expr.strip_prefix("each ") {
            let (key, var_name) = parse_each_syntax(args, line)?;
            let (body_len, end_len) = find_each_end(scan.rest()).ok_or_else(|| {
                TemplateError::malformed(format!("Unclosed each loop for key '{}'", key), line)
            })?;
            let body = scan.advance(body_len);
            scan.advance(end_len);

            for item in resolve_array(context.data(), key, line)? {
                let scoped = create_loop_context(context.data(), var_name, item.clone());
                output.push_str(&self.render_from(body, &scoped, started)?);
            }
            Ok(())
        } else if expr.starts_with("/each") {
            Err(TemplateError::malformed(
                "Unexpected {{/each}} without matching {{each}}",
                line,
            ))
        } else {
            self.substitute(expr, context, output, line)
        }
    }

    /// `{{key}}` or `{{key | filter ...}}`
    fn substitute(
        &self,
        expr: &str,
        context: &TemplateContext,
        output: &mut String,
        line: usize,
    ) -> Result<(), TemplateError> {
        let parsed = parse_expression(expr, line)?;
        let value = resolve_key(context.data(), parsed.key).ok_or_else(|| TemplateError::UndefinedKey {
            key: parsed.key.to_string(),
            line,
        })?;

        let text = apply_filters(stringify_value(value, parsed.key)?, &parsed.filters, line)?;
        output.push_str(&self.escape.apply(text));
        Ok(())
    }
}

/// Render without escaping
pub fn render(template: &str, context: &TemplateContext) -> Result<String, TemplateError> {
    TemplateEngine::new().render(template, context)
}

#[cfg(test)]
mod tests;
