//! Placeholder expressions with pipe filters
//!
//! `{{ Date | datetimeformat("%d/%m/%Y") | upper }}` parses into the key
//! `Date` and two filter calls applied left to right to the stringified value.

use crate::template::error::TemplateError;
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};
use std::fmt::Write;

const DEFAULT_DATE_FORMAT: &str = "%Y-%m-%d";

/// A parsed `{{...}}` expression
#[derive(Debug, PartialEq)]
pub(crate) struct Expression<'a> {
    pub key: &'a str,
    pub filters: Vec<FilterCall>,
}

/// One `name(args...)` element of a filter chain
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct FilterCall {
    pub name: String,
    pub args: Vec<String>,
}

/// Split `text` on `sep` where it is not inside a quoted string
fn split_unquoted(text: &str, sep: char) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut quote: Option<char> = None;
    let mut last = 0;

    for (i, c) in text.char_indices() {
        match quote {
            Some(q) if c == q => quote = None,
            Some(_) => {}
            None if c == '"' || c == '\'' => quote = Some(c),
            None if c == sep => {
                parts.push(&text[last..i]);
                last = i + c.len_utf8();
            }
            None => {}
        }
    }
    parts.push(&text[last..]);
    parts
}

fn unquote(arg: &str) -> String {
    let arg = arg.trim();
    for q in ['"', '\''] {
        if let Some(inner) = arg.strip_prefix(q).and_then(|a| a.strip_suffix(q)) {
            return inner.to_string();
        }
    }
    arg.to_string()
}

fn parse_filter(text: &str, line: usize) -> Result<FilterCall, TemplateError> {
    let text = text.trim();
    let (name, args) = match text.find('(') {
        Some(open) => {
            let inner = text[open + 1..].strip_suffix(')').ok_or_else(|| {
                TemplateError::MalformedSyntax {
                    message: format!("Unclosed argument list in filter '{}'", text),
                    line,
                }
            })?;
            let args = if inner.trim().is_empty() {
                Vec::new()
            } else {
                split_unquoted(inner, ',').into_iter().map(unquote).collect()
            };
            (text[..open].trim(), args)
        }
        None => (text, Vec::new()),
    };

    if name.is_empty() {
        return Err(TemplateError::MalformedSyntax {
            message: "Empty filter name".to_string(),
            line,
        });
    }

    Ok(FilterCall {
        name: name.to_string(),
        args,
    })
}

/// Parse a placeholder expression into its key and filter chain
pub(crate) fn parse_expression(expr: &str, line: usize) -> Result<Expression<'_>, TemplateError> {
    let mut parts = split_unquoted(expr, '|').into_iter();
    let key = parts.next().unwrap_or_default().trim();
    if key.is_empty() {
        return Err(TemplateError::MalformedSyntax {
            message: "Empty placeholder".to_string(),
            line,
        });
    }

    let filters = parts
        .map(|part| parse_filter(part, line))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Expression { key, filters })
}

/// Parse the date forms job data carries: plain dates, ISO date-times and RFC 3339
fn parse_datetime(text: &str) -> Option<DateTime<chrono::FixedOffset>> {
    let text = text.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt);
    }
    let naive = NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .map(|d| d.and_time(NaiveTime::MIN))
        .or_else(|_| NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f"))
        .or_else(|_| NaiveDateTime::parse_from_str(text, "%Y-%m-%d %H:%M:%S%.f"))
        .or_else(|_| NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M"))
        .ok()?;
    Some(naive.and_utc().fixed_offset())
}

/// Format an ISO date; text that is not a date passes through unchanged
fn datetimeformat(value: String, args: &[String], line: usize) -> Result<String, TemplateError> {
    let fmt = args.first().map_or(DEFAULT_DATE_FORMAT, String::as_str);
    let Some(dt) = parse_datetime(&value) else {
        return Ok(value);
    };

    let mut out = String::new();
    write!(out, "{}", dt.format(fmt)).map_err(|_| TemplateError::MalformedSyntax {
        message: format!("Invalid date format '{}'", fmt),
        line,
    })?;
    Ok(out)
}

/// Apply a filter chain to an already stringified value
pub(crate) fn apply_filters(
    mut value: String,
    filters: &[FilterCall],
    line: usize,
) -> Result<String, TemplateError> {
    for filter in filters {
        value = match filter.name.as_str() {
            "datetimeformat" => datetimeformat(value, &filter.args, line)?,
            "upper" => value.to_uppercase(),
            "lower" => value.to_lowercase(),
            "trim" => value.trim().to_string(),
            other => {
                return Err(TemplateError::UnknownFilter {
                    name: other.to_string(),
                    line,
                })
            }
        };
    }
    Ok(value)
}
