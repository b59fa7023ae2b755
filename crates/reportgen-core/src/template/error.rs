//! Template error types

use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TemplateError {
    /// Key absent from the context (strict undefined)
    #[error("'{key}' is not defined (line {line})")]
    UndefinedKey { key: String, line: usize },

    #[error("syntax error on line {line}: {message}")]
    MalformedSyntax { message: String, line: usize },

    #[error("'{key}' is a list; iterate it with {{{{each {key} |item|}}}} ... {{{{/each}}}}")]
    ArrayInNonEachContext { key: String },

    #[error("'{key}' is a mapping; reference one of its fields, e.g. {key}.Name")]
    MappingInPlaceholder { key: String },

    #[error("unknown filter '{name}' (line {line})")]
    UnknownFilter { name: String, line: usize },

    /// Rendering ran past its time limit, usually on a runaway block
    #[error("rendering stopped after {:.2}s (limit {:.2}s)", .elapsed.as_secs_f64(), .max_duration.as_secs_f64())]
    Timeout {
        max_duration: Duration,
        elapsed: Duration,
    },
}

impl TemplateError {
    pub(crate) fn malformed(message: impl Into<String>, line: usize) -> Self {
        TemplateError::MalformedSyntax {
            message: message.into(),
            line,
        }
    }

    /// The undefined key, if this error is a strict-undefined failure
    pub fn undefined_key(&self) -> Option<&str> {
        match self {
            TemplateError::UndefinedKey { key, .. } => Some(key),
            _ => None,
        }
    }
}
