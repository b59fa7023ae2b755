//! Template module - strict placeholder substitution
//!
//! One small template language is used for both the text parts of a document
//! container and the output filename patterns of a spec.
//!
//! ## Strictness
//!
//! A placeholder whose key is absent from the context is an error, never a
//! blank. A key that is present but holds `null` renders as an empty string.
//!
//! ## Syntax
//!
//! - Basic placeholders: `{{key}}` or `{{ key }}` (spaces optional)
//! - Nested access: `{{nested.key}}` or `{{ nested.key }}`
//! - Filters: `{{ Date | datetimeformat("%d/%m/%Y") }}`, `upper`, `lower`, `trim`
//! - List iteration: `{{each items |item|}} ... {{/each}}` or `{{ each items |item| }}`
//! - Escape sequences: `\{{literal}}` or `\{{ literal }}`

pub mod engine;
pub mod error;

pub use engine::{declared_placeholders, render, Escape, TemplateContext, TemplateEngine};
pub use error::TemplateError;
