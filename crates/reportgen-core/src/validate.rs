//! Validation gate - required fields must hold a value before rendering

use crate::context::RenderContext;
use serde_json::Value;

/// Whether a resolved value counts as filled in
///
/// Only `null` and the empty string are blank; `0`, `false` and empty
/// collections are real values.
fn is_present(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::String(s)) => !s.is_empty(),
        Some(_) => true,
    }
}

/// Required paths that are absent, `null` or `""`, in input order
pub fn find_missing(context: &RenderContext, required_fields: &[String]) -> Vec<String> {
    required_fields
        .iter()
        .filter(|path| !is_present(context.get(path)))
        .cloned()
        .collect()
}
