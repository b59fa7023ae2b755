//! Value lookup and `each` header parsing

use crate::dotted::get_by_dotted;
use crate::template::error::TemplateError;
use serde_json::{Map, Value};

use super::TemplateContext;

/// Follow a dotted key through nested mappings
///
/// Unlike job lookups, a `null` leaf counts as present here.
pub(crate) fn resolve_key<'a>(data: &'a Value, key: &str) -> Option<&'a Value> {
    match key.rsplit_once('.') {
        None => data.as_object()?.get(key),
        Some((parent, leaf)) => get_by_dotted(data, parent)?.as_object()?.get(leaf),
    }
}

/// Text form of a scalar; `null` renders empty
pub(crate) fn stringify_value(value: &Value, key: &str) -> Result<String, TemplateError> {
    match value {
        Value::Null => Ok(String::new()),
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        Value::Array(_) => Err(TemplateError::ArrayInNonEachContext { key: key.to_string() }),
        Value::Object(_) => Err(TemplateError::MappingInPlaceholder { key: key.to_string() }),
    }
}

/// `items |item|` → `("items", "item")`
pub(crate) fn parse_each_syntax(args: &str, line: usize) -> Result<(&str, &str), TemplateError> {
    let invalid = |why: &str| {
        TemplateError::malformed(format!("Invalid each syntax ({}) in 'each {}'", why, args), line)
    };

    let (key, binding) = args.split_once('|').ok_or_else(|| invalid("expected |var|"))?;
    let (var_name, _) = binding.split_once('|').ok_or_else(|| invalid("unclosed |var|"))?;

    let (key, var_name) = (key.trim(), var_name.trim());
    if key.is_empty() || var_name.is_empty() {
        return Err(invalid("empty key or variable"));
    }
    Ok((key, var_name))
}

/// Outer context with `var_name` bound to `item`, shadowing any outer key
pub(crate) fn create_loop_context(outer: &Value, var_name: &str, item: Value) -> TemplateContext {
    let mut scope = outer.as_object().cloned().unwrap_or_else(Map::new);
    scope.insert(var_name.to_string(), item);
    TemplateContext::new(Value::Object(scope))
}
