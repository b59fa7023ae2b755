//! Dotted-path access into nested job data

use serde_json::{Map, Value};

/// Walk `path` ("A.B.C") through nested mappings
///
/// Any hop that is not a mapping, a missing key, or a `null` on the way
/// yields `None`; this never fails.
pub fn get_by_dotted<'a>(data: &'a Value, path: &str) -> Option<&'a Value> {
    let mut current = data;
    for part in path.split('.') {
        current = current.as_object()?.get(part)?;
        if current.is_null() {
            return None;
        }
    }
    Some(current)
}

/// Write `value` at `path`, creating intermediate mappings as needed
///
/// An intermediate that exists but is not a mapping is replaced by one.
pub fn set_by_dotted(map: &mut Map<String, Value>, path: &str, value: Value) {
    let mut parts: Vec<&str> = path.split('.').collect();
    let Some(last) = parts.pop() else {
        return;
    };

    let mut current = map;
    for part in parts {
        let slot = current
            .entry(part.to_string())
            .or_insert_with(|| Value::Object(Map::new()));
        if !slot.is_object() {
            *slot = Value::Object(Map::new());
        }
        let Value::Object(inner) = slot else {
            return;
        };
        current = inner;
    }
    current.insert(last.to_string(), value);
}
