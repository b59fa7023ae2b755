//! Context builder - projects raw input onto a template's expected names

use crate::dotted::{get_by_dotted, set_by_dotted};
use crate::spec::ALIAS_DOT_ESCAPE;
use crate::template::TemplateContext;
use indexmap::IndexMap;
use serde_json::{Map, Value};
use std::collections::BTreeSet;

/// Per-(input, spec) data handed to the templating capability
///
/// Always a mapping. Holds every top-level key of the raw input plus every
/// alias target.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderContext {
    inner: TemplateContext,
}

impl RenderContext {
    /// Wrap an already-built mapping
    pub fn from_map(map: Map<String, Value>) -> Self {
        Self {
            inner: TemplateContext::new(Value::Object(map)),
        }
    }

    /// Context view for the template engine
    pub fn template_context(&self) -> &TemplateContext {
        &self.inner
    }

    pub fn data(&self) -> &Value {
        self.inner.data()
    }

    /// Look up a dotted path; `None` for absent or `null`
    pub fn get(&self, path: &str) -> Option<&Value> {
        get_by_dotted(self.data(), path)
    }

    /// Whether `path` is present and holds `null`
    pub fn is_null(&self, path: &str) -> bool {
        let (parent, leaf) = match path.rsplit_once('.') {
            None => (Some(self.data()), path),
            Some((parent, leaf)) => (self.get(parent), leaf),
        };
        parent
            .and_then(Value::as_object)
            .and_then(|map| map.get(leaf))
            .is_some_and(Value::is_null)
    }

    /// Every dotted path reachable by recursing into nested mappings
    ///
    /// A nested mapping contributes its own path and all descendant paths.
    /// Arrays are leaves.
    pub fn flatten_paths(&self) -> BTreeSet<String> {
        let mut paths = BTreeSet::new();
        if let Value::Object(map) = self.data() {
            collect_paths(map, "", &mut paths);
        }
        paths
    }
}

fn collect_paths(map: &Map<String, Value>, parent: &str, out: &mut BTreeSet<String>) {
    for (key, value) in map {
        let full = if parent.is_empty() {
            key.clone()
        } else {
            format!("{}.{}", parent, key)
        };
        if let Value::Object(inner) = value {
            collect_paths(inner, &full, out);
        }
        out.insert(full);
    }
}

/// Decode an alias name into the dotted path it is injected at
pub fn alias_target(alias: &str) -> String {
    alias.replace(ALIAS_DOT_ESCAPE, ".")
}

/// Build the render context for one spec
///
/// Starts from a shallow copy of `raw`, then writes each alias at its decoded
/// target path. Every alias source is resolved against the untouched `raw`
/// input, never against a value another alias injected; an unresolved source
/// injects `null` and is left for the validation gate to report.
pub fn build_context(raw: &Map<String, Value>, aliases: &IndexMap<String, String>) -> RenderContext {
    let original = Value::Object(raw.clone());
    let mut context = raw.clone();

    for (alias, source) in aliases {
        let value = get_by_dotted(&original, source)
            .cloned()
            .unwrap_or(Value::Null);
        set_by_dotted(&mut context, &alias_target(alias), value);
    }

    RenderContext::from_map(context)
}
