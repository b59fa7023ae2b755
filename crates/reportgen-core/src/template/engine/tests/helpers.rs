//! Shared test helpers for template engine tests

use crate::template::engine::TemplateContext;
use serde_json::json;

/// Scalar values of every kind the engine prints
pub(super) fn simple_context() -> TemplateContext {
    TemplateContext::new(json!({
        "ProjectName": "Alpha",
        "count": 42,
        "depth": 12.5,
        "enabled": true,
        "Date": "2025-01-01",
        "ClientName": null
    }))
}

/// Survey-shaped nested data with a list of operators
pub(super) fn nested_context() -> TemplateContext {
    TemplateContext::new(json!({
        "Equipment": {
            "MBES": { "Make": "Kongsberg", "Model": "EM2040", "SerialNumber": "SN-1" },
            "INS": { "Make": "iXblue", "Model": "Phins", "SerialNumber": null }
        },
        "Crew": [
            { "name": "Ana", "role": "Party Chief" },
            { "name": "Ben", "role": "Surveyor" }
        ]
    }))
}
