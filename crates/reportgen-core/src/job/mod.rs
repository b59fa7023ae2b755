//! Job schema - the validated static-field input of a render

mod model;
mod validate;

pub use model::{CaissonFields, Equipment, EquipmentItem, JobData, Operators};
pub use validate::{validate_job, SCHEMA_KEYS};

use crate::error::{ReportgenError, Result};
use serde_json::{Map, Value};

/// Flat override: every external key replaces the schema-derived one
pub fn merge_overrides<I>(base: &mut Map<String, Value>, overrides: I)
where
    I: IntoIterator<Item = (String, Value)>,
{
    for (key, value) in overrides {
        base.insert(key, value);
    }
}

/// Validate `raw` and merge `overrides` on top, ready for rendering
pub fn render_input<I>(raw: &Value, overrides: I) -> Result<Map<String, Value>>
where
    I: IntoIterator<Item = (String, Value)>,
{
    let job = validate_job(raw).map_err(ReportgenError::SchemaValidation)?;
    let mut input = job.to_map()?;
    merge_overrides(&mut input, overrides);
    Ok(input)
}
