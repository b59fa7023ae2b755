//! CLI command implementations

pub mod convert;
pub mod lint;
pub mod nodes;
pub mod render;
pub mod sheets;
pub mod specs;
pub mod validate;

use crate::output::bullets;
use anyhow::anyhow;
use reportgen_core::ReportgenError;

/// Turn a core error into a CLI error, spelling out structured details
pub(crate) fn explain(err: ReportgenError) -> anyhow::Error {
    match err {
        ReportgenError::SchemaValidation(violations) => anyhow!(
            "SCHEMA_VALIDATION: job data does not match the schema:\n{}",
            bullets(&violations)
        ),
        ReportgenError::MissingFields { spec, missing } => anyhow!(
            "MISSING_FIELDS: [{}] missing required fields:\n{}",
            spec,
            bullets(&missing)
        ),
        other => other.into(),
    }
}
