//! Spec repository - declarative per-template specifications
//!
//! A specs directory holds one file per output document:
//!
//! ```yaml
//! template_file: templates/daily_report.docx
//! output_pattern: "{{ProjectName}}_{{Date}}_DPR.docx"
//! required_fields: [ProjectName, Date]
//! aliases:
//!   Vessel: SurveyVessel
//!   MBES__Serial: Equipment.MBES.SerialNumber
//! ```
//!
//! YAML (`.yaml`, `.yml`) and TOML (`.toml`) files are read. Loading is
//! fail-fast: one bad file aborts the whole set.

mod load;
mod model;

pub use load::{load_specs, SpecRepository};
pub use model::{TemplateSpec, ALIAS_DOT_ESCAPE};
