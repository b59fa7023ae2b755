use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// One field-level schema failure
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct FieldViolation {
    /// Dotted path of the offending field
    pub path: String,
    pub message: String,
}

impl FieldViolation {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}

fn join_violations(violations: &[FieldViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

#[derive(Error, Debug)]
pub enum ReportgenError {
    // Spec errors
    #[error("SPEC_LOAD_ERROR: {path}: {reason}")]
    SpecLoad { path: PathBuf, reason: String },

    // Template file errors
    #[error("TEMPLATE_NOT_FOUND: [{spec}] template file '{path}' does not exist")]
    TemplateNotFound { spec: String, path: PathBuf },

    #[error("INVALID_TEMPLATE: [{spec}] '{path}' is not a valid document container: {reason}")]
    InvalidTemplate {
        spec: String,
        path: PathBuf,
        reason: String,
    },

    // Data errors
    #[error("MISSING_FIELDS: [{spec}] missing required fields: {}", .missing.join(", "))]
    MissingFields { spec: String, missing: Vec<String> },

    #[error("UNRESOLVED_PLACEHOLDER: [{spec}] placeholder '{placeholder}' is not in the data")]
    UnresolvedPlaceholder { spec: String, placeholder: String },

    #[error("TEMPLATE_SYNTAX: [{spec}] {message}")]
    TemplateSyntax { spec: String, message: String },

    #[error("SCHEMA_VALIDATION: {}", join_violations(.0))]
    SchemaValidation(Vec<FieldViolation>),

    // Job file errors
    #[error("JOB_FORMAT: {0}")]
    JobFormat(String),

    // Spreadsheet errors
    #[error("SHEET_READ_ERROR: {0}")]
    SheetRead(String),

    #[error("SHEET_NOT_FOUND: sheet '{sheet}' not found. Found: {}", .available.join(", "))]
    SheetNotFound {
        sheet: String,
        available: Vec<String>,
    },

    #[error("SHEET_COLUMN: column '{column}' not found in sheet '{sheet}'. Found: {}", .found.join(", "))]
    SheetColumn {
        column: String,
        sheet: String,
        found: Vec<String>,
    },

    // Config errors
    #[error("CONFIG_PARSE_ERROR: {path}: {reason}")]
    ConfigParse { path: PathBuf, reason: String },

    // Session errors
    #[error("JOB_NOT_FOUND: job '{0}' does not exist")]
    JobNotFound(String),

    // Output errors
    #[error("ARCHIVE_ERROR: {0}")]
    Archive(String),

    // IO errors
    #[error("IO_ERROR: {0}")]
    Io(#[from] std::io::Error),

    // Generic errors
    #[error("{0}")]
    Generic(String),
}

impl ReportgenError {
    /// Stable machine-readable code (the prefix of the display string)
    pub fn code(&self) -> &'static str {
        match self {
            ReportgenError::SpecLoad { .. } => "SPEC_LOAD_ERROR",
            ReportgenError::TemplateNotFound { .. } => "TEMPLATE_NOT_FOUND",
            ReportgenError::InvalidTemplate { .. } => "INVALID_TEMPLATE",
            ReportgenError::MissingFields { .. } => "MISSING_FIELDS",
            ReportgenError::UnresolvedPlaceholder { .. } => "UNRESOLVED_PLACEHOLDER",
            ReportgenError::TemplateSyntax { .. } => "TEMPLATE_SYNTAX",
            ReportgenError::SchemaValidation(_) => "SCHEMA_VALIDATION",
            ReportgenError::JobFormat(_) => "JOB_FORMAT",
            ReportgenError::SheetRead(_) => "SHEET_READ_ERROR",
            ReportgenError::SheetNotFound { .. } => "SHEET_NOT_FOUND",
            ReportgenError::SheetColumn { .. } => "SHEET_COLUMN",
            ReportgenError::ConfigParse { .. } => "CONFIG_PARSE_ERROR",
            ReportgenError::JobNotFound(_) => "JOB_NOT_FOUND",
            ReportgenError::Archive(_) => "ARCHIVE_ERROR",
            ReportgenError::Io(_) => "IO_ERROR",
            ReportgenError::Generic(_) => "ERROR",
        }
    }
}

impl From<zip::result::ZipError> for ReportgenError {
    fn from(err: zip::result::ZipError) -> Self {
        ReportgenError::Archive(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ReportgenError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_message_enumerates_paths() {
        let err = ReportgenError::MissingFields {
            spec: "daily_report".to_string(),
            missing: vec!["ProjectName".to_string(), "Equipment.MBES.SerialNumber".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "MISSING_FIELDS: [daily_report] missing required fields: ProjectName, Equipment.MBES.SerialNumber"
        );
        assert_eq!(err.code(), "MISSING_FIELDS");
    }

    #[test]
    fn test_schema_validation_lists_each_violation() {
        let err = ReportgenError::SchemaValidation(vec![
            FieldViolation::new("ProjectName", "field required"),
            FieldViolation::new("Date", "expected a date like 2025-01-31"),
        ]);
        assert_eq!(
            err.to_string(),
            "SCHEMA_VALIDATION: ProjectName: field required; Date: expected a date like 2025-01-31"
        );
    }
}
