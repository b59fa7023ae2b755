//! Job interchange - load and save raw job data as YAML or JSON

use crate::error::{ReportgenError, Result};
use serde_json::{Map, Value};
use std::fmt;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobFormat {
    Yaml,
    Json,
}

impl JobFormat {
    /// Detect from the file extension (`.yaml`, `.yml`, `.json`)
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        match ext.as_deref() {
            Some("yaml") | Some("yml") => Ok(JobFormat::Yaml),
            Some("json") => Ok(JobFormat::Json),
            _ => Err(ReportgenError::JobFormat(format!(
                "'{}' is not a .yaml, .yml or .json file",
                path.display()
            ))),
        }
    }
}

impl fmt::Display for JobFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JobFormat::Yaml => write!(f, "YAML"),
            JobFormat::Json => write!(f, "JSON"),
        }
    }
}

/// Parse job data; an empty or `null` document is an empty mapping
pub fn load_job(bytes: &[u8], format: JobFormat) -> Result<Value> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Object(Map::new()));
    }

    let value: Value = match format {
        JobFormat::Yaml => serde_yaml::from_slice(bytes)
            .map_err(|e| ReportgenError::JobFormat(format!("invalid YAML: {}", e)))?,
        JobFormat::Json => serde_json::from_slice(bytes)
            .map_err(|e| ReportgenError::JobFormat(format!("invalid JSON: {}", e)))?,
    };

    match value {
        Value::Null => Ok(Value::Object(Map::new())),
        Value::Object(_) => Ok(value),
        _ => Err(ReportgenError::JobFormat(format!(
            "{} job data must be a mapping at the top level",
            format
        ))),
    }
}

/// Serialize job data, keeping key order
///
/// JSON is pretty-printed with two-space indentation and keeps non-ASCII
/// text as-is.
pub fn save_job(job: &Value, format: JobFormat) -> Result<String> {
    match format {
        JobFormat::Yaml => serde_yaml::to_string(job)
            .map_err(|e| ReportgenError::JobFormat(format!("cannot write YAML: {}", e))),
        JobFormat::Json => serde_json::to_string_pretty(job)
            .map(|mut text| {
                text.push('\n');
                text
            })
            .map_err(|e| ReportgenError::JobFormat(format!("cannot write JSON: {}", e))),
    }
}

/// Read a job file, picking the format from its extension
pub fn load_job_file(path: &Path) -> Result<Value> {
    let format = JobFormat::from_path(path)?;
    let bytes = std::fs::read(path)?;
    load_job(&bytes, format)
}

/// Write a job file, picking the format from its extension
pub fn save_job_file(path: &Path, job: &Value) -> Result<()> {
    let format = JobFormat::from_path(path)?;
    std::fs::write(path, save_job(job, format)?)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::path::PathBuf;

    #[test]
    fn test_format_from_extension() {
        assert_eq!(JobFormat::from_path(&PathBuf::from("a.YML")).unwrap(), JobFormat::Yaml);
        assert_eq!(JobFormat::from_path(&PathBuf::from("a.json")).unwrap(), JobFormat::Json);
        let err = JobFormat::from_path(&PathBuf::from("a.txt")).unwrap_err();
        assert_eq!(err.code(), "JOB_FORMAT");
    }

    #[test]
    fn test_yaml_keeps_key_order() {
        let text = "Zeta: 1\nProjectName: Alpha\nEquipment:\n  MBES:\n    Make: K\n";
        let value = load_job(text.as_bytes(), JobFormat::Yaml).unwrap();
        let keys: Vec<_> = value.as_object().unwrap().keys().cloned().collect();
        assert_eq!(keys, vec!["Zeta", "ProjectName", "Equipment"]);

        assert_eq!(save_job(&value, JobFormat::Yaml).unwrap(), text);
    }

    #[test]
    fn test_json_is_pretty_and_keeps_unicode() {
        let value = json!({"ProjectName": "Ærø", "Depth": 12});
        let text = save_job(&value, JobFormat::Json).unwrap();
        assert_eq!(text, "{\n  \"ProjectName\": \"Ærø\",\n  \"Depth\": 12\n}\n");
    }

    #[test]
    fn test_yaml_and_json_carry_the_same_structure() {
        let yaml = "ProjectName: Alpha\nOperators:\n  PartyChief: Ana\nTags: [a, b]\n";
        let from_yaml = load_job(yaml.as_bytes(), JobFormat::Yaml).unwrap();
        let json_text = save_job(&from_yaml, JobFormat::Json).unwrap();
        let from_json = load_job(json_text.as_bytes(), JobFormat::Json).unwrap();
        assert_eq!(from_yaml, from_json);
    }

    #[test]
    fn test_empty_documents_are_empty_mappings() {
        assert_eq!(load_job(b"", JobFormat::Yaml).unwrap(), json!({}));
        assert_eq!(load_job(b"  \n", JobFormat::Json).unwrap(), json!({}));
        assert_eq!(load_job(b"~\n", JobFormat::Yaml).unwrap(), json!({}));
        assert_eq!(load_job(b"null", JobFormat::Json).unwrap(), json!({}));
    }

    #[test]
    fn test_non_mapping_top_level_is_rejected() {
        let err = load_job(b"- a\n- b\n", JobFormat::Yaml).unwrap_err();
        assert!(err.to_string().contains("mapping"));
        assert!(load_job(b"{not json", JobFormat::Json).is_err());
    }
}
