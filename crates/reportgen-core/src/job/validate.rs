use super::model::{CaissonFields, Equipment, EquipmentItem, JobData, Operators};
use crate::error::FieldViolation;
use chrono::NaiveDate;
use serde_json::{Map, Value};
use tracing::debug;

/// Top-level keys the schema knows about
pub const SCHEMA_KEYS: &[&str] = &[
    "ProjectName",
    "ClientName",
    "Date",
    "SurveyVessel",
    "Equipment",
    "Operators",
    "Notes",
    "CaissonNumber",
    "IP_1",
    "IP_2",
    "SN_SBG1",
    "SN_Septentrio1",
    "SN_Ant1",
    "SN_Ant2",
    "SN_SBG2",
    "SN_Septentrio2",
    "SN_Ant3",
    "SN_Ant4",
];

/// Collects every violation instead of stopping at the first
#[derive(Default)]
struct Checker {
    violations: Vec<FieldViolation>,
}

fn join(parent: &str, key: &str) -> String {
    if parent.is_empty() {
        key.to_string()
    } else {
        format!("{}.{}", parent, key)
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "a mapping",
    }
}

fn is_known_nested(record: &str, key: &str) -> bool {
    let known: &[&str] = match record {
        "Equipment" => &["MBES", "INS"],
        "Operators" => &["PartyChief", "Surveyor"],
        _ => &["Make", "Model", "SerialNumber"],
    };
    known.contains(&key)
}

impl Checker {
    fn violation(&mut self, path: String, message: impl Into<String>) {
        self.violations.push(FieldViolation::new(path, message));
    }

    /// Optional text field; numbers are taken in their text form
    fn text(&mut self, map: &Map<String, Value>, parent: &str, key: &str) -> Option<String> {
        match map.get(key)? {
            Value::Null => None,
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            other => {
                let message = format!("expected a string, got {}", type_name(other));
                self.violation(join(parent, key), message);
                None
            }
        }
    }

    /// Optional nested record; `None` when absent, null or not a mapping
    fn mapping<'a>(
        &mut self,
        map: &'a Map<String, Value>,
        parent: &str,
        key: &str,
    ) -> Option<&'a Map<String, Value>> {
        match map.get(key)? {
            Value::Null => None,
            Value::Object(inner) => {
                for unknown in inner.keys().filter(|k| !is_known_nested(key, k)) {
                    debug!(field = %join(&join(parent, key), unknown), "ignoring unknown nested field");
                }
                Some(inner)
            }
            other => {
                let message = format!("expected a mapping, got {}", type_name(other));
                self.violation(join(parent, key), message);
                None
            }
        }
    }

    fn project_name(&mut self, map: &Map<String, Value>) -> String {
        match map.get("ProjectName") {
            None | Some(Value::Null) => {
                self.violation("ProjectName".to_string(), "field required");
                String::new()
            }
            Some(_) => match self.text(map, "", "ProjectName") {
                Some(name) if name.trim().is_empty() => {
                    self.violation("ProjectName".to_string(), "must not be empty");
                    name
                }
                Some(name) => name,
                None => String::new(),
            },
        }
    }

    fn date(&mut self, map: &Map<String, Value>) -> Option<NaiveDate> {
        let raw = self.text(map, "", "Date")?;
        let raw = raw.trim();
        if raw.is_empty() {
            return None;
        }
        match NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
            Ok(date) => Some(date),
            Err(_) => {
                self.violation(
                    "Date".to_string(),
                    format!("expected a date like 2025-01-31, got '{}'", raw),
                );
                None
            }
        }
    }

    fn equipment_item(&mut self, map: &Map<String, Value>, parent: &str, key: &str) -> Option<EquipmentItem> {
        let inner = self.mapping(map, parent, key)?;
        let path = join(parent, key);
        Some(EquipmentItem {
            make: self.text(inner, &path, "Make"),
            model: self.text(inner, &path, "Model"),
            serial_number: self.text(inner, &path, "SerialNumber"),
        })
    }

    fn equipment(&mut self, map: &Map<String, Value>) -> Option<Equipment> {
        let inner = self.mapping(map, "", "Equipment")?;
        Some(Equipment {
            mbes: self.equipment_item(inner, "Equipment", "MBES"),
            ins: self.equipment_item(inner, "Equipment", "INS"),
        })
    }

    fn operators(&mut self, map: &Map<String, Value>) -> Option<Operators> {
        let inner = self.mapping(map, "", "Operators")?;
        Some(Operators {
            party_chief: self.text(inner, "Operators", "PartyChief"),
            surveyor: self.text(inner, "Operators", "Surveyor"),
        })
    }

    fn caisson(&mut self, map: &Map<String, Value>) -> CaissonFields {
        CaissonFields {
            caisson_number: self.text(map, "", "CaissonNumber"),
            ip_1: self.text(map, "", "IP_1"),
            ip_2: self.text(map, "", "IP_2"),
            sn_sbg1: self.text(map, "", "SN_SBG1"),
            sn_septentrio1: self.text(map, "", "SN_Septentrio1"),
            sn_ant1: self.text(map, "", "SN_Ant1"),
            sn_ant2: self.text(map, "", "SN_Ant2"),
            sn_sbg2: self.text(map, "", "SN_SBG2"),
            sn_septentrio2: self.text(map, "", "SN_Septentrio2"),
            sn_ant3: self.text(map, "", "SN_Ant3"),
            sn_ant4: self.text(map, "", "SN_Ant4"),
        }
    }
}

/// Check raw job data against the job schema
///
/// # Errors
///
/// Every violation found, each as a (path, message) pair.
pub fn validate_job(raw: &Value) -> Result<JobData, Vec<FieldViolation>> {
    let Value::Object(map) = raw else {
        return Err(vec![FieldViolation::new(
            "",
            format!("expected a mapping at the top level, got {}", type_name(raw)),
        )]);
    };

    let mut checker = Checker::default();
    let job = JobData {
        project_name: checker.project_name(map),
        client_name: checker.text(map, "", "ClientName"),
        date: checker.date(map),
        survey_vessel: checker.text(map, "", "SurveyVessel"),
        equipment: checker.equipment(map),
        operators: checker.operators(map),
        notes: checker.text(map, "", "Notes"),
        caisson: checker.caisson(map),
        extra: map
            .iter()
            .filter(|(key, _)| !SCHEMA_KEYS.contains(&key.as_str()))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect(),
    };

    if !checker.violations.is_empty() {
        return Err(checker.violations);
    }
    for key in job.extra.keys() {
        debug!(field = %key, "passing through field outside the job schema");
    }
    Ok(job)
}
