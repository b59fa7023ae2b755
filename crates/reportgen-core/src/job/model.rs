use crate::error::{ReportgenError, Result};
use chrono::NaiveDate;
use serde::Serialize;
use serde_json::{Map, Value};

/// Make / model / serial of one instrument
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct EquipmentItem {
    pub make: Option<String>,
    pub model: Option<String>,
    pub serial_number: Option<String>,
}

/// The survey's sensor suite
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub struct Equipment {
    /// Multibeam echosounder
    pub mbes: Option<EquipmentItem>,
    /// Inertial navigation system
    pub ins: Option<EquipmentItem>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Operators {
    pub party_chief: Option<String>,
    pub surveyor: Option<String>,
}

/// Caisson deployment identifiers: IP addresses and receiver/antenna serials
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CaissonFields {
    #[serde(rename = "CaissonNumber")]
    pub caisson_number: Option<String>,
    #[serde(rename = "IP_1")]
    pub ip_1: Option<String>,
    #[serde(rename = "IP_2")]
    pub ip_2: Option<String>,
    #[serde(rename = "SN_SBG1")]
    pub sn_sbg1: Option<String>,
    #[serde(rename = "SN_Septentrio1")]
    pub sn_septentrio1: Option<String>,
    #[serde(rename = "SN_Ant1")]
    pub sn_ant1: Option<String>,
    #[serde(rename = "SN_Ant2")]
    pub sn_ant2: Option<String>,
    #[serde(rename = "SN_SBG2")]
    pub sn_sbg2: Option<String>,
    #[serde(rename = "SN_Septentrio2")]
    pub sn_septentrio2: Option<String>,
    #[serde(rename = "SN_Ant3")]
    pub sn_ant3: Option<String>,
    #[serde(rename = "SN_Ant4")]
    pub sn_ant4: Option<String>,
}

/// Schema-validated job data
///
/// Field names map onto the job file keys (`ProjectName`, `SurveyVessel`,
/// `SN_Ant1`, ...). Keys the schema does not know are kept in `extra`.
///
/// Serializes every schema field (absent ones as `null`) followed by the
/// extra keys. Dates are written as `YYYY-MM-DD`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct JobData {
    pub project_name: String,
    pub client_name: Option<String>,
    pub date: Option<NaiveDate>,
    pub survey_vessel: Option<String>,
    pub equipment: Option<Equipment>,
    pub operators: Option<Operators>,
    pub notes: Option<String>,
    #[serde(flatten)]
    pub caisson: CaissonFields,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl JobData {
    pub fn to_value(&self) -> Result<Value> {
        serde_json::to_value(self)
            .map_err(|e| ReportgenError::Generic(format!("cannot serialize job data: {}", e)))
    }

    /// Render input form of the job: one mapping with every schema key
    pub fn to_map(&self) -> Result<Map<String, Value>> {
        match self.to_value()? {
            Value::Object(map) => Ok(map),
            other => Err(ReportgenError::Generic(format!(
                "job data serialized to {} instead of a mapping",
                other
            ))),
        }
    }
}

