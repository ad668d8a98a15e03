//! Clinical encounter records and their sub-records

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{de_id, de_opt_id, PersonRef};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClinicalNote {
    #[serde(deserialize_with = "de_id")]
    pub id: String,
    pub note_type: String,
    pub subjective: Option<String>,
    pub objective: Option<String>,
    pub assessment: Option<String>,
    pub plan: Option<String>,
    pub author: Option<PersonRef>,
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Diagnosis {
    #[serde(deserialize_with = "de_id")]
    pub id: String,
    pub icd10_code: String,
    pub diagnosis_type: String,
    pub description: String,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VitalSigns {
    #[serde(deserialize_with = "de_id")]
    pub id: String,
    pub temperature: Option<f64>,
    pub temperature_unit: Option<String>,
    pub heart_rate: Option<i64>,
    pub respiratory_rate: Option<i64>,
    pub blood_pressure_systolic: Option<i64>,
    pub blood_pressure_diastolic: Option<i64>,
    pub oxygen_saturation: Option<f64>,
    pub weight: Option<f64>,
    pub height: Option<f64>,
    pub bmi: Option<f64>,
    pub pain: Option<i64>,
    pub notes: Option<String>,
    pub measured_at: Option<String>,
}

impl VitalSigns {
    /// "120/80" when both readings are present
    pub fn blood_pressure(&self) -> Option<String> {
        match (self.blood_pressure_systolic, self.blood_pressure_diastolic) {
            (Some(sys), Some(dia)) => Some(format!("{}/{}", sys, dia)),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Encounter {
    #[serde(deserialize_with = "de_id")]
    pub id: String,
    pub encounter_number: Option<String>,
    #[serde(deserialize_with = "de_opt_id")]
    pub patient_id: Option<String>,
    #[serde(deserialize_with = "de_opt_id")]
    pub provider_id: Option<String>,
    pub patient: Option<PersonRef>,
    pub provider: Option<PersonRef>,
    pub encounter_type: String,
    pub status: String,
    pub priority: Option<String>,
    pub admission_date: Option<String>,
    pub discharge_date: Option<String>,
    pub department: Option<String>,
    pub location: Option<String>,
    pub chief_complaint: Option<String>,
    pub reason_for_visit: Option<String>,
    pub clinical_notes: Vec<ClinicalNote>,
    pub diagnoses: Vec<Diagnosis>,
    pub vital_signs: Vec<VitalSigns>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct NewEncounter {
    pub patient_id: String,
    pub provider_id: String,
    pub encounter_type: String,
    pub priority: String,
    /// RFC 3339 timestamp
    pub admission_date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chief_complaint: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason_for_visit: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatusUpdate<'a> {
    pub status: &'a str,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct NewClinicalNote {
    pub note_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subjective: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub objective: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assessment: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plan: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct NewDiagnosis {
    pub icd10_code: String,
    pub diagnosis_type: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Blank readings are sent as explicit nulls
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct NewVitalSigns {
    pub temperature: Option<f64>,
    pub temperature_unit: String,
    pub heart_rate: Option<i64>,
    pub respiratory_rate: Option<i64>,
    pub blood_pressure_systolic: Option<i64>,
    pub blood_pressure_diastolic: Option<i64>,
    pub oxygen_saturation: Option<f64>,
    pub weight: Option<f64>,
    pub height: Option<f64>,
    pub pain: Option<i64>,
    pub notes: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_encounter_with_nested_records() {
        let encounter: Encounter = serde_json::from_value(json!({
            "id": "e-1",
            "patient_id": 7,
            "encounter_type": "outpatient",
            "status": "in_progress",
            "patient": {"id": 7, "first_name": "Dewi", "last_name": "Lestari", "mrn": "MRN-7"},
            "vital_signs": [{"id": 1, "blood_pressure_systolic": 120, "blood_pressure_diastolic": 80}],
            "ward": "B2"
        })).unwrap();
        assert_eq!(encounter.patient_id.as_deref(), Some("7"));
        assert_eq!(encounter.vital_signs[0].blood_pressure().as_deref(), Some("120/80"));
        assert!(encounter.clinical_notes.is_empty());
        assert_eq!(encounter.extra.get("ward"), Some(&json!("B2")));
    }

    #[test]
    fn test_vitals_blank_fields_serialize_as_null() {
        let vitals = NewVitalSigns {
            heart_rate: Some(72),
            temperature_unit: "celsius".into(),
            ..Default::default()
        };
        let body = serde_json::to_value(&vitals).unwrap();
        assert_eq!(body["heart_rate"], json!(72));
        assert_eq!(body["temperature"], Value::Null);
        assert_eq!(body["notes"], json!(""));
    }
}
