//! Patient registry records

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{de_id, join_name, Appointment, Encounter};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmergencyContact {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub relationship: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// Serializes as `{}` when no provider was entered
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Insurance {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub policy_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_number: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Patient {
    #[serde(deserialize_with = "de_id")]
    pub id: String,
    pub mrn: Option<String>,
    pub first_name: String,
    pub last_name: String,
    pub middle_name: Option<String>,
    pub date_of_birth: Option<String>,
    pub gender: Option<String>,
    pub blood_type: Option<String>,
    pub marital_status: Option<String>,
    pub nationality: Option<String>,
    pub occupation: Option<String>,
    pub email: Option<String>,
    pub phone_number: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip_code: Option<String>,
    pub country: Option<String>,
    pub status: Option<String>,
    pub emergency_contact: Option<EmergencyContact>,
    pub insurance: Option<Insurance>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Patient {
    pub fn full_name(&self) -> String {
        join_name(&self.first_name, &self.last_name)
    }

    pub fn initials(&self) -> String {
        [&self.first_name, &self.last_name]
            .iter()
            .filter_map(|n| n.trim().chars().next())
            .flat_map(char::to_uppercase)
            .collect()
    }

    /// "Name - MRN" as used in patient pickers
    pub fn picker_label(&self) -> String {
        match self.mrn.as_deref() {
            Some(mrn) if !mrn.is_empty() => format!("{} - {}", self.full_name(), mrn),
            _ => self.full_name(),
        }
    }
}

/// Body for creating or updating a patient
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct NewPatient {
    pub first_name: String,
    pub last_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub middle_name: Option<String>,
    /// RFC 3339 timestamp
    pub date_of_birth: String,
    pub gender: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blood_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub marital_status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nationality: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zip_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    pub emergency_contact: EmergencyContact,
    pub insurance: Insurance,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Allergy {
    #[serde(deserialize_with = "de_id")]
    pub id: String,
    pub allergen: String,
    pub allergy_type: Option<String>,
    pub severity: Option<String>,
    pub reaction: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Medication {
    #[serde(deserialize_with = "de_id")]
    pub id: String,
    pub medication_name: String,
    pub dosage: Option<String>,
    pub frequency: Option<String>,
    pub instructions: Option<String>,
    pub status: Option<String>,
}

impl Medication {
    pub fn is_active(&self) -> bool {
        self.status.as_deref() == Some("active")
    }
}

/// Clinical history returned by `/pasien/:id/riwayat`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PatientTimeline {
    pub allergies: Vec<Allergy>,
    pub medications: Vec<Medication>,
    pub encounters: Vec<Encounter>,
    pub appointments: Vec<Appointment>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl PatientTimeline {
    pub fn active_medications(&self) -> impl Iterator<Item = &Medication> {
        self.medications.iter().filter(|m| m.is_active())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_patient_picker_label() {
        let mut patient = Patient {
            first_name: "Budi".into(),
            last_name: "Santoso".into(),
            mrn: Some("MRN-0001".into()),
            ..Default::default()
        };
        assert_eq!(patient.picker_label(), "Budi Santoso - MRN-0001");
        patient.mrn = None;
        assert_eq!(patient.picker_label(), "Budi Santoso");
        assert_eq!(patient.initials(), "BS");
    }

    #[test]
    fn test_empty_insurance_serializes_as_empty_object() {
        let body = serde_json::to_value(Insurance::default()).unwrap();
        assert_eq!(body, json!({}));
    }

    #[test]
    fn test_timeline_filters_active_medications() {
        let timeline: PatientTimeline = serde_json::from_value(json!({
            "medications": [
                {"id": 1, "medication_name": "Amoxicillin", "status": "active"},
                {"id": 2, "medication_name": "Ibuprofen", "status": "stopped"}
            ]
        })).unwrap();
        let active: Vec<_> = timeline.active_medications().map(|m| m.medication_name.as_str()).collect();
        assert_eq!(active, vec!["Amoxicillin"]);
        assert!(timeline.encounters.is_empty());
    }
}
