//! API Models
//!
//! Data structures mirroring the backend's JSON bodies. Every record keeps
//! unknown fields in `extra` so nothing the server sends is dropped.

mod user;
mod auth;
mod page;
mod patient;
mod encounter;
mod appointment;

pub use user::{Permission, Role, User};
pub use auth::{LoginRequest, LoginResponse, RefreshRequest, TokenPair};
pub use page::Paginated;
pub use patient::{Allergy, EmergencyContact, Insurance, Medication, NewPatient, Patient, PatientTimeline};
pub use encounter::{
    ClinicalNote, Diagnosis, Encounter, NewClinicalNote, NewDiagnosis, NewEncounter, NewVitalSigns,
    StatusUpdate, VitalSigns,
};
pub use appointment::{Appointment, AvailabilitySlot, CancelRequest, NewAppointment};

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Backend identifiers are UUID strings, but older endpoints send numbers
pub(crate) fn de_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(de_opt_id(deserializer)?.unwrap_or_default())
}

pub(crate) fn de_opt_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(other) => Err(serde::de::Error::custom(format!("invalid identifier: {}", other))),
    }
}

/// Patient, provider or author embedded in another record
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, Deserialize)]
#[serde(default)]
pub struct PersonRef {
    #[serde(deserialize_with = "de_id")]
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub mrn: Option<String>,
}

impl PersonRef {
    pub fn full_name(&self) -> String {
        join_name(&self.first_name, &self.last_name)
    }
}

pub(crate) fn join_name(first: &str, last: &str) -> String {
    format!("{} {}", first.trim(), last.trim()).trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_person_ref_accepts_numeric_id() {
        let person: PersonRef = serde_json::from_value(json!({
            "id": 42, "first_name": "Siti", "last_name": "Rahma"
        })).unwrap();
        assert_eq!(person.id, "42");
        assert_eq!(person.full_name(), "Siti Rahma");
        assert!(person.mrn.is_none());
    }

    #[test]
    fn test_person_ref_rejects_object_id() {
        let result: Result<PersonRef, _> = serde_json::from_value(json!({"id": {"x": 1}}));
        assert!(result.is_err());
    }
}
