//! Appointment scheduling records

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{de_id, de_opt_id, PersonRef};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Appointment {
    #[serde(deserialize_with = "de_id")]
    pub id: String,
    #[serde(deserialize_with = "de_opt_id")]
    pub patient_id: Option<String>,
    #[serde(deserialize_with = "de_opt_id")]
    pub provider_id: Option<String>,
    pub patient: Option<PersonRef>,
    pub provider: Option<PersonRef>,
    pub appointment_type: String,
    pub status: String,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    /// Minutes
    pub duration: Option<u32>,
    pub location: Option<String>,
    pub reason_for_visit: Option<String>,
    pub notes: Option<String>,
    pub cancellation_reason: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Appointment {
    /// Check-in is offered only before the visit starts
    pub fn can_check_in(&self) -> bool {
        matches!(self.status.as_str(), "scheduled" | "confirmed")
    }

    pub fn can_cancel(&self) -> bool {
        matches!(self.status.as_str(), "scheduled" | "confirmed")
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct NewAppointment {
    pub patient_id: String,
    pub provider_id: String,
    pub appointment_type: String,
    /// RFC 3339 timestamp
    pub start_time: String,
    pub duration: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason_for_visit: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CancelRequest<'a> {
    pub reason: &'a str,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AvailabilitySlot {
    pub start_time: String,
    pub end_time: Option<String>,
    pub available: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_check_in_only_before_visit() {
        let mut appointment = Appointment { status: "scheduled".into(), ..Default::default() };
        assert!(appointment.can_check_in());
        appointment.status = "checked_in".into();
        assert!(!appointment.can_check_in());
        assert!(!appointment.can_cancel());
    }

    #[test]
    fn test_slot_defaults_unavailable() {
        let slot: AvailabilitySlot = serde_json::from_value(json!({"start_time": "2026-10-16T09:00:00Z"})).unwrap();
        assert!(!slot.available);
    }
}
