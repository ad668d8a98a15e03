//! Form Validation
//!
//! Field rules and payload shaping for every form. Validation runs before
//! any request is built; a form either yields a request body or the
//! per-field messages to show under its inputs.

use std::collections::BTreeMap;
use std::sync::OnceLock;

use chrono::{Local, TimeZone};
use regex::Regex;

use crate::format::{date_input_to_iso, datetime_input_to_iso};
use crate::labels::{APPOINTMENT_DURATIONS, DEFAULT_DURATION};
use crate::models::{
    EmergencyContact, Insurance, NewAppointment, NewClinicalNote, NewDiagnosis, NewEncounter, NewPatient,
    NewVitalSigns,
};

pub const EMAIL_REQUIRED: &str = "Email wajib diisi";
pub const EMAIL_INVALID: &str = "Alamat email tidak valid";
pub const PASSWORD_REQUIRED: &str = "Kata sandi wajib diisi";
pub const PASSWORD_TOO_SHORT: &str = "Kata sandi minimal 6 karakter";
pub const PASSWORD_MIN_LEN: usize = 6;

pub const FIRST_NAME_REQUIRED: &str = "Nama depan wajib diisi";
pub const LAST_NAME_REQUIRED: &str = "Nama belakang wajib diisi";
pub const DOB_REQUIRED: &str = "Tanggal lahir wajib diisi";
pub const GENDER_REQUIRED: &str = "Jenis kelamin wajib diisi";

pub const PATIENT_REQUIRED: &str = "Pasien wajib dipilih";
pub const ENCOUNTER_TYPE_REQUIRED: &str = "Tipe kunjungan wajib dipilih";
pub const ADMISSION_REQUIRED: &str = "Tanggal masuk wajib diisi";

pub const PROVIDER_REQUIRED: &str = "Dokter wajib dipilih";
pub const TYPE_REQUIRED: &str = "Tipe wajib dipilih";
pub const START_REQUIRED: &str = "Waktu mulai wajib diisi";
pub const DURATION_INVALID: &str = "Durasi tidak valid";

pub const NOTE_TYPE_REQUIRED: &str = "Tipe catatan wajib dipilih";
pub const ICD10_REQUIRED: &str = "Kode ICD-10 wajib diisi";
pub const DIAGNOSIS_TYPE_REQUIRED: &str = "Tipe diagnosis wajib dipilih";
pub const DESCRIPTION_REQUIRED: &str = "Deskripsi wajib diisi";
pub const NUMBER_INVALID: &str = "Harus berupa angka";
pub const CANCEL_REASON_REQUIRED: &str = "Alasan pembatalan wajib diisi";

/// Shown instead of field errors when the encounter form has no patient
pub const SELECT_PATIENT: &str = "Silakan pilih pasien";

const EMAIL_PATTERN: &str = r"(?i)^[A-Z0-9._%+-]+@[A-Z0-9.-]+\.[A-Z]{2,}$";

fn email_regex() -> Option<&'static Regex> {
    static EMAIL: OnceLock<Option<Regex>> = OnceLock::new();
    EMAIL
        .get_or_init(|| match Regex::new(EMAIL_PATTERN) {
            Ok(re) => Some(re),
            Err(e) => {
                log::error!("Invalid email pattern: {}", e);
                None
            }
        })
        .as_ref()
}

pub fn is_valid_email(value: &str) -> bool {
    email_regex().map_or(false, |re| re.is_match(value.trim()))
}

/// Messages keyed by field name, in field order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<&'static str, String>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.entry(field).or_insert_with(|| message.into());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.0.iter().map(|(k, v)| (*k, v.as_str()))
    }

    /// Record `message` when `value` is blank
    fn require(&mut self, field: &'static str, value: &str, message: &str) {
        if value.trim().is_empty() {
            self.insert(field, message);
        }
    }

    fn finish<T>(self, value: impl FnOnce() -> T) -> Result<T, FieldErrors> {
        if self.is_empty() {
            Ok(value())
        } else {
            Err(self)
        }
    }
}

/// Trimmed value, or `None` when blank
pub fn optional(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

fn parse_number<T: std::str::FromStr>(
    errors: &mut FieldErrors,
    field: &'static str,
    value: &str,
) -> Option<T> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    match value.parse() {
        Ok(n) => Some(n),
        Err(_) => {
            errors.insert(field, NUMBER_INVALID);
            None
        }
    }
}

// ==================== Login ====================

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

impl LoginForm {
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        if self.email.trim().is_empty() {
            errors.insert("email", EMAIL_REQUIRED);
        } else if !is_valid_email(&self.email) {
            errors.insert("email", EMAIL_INVALID);
        }
        if self.password.is_empty() {
            errors.insert("password", PASSWORD_REQUIRED);
        } else if self.password.chars().count() < PASSWORD_MIN_LEN {
            errors.insert("password", PASSWORD_TOO_SHORT);
        }
        errors.finish(|| ())
    }
}

// ==================== Patient ====================

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PatientForm {
    pub first_name: String,
    pub last_name: String,
    pub middle_name: String,
    /// `YYYY-MM-DD`
    pub date_of_birth: String,
    pub gender: String,
    pub blood_type: String,
    pub marital_status: String,
    pub nationality: String,
    pub email: String,
    pub phone_number: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub country: String,
    pub emergency_contact_name: String,
    pub emergency_contact_relationship: String,
    pub emergency_contact_phone: String,
    pub emergency_contact_email: String,
    pub insurance_provider: String,
    pub insurance_policy_number: String,
    pub insurance_group_number: String,
}

impl PatientForm {
    pub fn to_payload(&self) -> Result<NewPatient, FieldErrors> {
        let mut errors = FieldErrors::new();
        errors.require("first_name", &self.first_name, FIRST_NAME_REQUIRED);
        errors.require("last_name", &self.last_name, LAST_NAME_REQUIRED);
        errors.require("date_of_birth", &self.date_of_birth, DOB_REQUIRED);
        errors.require("gender", &self.gender, GENDER_REQUIRED);

        let date_of_birth = date_input_to_iso(&self.date_of_birth);
        if date_of_birth.is_none() {
            errors.insert("date_of_birth", DOB_REQUIRED);
        }

        errors.finish(|| NewPatient {
            first_name: self.first_name.trim().to_string(),
            last_name: self.last_name.trim().to_string(),
            middle_name: optional(&self.middle_name),
            date_of_birth: date_of_birth.unwrap_or_default(),
            gender: self.gender.clone(),
            blood_type: optional(&self.blood_type),
            marital_status: optional(&self.marital_status),
            nationality: optional(&self.nationality),
            email: optional(&self.email),
            phone_number: optional(&self.phone_number),
            address: optional(&self.address),
            city: optional(&self.city),
            state: optional(&self.state),
            zip_code: optional(&self.zip_code),
            country: optional(&self.country),
            emergency_contact: EmergencyContact {
                name: optional(&self.emergency_contact_name),
                relationship: optional(&self.emergency_contact_relationship),
                phone_number: optional(&self.emergency_contact_phone),
                email: optional(&self.emergency_contact_email),
            },
            insurance: self.insurance(),
        })
    }

    /// Policy and group numbers only travel with a provider
    fn insurance(&self) -> Insurance {
        match optional(&self.insurance_provider) {
            Some(provider) => Insurance {
                provider: Some(provider),
                policy_number: optional(&self.insurance_policy_number),
                group_number: optional(&self.insurance_group_number),
            },
            None => Insurance::default(),
        }
    }
}

// ==================== Encounter ====================

#[derive(Debug, Clone, PartialEq)]
pub struct EncounterForm {
    pub patient_id: String,
    pub encounter_type: String,
    pub priority: String,
    /// `datetime-local` value
    pub admission_date: String,
    pub department: String,
    pub location: String,
    pub chief_complaint: String,
    pub reason_for_visit: String,
}

impl Default for EncounterForm {
    fn default() -> Self {
        Self {
            patient_id: String::new(),
            encounter_type: String::new(),
            priority: "routine".to_string(),
            admission_date: String::new(),
            department: String::new(),
            location: String::new(),
            chief_complaint: String::new(),
            reason_for_visit: String::new(),
        }
    }
}

impl EncounterForm {
    /// A missing patient is reported on its own, before the other fields
    pub fn has_patient(&self) -> bool {
        let id = self.patient_id.trim();
        !id.is_empty() && id != "null"
    }

    /// Shape the payload with the signed-in user as provider
    pub fn to_payload(&self, provider_id: &str) -> Result<NewEncounter, FieldErrors> {
        self.to_payload_in(provider_id, &Local)
    }

    pub fn to_payload_in<Tz: TimeZone>(&self, provider_id: &str, zone: &Tz) -> Result<NewEncounter, FieldErrors> {
        let mut errors = FieldErrors::new();
        if !self.has_patient() {
            errors.insert("patient_id", PATIENT_REQUIRED);
        }
        errors.require("encounter_type", &self.encounter_type, ENCOUNTER_TYPE_REQUIRED);
        let admission_date = datetime_input_to_iso(&self.admission_date, zone);
        if admission_date.is_none() {
            errors.insert("admission_date", ADMISSION_REQUIRED);
        }

        errors.finish(|| NewEncounter {
            patient_id: self.patient_id.trim().to_string(),
            provider_id: provider_id.to_string(),
            encounter_type: self.encounter_type.clone(),
            priority: optional(&self.priority).unwrap_or_else(|| "routine".to_string()),
            admission_date: admission_date.unwrap_or_default(),
            department: optional(&self.department),
            location: optional(&self.location),
            chief_complaint: optional(&self.chief_complaint),
            reason_for_visit: optional(&self.reason_for_visit),
        })
    }
}

// ==================== Appointment ====================

#[derive(Debug, Clone, PartialEq)]
pub struct AppointmentForm {
    pub patient_id: String,
    pub provider_id: String,
    pub appointment_type: String,
    /// `datetime-local` value
    pub start_time: String,
    pub duration: String,
    pub location: String,
    pub reason_for_visit: String,
    pub notes: String,
}

impl Default for AppointmentForm {
    fn default() -> Self {
        Self {
            patient_id: String::new(),
            provider_id: String::new(),
            appointment_type: String::new(),
            start_time: String::new(),
            duration: DEFAULT_DURATION.to_string(),
            location: String::new(),
            reason_for_visit: String::new(),
            notes: String::new(),
        }
    }
}

impl AppointmentForm {
    pub fn to_payload(&self) -> Result<NewAppointment, FieldErrors> {
        self.to_payload_in(&Local)
    }

    pub fn to_payload_in<Tz: TimeZone>(&self, zone: &Tz) -> Result<NewAppointment, FieldErrors> {
        let mut errors = FieldErrors::new();
        errors.require("patient_id", &self.patient_id, PATIENT_REQUIRED);
        errors.require("provider_id", &self.provider_id, PROVIDER_REQUIRED);
        errors.require("appointment_type", &self.appointment_type, TYPE_REQUIRED);
        let start_time = datetime_input_to_iso(&self.start_time, zone);
        if start_time.is_none() {
            errors.insert("start_time", START_REQUIRED);
        }
        let duration = self
            .duration
            .trim()
            .parse::<u32>()
            .ok()
            .filter(|d| APPOINTMENT_DURATIONS.contains(d));
        if duration.is_none() {
            errors.insert("duration", DURATION_INVALID);
        }

        errors.finish(|| NewAppointment {
            patient_id: self.patient_id.trim().to_string(),
            provider_id: self.provider_id.trim().to_string(),
            appointment_type: self.appointment_type.clone(),
            start_time: start_time.unwrap_or_default(),
            duration: duration.unwrap_or(DEFAULT_DURATION),
            location: optional(&self.location),
            reason_for_visit: optional(&self.reason_for_visit),
            notes: optional(&self.notes),
        })
    }
}

/// Reason entered in the cancel prompt, trimmed
pub fn cancel_reason(input: Option<&str>) -> Result<String, FieldErrors> {
    match input.and_then(optional) {
        Some(reason) => Ok(reason),
        None => {
            let mut errors = FieldErrors::new();
            errors.insert("reason", CANCEL_REASON_REQUIRED);
            Err(errors)
        }
    }
}

// ==================== Encounter detail panels ====================

#[derive(Debug, Clone, PartialEq)]
pub struct NoteForm {
    pub note_type: String,
    pub subjective: String,
    pub objective: String,
    pub assessment: String,
    pub plan: String,
}

impl Default for NoteForm {
    fn default() -> Self {
        Self {
            note_type: "soap".to_string(),
            subjective: String::new(),
            objective: String::new(),
            assessment: String::new(),
            plan: String::new(),
        }
    }
}

impl NoteForm {
    pub fn to_payload(&self) -> Result<NewClinicalNote, FieldErrors> {
        let mut errors = FieldErrors::new();
        errors.require("note_type", &self.note_type, NOTE_TYPE_REQUIRED);
        errors.finish(|| NewClinicalNote {
            note_type: self.note_type.clone(),
            subjective: optional(&self.subjective),
            objective: optional(&self.objective),
            assessment: optional(&self.assessment),
            plan: optional(&self.plan),
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DiagnosisForm {
    pub icd10_code: String,
    pub diagnosis_type: String,
    pub description: String,
    pub notes: String,
}

impl Default for DiagnosisForm {
    fn default() -> Self {
        Self {
            icd10_code: String::new(),
            diagnosis_type: "primary".to_string(),
            description: String::new(),
            notes: String::new(),
        }
    }
}

impl DiagnosisForm {
    pub fn to_payload(&self) -> Result<NewDiagnosis, FieldErrors> {
        let mut errors = FieldErrors::new();
        errors.require("icd10_code", &self.icd10_code, ICD10_REQUIRED);
        errors.require("diagnosis_type", &self.diagnosis_type, DIAGNOSIS_TYPE_REQUIRED);
        errors.require("description", &self.description, DESCRIPTION_REQUIRED);
        errors.finish(|| NewDiagnosis {
            icd10_code: self.icd10_code.trim().to_uppercase(),
            diagnosis_type: self.diagnosis_type.clone(),
            description: self.description.trim().to_string(),
            notes: optional(&self.notes),
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct VitalsForm {
    pub temperature: String,
    pub temperature_unit: String,
    pub heart_rate: String,
    pub respiratory_rate: String,
    pub blood_pressure_systolic: String,
    pub blood_pressure_diastolic: String,
    pub oxygen_saturation: String,
    pub weight: String,
    pub height: String,
    pub pain: String,
    pub notes: String,
}

impl Default for VitalsForm {
    fn default() -> Self {
        Self {
            temperature: String::new(),
            temperature_unit: "celsius".to_string(),
            heart_rate: String::new(),
            respiratory_rate: String::new(),
            blood_pressure_systolic: String::new(),
            blood_pressure_diastolic: String::new(),
            oxygen_saturation: String::new(),
            weight: String::new(),
            height: String::new(),
            pain: String::new(),
            notes: String::new(),
        }
    }
}

impl VitalsForm {
    /// Blank readings become nulls; text that is not a number is an error
    pub fn to_payload(&self) -> Result<NewVitalSigns, FieldErrors> {
        let mut errors = FieldErrors::new();
        let temperature = parse_number::<f64>(&mut errors, "temperature", &self.temperature);
        let heart_rate = parse_number::<i64>(&mut errors, "heart_rate", &self.heart_rate);
        let respiratory_rate = parse_number::<i64>(&mut errors, "respiratory_rate", &self.respiratory_rate);
        let blood_pressure_systolic = parse_number::<i64>(&mut errors, "blood_pressure_systolic", &self.blood_pressure_systolic);
        let blood_pressure_diastolic =
            parse_number::<i64>(&mut errors, "blood_pressure_diastolic", &self.blood_pressure_diastolic);
        let oxygen_saturation = parse_number::<f64>(&mut errors, "oxygen_saturation", &self.oxygen_saturation);
        let weight = parse_number::<f64>(&mut errors, "weight", &self.weight);
        let height = parse_number::<f64>(&mut errors, "height", &self.height);
        let pain = parse_number::<i64>(&mut errors, "pain", &self.pain);

        errors.finish(|| NewVitalSigns {
            temperature,
            temperature_unit: optional(&self.temperature_unit).unwrap_or_else(|| "celsius".to_string()),
            heart_rate,
            respiratory_rate,
            blood_pressure_systolic,
            blood_pressure_diastolic,
            oxygen_saturation,
            weight,
            height,
            pain,
            notes: self.notes.trim().to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, Utc};
    use serde_json::json;

    #[test]
    fn test_login_rules() {
        let empty = LoginForm::default().validate().unwrap_err();
        assert_eq!(empty.get("email"), Some(EMAIL_REQUIRED));
        assert_eq!(empty.get("password"), Some(PASSWORD_REQUIRED));

        let bad = LoginForm { email: "dokter@rs".into(), password: "12345".into() }.validate().unwrap_err();
        assert_eq!(bad.get("email"), Some(EMAIL_INVALID));
        assert_eq!(bad.get("password"), Some(PASSWORD_TOO_SHORT));

        let ok = LoginForm { email: "Dokter.Budi@RS-Sehat.co.id".into(), password: "123456".into() };
        assert!(ok.validate().is_ok());
    }

    #[test]
    fn test_email_pattern() {
        assert!(is_valid_email("a+b@x.io"));
        assert!(!is_valid_email("a@b.c"));
        assert!(!is_valid_email("no at sign.com"));
    }

    #[test]
    fn test_patient_required_fields() {
        let errors = PatientForm::default().to_payload().unwrap_err();
        let fields: Vec<_> = errors.iter().map(|(f, _)| f).collect();
        assert_eq!(fields, vec!["date_of_birth", "first_name", "gender", "last_name"]);
        assert_eq!(errors.get("first_name"), Some(FIRST_NAME_REQUIRED));
    }

    #[test]
    fn test_patient_payload_shape() {
        let form = PatientForm {
            first_name: " Siti ".into(),
            last_name: "Aminah".into(),
            date_of_birth: "1990-04-12".into(),
            gender: "female".into(),
            phone_number: "  ".into(),
            emergency_contact_name: "Budi".into(),
            insurance_policy_number: "POL-1".into(),
            ..Default::default()
        };
        let payload = form.to_payload().unwrap();
        let value = serde_json::to_value(&payload).unwrap();
        assert_eq!(value["first_name"], "Siti");
        assert_eq!(value["date_of_birth"], "1990-04-12T00:00:00.000Z");
        assert!(value.get("phone_number").is_none());
        assert_eq!(value["emergency_contact"], json!({"name": "Budi"}));
        // No provider, so the policy number is dropped
        assert_eq!(value["insurance"], json!({}));

        let insured = PatientForm { insurance_provider: "BPJS".into(), ..form }.to_payload().unwrap();
        assert_eq!(
            serde_json::to_value(&insured.insurance).unwrap(),
            json!({"provider": "BPJS", "policy_number": "POL-1"})
        );
    }

    #[test]
    fn test_encounter_payload() {
        let form = EncounterForm {
            patient_id: "p-1".into(),
            encounter_type: "outpatient".into(),
            admission_date: "2026-03-05T09:30".into(),
            chief_complaint: "Demam".into(),
            ..Default::default()
        };
        let jakarta = FixedOffset::east_opt(7 * 3600).unwrap();
        let payload = form.to_payload_in("dr-1", &jakarta).unwrap();
        assert_eq!(payload.provider_id, "dr-1");
        assert_eq!(payload.priority, "routine");
        assert_eq!(payload.admission_date, "2026-03-05T02:30:00.000Z");
        assert_eq!(payload.chief_complaint.as_deref(), Some("Demam"));
        assert!(payload.department.is_none());
    }

    #[test]
    fn test_encounter_requires_patient() {
        let form = EncounterForm { patient_id: "null".into(), ..Default::default() };
        assert!(!form.has_patient());
        let errors = form.to_payload_in("dr-1", &Utc).unwrap_err();
        assert_eq!(errors.get("patient_id"), Some(PATIENT_REQUIRED));
        assert_eq!(errors.get("encounter_type"), Some(ENCOUNTER_TYPE_REQUIRED));
        assert_eq!(errors.get("admission_date"), Some(ADMISSION_REQUIRED));
    }

    #[test]
    fn test_appointment_payload() {
        let form = AppointmentForm {
            patient_id: "p-1".into(),
            provider_id: "dr-2".into(),
            appointment_type: "consultation".into(),
            start_time: "2026-03-05T10:00".into(),
            duration: "45".into(),
            ..Default::default()
        };
        let payload = form.to_payload_in(&Utc).unwrap();
        assert_eq!(payload.duration, 45);
        assert_eq!(payload.start_time, "2026-03-05T10:00:00.000Z");

        let odd = AppointmentForm { duration: "50".into(), ..form };
        assert_eq!(odd.to_payload_in(&Utc).unwrap_err().get("duration"), Some(DURATION_INVALID));
    }

    #[test]
    fn test_appointment_required_fields() {
        let errors = AppointmentForm::default().to_payload_in(&Utc).unwrap_err();
        assert_eq!(errors.len(), 4);
        assert_eq!(errors.get("provider_id"), Some(PROVIDER_REQUIRED));
        assert_eq!(errors.get("appointment_type"), Some(TYPE_REQUIRED));
        assert_eq!(errors.get("start_time"), Some(START_REQUIRED));
        assert!(!errors.contains("duration"));
    }

    #[test]
    fn test_cancel_reason() {
        assert_eq!(cancel_reason(Some("  pasien sakit ")).unwrap(), "pasien sakit");
        assert!(cancel_reason(Some("   ")).is_err());
        assert!(cancel_reason(None).is_err());
    }

    #[test]
    fn test_diagnosis_and_note() {
        let errors = DiagnosisForm::default().to_payload().unwrap_err();
        assert!(errors.contains("icd10_code"));
        assert!(errors.contains("description"));
        assert!(!errors.contains("diagnosis_type"));

        let diagnosis = DiagnosisForm { icd10_code: " j06.9 ".into(), description: "ISPA".into(), ..Default::default() };
        assert_eq!(diagnosis.to_payload().unwrap().icd10_code, "J06.9");

        let note = NoteForm { subjective: "Batuk 3 hari".into(), ..Default::default() }.to_payload().unwrap();
        assert_eq!(note.note_type, "soap");
        assert!(note.plan.is_none());
    }

    #[test]
    fn test_vitals_parsing() {
        let form = VitalsForm {
            temperature: "37.5".into(),
            heart_rate: "88".into(),
            blood_pressure_systolic: "120".into(),
            ..Default::default()
        };
        let value = serde_json::to_value(form.to_payload().unwrap()).unwrap();
        assert_eq!(value["temperature"], json!(37.5));
        assert_eq!(value["temperature_unit"], "celsius");
        assert_eq!(value["heart_rate"], json!(88));
        assert_eq!(value["weight"], json!(null));

        let bad = VitalsForm { heart_rate: "cepat".into(), ..Default::default() };
        assert_eq!(bad.to_payload().unwrap_err().get("heart_rate"), Some(NUMBER_INVALID));
    }
}
