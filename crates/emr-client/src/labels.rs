//! Display Labels
//!
//! Indonesian labels for the enumerated codes the backend sends. Unknown
//! codes fall back to the raw value so new server states still render.

/// (code, label) pairs in the order forms offer them
pub type LabelTable = &'static [(&'static str, &'static str)];

pub const ENCOUNTER_STATUS: LabelTable = &[
    ("scheduled", "Terjadwal"),
    ("in_progress", "Berlangsung"),
    ("completed", "Selesai"),
    ("cancelled", "Dibatalkan"),
];

pub const ENCOUNTER_TYPE: LabelTable = &[
    ("outpatient", "Rawat Jalan"),
    ("inpatient", "Rawat Inap"),
    ("emergency", "Darurat"),
    ("wellness", "Pemeriksaan Kesehatan"),
    ("telehealth", "Telemedisin"),
];

pub const ENCOUNTER_PRIORITY: LabelTable = &[
    ("routine", "Rutin"),
    ("urgent", "Mendesak"),
    ("emergent", "Darurat"),
];

pub const APPOINTMENT_STATUS: LabelTable = &[
    ("scheduled", "Terjadwal"),
    ("confirmed", "Dikonfirmasi"),
    ("checked_in", "Sudah Check In"),
    ("in_progress", "Berlangsung"),
    ("completed", "Selesai"),
    ("cancelled", "Dibatalkan"),
    ("no_show", "Tidak Hadir"),
];

pub const APPOINTMENT_TYPE: LabelTable = &[
    ("consultation", "Konsultasi"),
    ("follow_up", "Tindak Lanjut"),
    ("wellness", "Pemeriksaan Kesehatan"),
    ("procedure", "Prosedur"),
    ("emergency", "Darurat"),
    ("telehealth", "Telemedisin"),
];

pub const GENDER: LabelTable = &[
    ("male", "Laki-laki"),
    ("female", "Perempuan"),
    ("other", "Lainnya"),
];

pub const MARITAL_STATUS: LabelTable = &[
    ("single", "Lajang"),
    ("married", "Menikah"),
    ("divorced", "Cerai"),
    ("widowed", "Janda/Duda"),
];

pub const NOTE_TYPE: LabelTable = &[
    ("soap", "Catatan SOAP"),
    ("progress", "Catatan Perkembangan"),
    ("consult", "Catatan Konsultasi"),
];

pub const DIAGNOSIS_TYPE: LabelTable = &[
    ("primary", "Primer"),
    ("secondary", "Sekunder"),
    ("differential", "Diferensial"),
];

/// Blood types are shown as-is
pub const BLOOD_TYPES: &[&str] = &["A+", "A-", "B+", "B-", "AB+", "AB-", "O+", "O-"];

/// Appointment lengths offered by the booking form, in minutes
pub const APPOINTMENT_DURATIONS: &[u32] = &[15, 30, 45, 60, 90, 120];

pub const DEFAULT_DURATION: u32 = 30;

/// Label for `code`, or the code itself when the table has no entry
pub fn label<'a>(table: LabelTable, code: &'a str) -> &'a str {
    table
        .iter()
        .find(|(c, _)| *c == code)
        .map(|(_, label)| *label)
        .unwrap_or(code)
}

/// Same as [`label`] but renders a missing value as a dash
pub fn label_opt(table: LabelTable, code: Option<&str>) -> String {
    match code {
        Some(code) if !code.is_empty() => label(table, code).to_string(),
        _ => crate::format::MISSING.to_string(),
    }
}

pub fn encounter_status(code: &str) -> &str {
    label(ENCOUNTER_STATUS, code)
}

pub fn encounter_type(code: &str) -> &str {
    label(ENCOUNTER_TYPE, code)
}

pub fn encounter_priority(code: &str) -> &str {
    label(ENCOUNTER_PRIORITY, code)
}

pub fn appointment_status(code: &str) -> &str {
    label(APPOINTMENT_STATUS, code)
}

pub fn appointment_type(code: &str) -> &str {
    label(APPOINTMENT_TYPE, code)
}

pub fn gender(code: &str) -> &str {
    label(GENDER, code)
}

pub fn marital_status(code: &str) -> &str {
    label(MARITAL_STATUS, code)
}

pub fn note_type(code: &str) -> &str {
    label(NOTE_TYPE, code)
}

pub fn diagnosis_type(code: &str) -> &str {
    label(DIAGNOSIS_TYPE, code)
}

/// Badge color class for a status code
pub fn status_tone(code: &str) -> &'static str {
    match code {
        "completed" | "checked_in" => "success",
        "in_progress" | "confirmed" => "info",
        "cancelled" | "no_show" => "danger",
        _ => "neutral",
    }
}
