//! Pages
//!
//! One component per route. Pages own their view state in local signals
//! and reach the API through the client in `AppContext`.

/// Signal reading one `String` field of a form held in an `RwSignal`
macro_rules! form_value {
    ($form:ident . $field:ident) => {
        Signal::derive(move || $form.with(|f| f.$field.clone()))
    };
}

/// Setter writing one `String` field of a form held in an `RwSignal`
macro_rules! form_setter {
    ($form:ident . $field:ident) => {
        move |value: String| $form.update(|f| f.$field = value)
    };
}

mod login;
mod dashboard;
mod patients;
mod encounters;
mod appointments;
mod not_found;

pub use login::LoginPage;
pub use dashboard::DashboardPage;
pub use patients::{CreatePatientPage, PatientDetailPage, PatientsPage};
pub use encounters::{CreateEncounterPage, EncounterDetailPage, EncountersPage};
pub use appointments::{AppointmentsPage, CreateAppointmentPage};
pub use not_found::NotFoundPage;
