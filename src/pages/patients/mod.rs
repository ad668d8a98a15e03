//! Patient Pages
//!
//! Registry list with search, patient chart, and the registration form.

mod list;
mod detail;
mod create;

pub use list::PatientsPage;
pub use detail::PatientDetailPage;
pub use create::CreatePatientPage;
