//! Encounter Pages
//!
//! Status-filtered list, the clinical detail view with its inline forms,
//! and the form that opens a new encounter.

mod list;
mod detail;
mod create;

pub use list::EncountersPage;
pub use detail::EncounterDetailPage;
pub use create::CreateEncounterPage;
