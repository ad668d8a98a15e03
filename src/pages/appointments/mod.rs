//! Appointment Pages
//!
//! Day view with check-in and cancel actions, and the booking form.

mod list;
mod create;

pub use list::AppointmentsPage;
pub use create::CreateAppointmentPage;
