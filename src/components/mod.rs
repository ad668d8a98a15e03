//! UI Components
//!
//! Reusable Leptos components.

mod link;
mod delete_confirm_button;
mod toast_host;
mod status_badge;
mod pager_bar;
mod spinner;
mod field_error;
mod detail_field;
mod form_fields;
mod patient_select;

pub use link::Link;
pub use delete_confirm_button::DeleteConfirmButton;
pub use toast_host::ToastHost;
pub use status_badge::StatusBadge;
pub use pager_bar::PagerBar;
pub use spinner::Spinner;
pub use field_error::FieldError;
pub use detail_field::DetailField;
pub use form_fields::{SelectInput, TextArea, TextInput};
pub use patient_select::PatientSelect;
