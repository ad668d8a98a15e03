//! Domain Services
//!
//! One borrowed wrapper per REST resource. Services only shape paths and
//! query parameters; the client handles auth, retry and decoding errors.

mod appointments;
mod dashboard;
mod encounters;
mod patients;
mod users;

pub use appointments::{AppointmentFilter, AppointmentService};
pub use dashboard::{load_dashboard, DashboardSummary};
pub use encounters::{EncounterFilter, EncounterService};
pub use patients::PatientService;
pub use users::UserService;

use crate::http::{encode_segment, ApiRequest};

/// Page size for patient, encounter and appointment lists
pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// Page size for user and patient pickers
pub const USER_PAGE_SIZE: u32 = 100;
pub const PICKER_PAGE_SIZE: u32 = USER_PAGE_SIZE;

/// Page number and size, 1-based
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u32,
    pub page_size: u32,
}

impl PageRequest {
    pub fn new(page: u32, page_size: u32) -> Self {
        Self {
            page: page.max(1),
            page_size: page_size.max(1),
        }
    }

    pub fn first(page_size: u32) -> Self {
        Self::new(1, page_size)
    }

    fn apply(&self, request: ApiRequest) -> ApiRequest {
        request.query("page", self.page).query("page_size", self.page_size)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::first(DEFAULT_PAGE_SIZE)
    }
}

/// `/base/<id>` with the identifier percent-encoded
fn item_path(base: &str, id: &str) -> String {
    format!("{}/{}", base, encode_segment(id))
}

/// `/base/<id>/<action>`
fn action_path(base: &str, id: &str, action: &str) -> String {
    format!("{}/{}/{}", base, encode_segment(id), action)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_request_clamps_to_one() {
        assert_eq!(PageRequest::new(0, 0), PageRequest { page: 1, page_size: 1 });
        assert_eq!(PageRequest::default(), PageRequest { page: 1, page_size: 20 });
    }

    #[test]
    fn test_page_query_order() {
        let request = PageRequest::new(2, 20).apply(ApiRequest::get("/pasien"));
        assert_eq!(request.query_string(), "page=2&page_size=20");
    }

    #[test]
    fn test_paths_encode_ids() {
        assert_eq!(item_path("/pasien", "p 1"), "/pasien/p%201");
        assert_eq!(action_path("/janji-temu", "a1", "check-in"), "/janji-temu/a1/check-in");
    }
}
