use super::{action_path, item_path, PageRequest};
use crate::error::ApiResult;
use crate::http::{ApiClient, ApiRequest};
use crate::models::{Appointment, AvailabilitySlot, CancelRequest, NewAppointment, Paginated};

const APPOINTMENTS: &str = "/janji-temu";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppointmentFilter {
    pub status: Option<String>,
    /// `YYYY-MM-DD`
    pub date: Option<String>,
    pub patient_id: Option<String>,
    pub provider_id: Option<String>,
}

impl AppointmentFilter {
    pub fn on_date(date: impl Into<String>) -> Self {
        Self {
            date: Some(date.into()),
            ..Default::default()
        }
    }
}

pub struct AppointmentService<'a> {
    client: &'a ApiClient,
}

impl<'a> AppointmentService<'a> {
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub fn list_request(page: PageRequest, filter: &AppointmentFilter) -> ApiRequest {
        page.apply(ApiRequest::get(APPOINTMENTS))
            .query_opt("status", filter.status.as_deref())
            .query_opt("date", filter.date.as_deref())
            .query_opt("patient_id", filter.patient_id.as_deref())
            .query_opt("provider_id", filter.provider_id.as_deref())
    }

    pub async fn list(&self, page: PageRequest, filter: &AppointmentFilter) -> ApiResult<Paginated<Appointment>> {
        self.client.send_json(Self::list_request(page, filter)).await
    }

    pub async fn get(&self, id: &str) -> ApiResult<Appointment> {
        self.client.send_json(ApiRequest::get(item_path(APPOINTMENTS, id))).await
    }

    pub async fn create(&self, appointment: &NewAppointment) -> ApiResult<Appointment> {
        self.client.send_json(ApiRequest::post(APPOINTMENTS).json(appointment)?).await
    }

    pub async fn update(&self, id: &str, appointment: &NewAppointment) -> ApiResult<Appointment> {
        self.client
            .send_json(ApiRequest::put(item_path(APPOINTMENTS, id)).json(appointment)?)
            .await
    }

    pub async fn cancel(&self, id: &str, reason: &str) -> ApiResult<Appointment> {
        let request = ApiRequest::post(action_path(APPOINTMENTS, id, "batal")).json(&CancelRequest { reason })?;
        self.client.send_json(request).await
    }

    pub async fn check_in(&self, id: &str) -> ApiResult<Appointment> {
        self.client.send_json(ApiRequest::post(action_path(APPOINTMENTS, id, "check-in"))).await
    }

    pub fn availability_request(provider_id: &str, date: &str) -> ApiRequest {
        ApiRequest::get(format!("{}/ketersediaan", APPOINTMENTS))
            .query("date", date)
            .query("provider_id", provider_id)
    }

    pub async fn availability(&self, provider_id: &str, date: &str) -> ApiResult<Vec<AvailabilitySlot>> {
        self.client.send_json(Self::availability_request(provider_id, date)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_request_filters() {
        let filter = AppointmentFilter {
            status: Some("confirmed".into()),
            ..AppointmentFilter::on_date("2026-03-01")
        };
        let request = AppointmentService::list_request(PageRequest::new(1, 10), &filter);
        assert_eq!(request.query_string(), "page=1&page_size=10&status=confirmed&date=2026-03-01");
    }

    #[test]
    fn test_availability_request() {
        let request = AppointmentService::availability_request("dr-7", "2026-03-01");
        assert_eq!(request.describe(), "GET /janji-temu/ketersediaan?date=2026-03-01&provider_id=dr-7");
    }
}
