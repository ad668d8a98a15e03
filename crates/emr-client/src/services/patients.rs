use super::{action_path, item_path, PageRequest};
use crate::error::ApiResult;
use crate::http::{ApiClient, ApiRequest};
use crate::models::{NewPatient, Paginated, Patient, PatientTimeline};

const PATIENTS: &str = "/pasien";

pub struct PatientService<'a> {
    client: &'a ApiClient,
}

impl<'a> PatientService<'a> {
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// Blank searches are left out of the query
    pub fn list_request(page: PageRequest, search: Option<&str>) -> ApiRequest {
        page.apply(ApiRequest::get(PATIENTS)).query_opt("search", search)
    }

    pub async fn list(&self, page: PageRequest, search: Option<&str>) -> ApiResult<Paginated<Patient>> {
        self.client.send_json(Self::list_request(page, search)).await
    }

    pub async fn get(&self, id: &str) -> ApiResult<Patient> {
        self.client.send_json(ApiRequest::get(item_path(PATIENTS, id))).await
    }

    pub async fn create(&self, patient: &NewPatient) -> ApiResult<Patient> {
        self.client.send_json(ApiRequest::post(PATIENTS).json(patient)?).await
    }

    pub async fn update(&self, id: &str, patient: &NewPatient) -> ApiResult<Patient> {
        self.client.send_json(ApiRequest::put(item_path(PATIENTS, id)).json(patient)?).await
    }

    pub async fn delete(&self, id: &str) -> ApiResult<()> {
        self.client.send(ApiRequest::delete(item_path(PATIENTS, id))).await?;
        Ok(())
    }

    /// Allergies, medications, encounters and appointments in one call
    pub async fn timeline(&self, id: &str) -> ApiResult<PatientTimeline> {
        self.client.send_json(ApiRequest::get(action_path(PATIENTS, id, "riwayat"))).await
    }

    /// Record and timeline, both requests in flight at once
    pub async fn chart(&self, id: &str) -> (ApiResult<Patient>, ApiResult<PatientTimeline>) {
        tokio::join!(self.get(id), self.timeline(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_request_query() {
        let request = PatientService::list_request(PageRequest::new(3, 20), Some("RM-001"));
        assert_eq!(request.path, "/pasien");
        assert_eq!(request.query_string(), "page=3&page_size=20&search=RM-001");

        let request = PatientService::list_request(PageRequest::default(), Some(""));
        assert_eq!(request.query_value("search"), None);
    }
}
