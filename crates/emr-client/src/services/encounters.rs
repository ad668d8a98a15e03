use serde::de::DeserializeOwned;
use serde::Serialize;

use super::{action_path, item_path, PageRequest};
use crate::error::ApiResult;
use crate::http::{ApiClient, ApiRequest, Method};
use crate::models::{
    ClinicalNote, Diagnosis, Encounter, NewClinicalNote, NewDiagnosis, NewEncounter, NewVitalSigns, Paginated,
    StatusUpdate, VitalSigns,
};

const ENCOUNTERS: &str = "/kunjungan";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EncounterFilter {
    pub status: Option<String>,
    pub patient_id: Option<String>,
}

impl EncounterFilter {
    pub fn status(status: impl Into<String>) -> Self {
        Self {
            status: Some(status.into()),
            ..Default::default()
        }
    }
}

pub struct EncounterService<'a> {
    client: &'a ApiClient,
}

impl<'a> EncounterService<'a> {
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub fn list_request(page: PageRequest, filter: &EncounterFilter) -> ApiRequest {
        page.apply(ApiRequest::get(ENCOUNTERS))
            .query_opt("status", filter.status.as_deref())
            .query_opt("patient_id", filter.patient_id.as_deref())
    }

    pub async fn list(&self, page: PageRequest, filter: &EncounterFilter) -> ApiResult<Paginated<Encounter>> {
        self.client.send_json(Self::list_request(page, filter)).await
    }

    pub async fn get(&self, id: &str) -> ApiResult<Encounter> {
        self.client.send_json(ApiRequest::get(item_path(ENCOUNTERS, id))).await
    }

    pub async fn create(&self, encounter: &NewEncounter) -> ApiResult<Encounter> {
        self.client.send_json(ApiRequest::post(ENCOUNTERS).json(encounter)?).await
    }

    pub async fn update_status(&self, id: &str, status: &str) -> ApiResult<Encounter> {
        self.send_action(Method::Put, id, "status", &StatusUpdate { status }).await
    }

    pub async fn add_clinical_note(&self, id: &str, note: &NewClinicalNote) -> ApiResult<ClinicalNote> {
        self.send_action(Method::Post, id, "catatan", note).await
    }

    pub async fn add_diagnosis(&self, id: &str, diagnosis: &NewDiagnosis) -> ApiResult<Diagnosis> {
        self.send_action(Method::Post, id, "diagnosis", diagnosis).await
    }

    pub async fn record_vital_signs(&self, id: &str, vitals: &NewVitalSigns) -> ApiResult<VitalSigns> {
        self.send_action(Method::Post, id, "tanda-vital", vitals).await
    }

    async fn send_action<B, T>(&self, method: Method, id: &str, action: &str, body: &B) -> ApiResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = ApiRequest::new(method, action_path(ENCOUNTERS, id, action)).json(body)?;
        self.client.send_json(request).await
    }
}
