//! API Client
//!
//! Dispatches requests with the session's bearer token and applies the one
//! recovery rule: a 401 on a non-auth request triggers a token refresh and
//! the request is re-issued exactly once.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde_json::Value;

use super::{ApiRequest, ReqwestTransport, TimeoutTransport, Transport};
use crate::config::ClientConfig;
use crate::error::{ApiError, ApiResult};
use crate::services::{AppointmentService, EncounterService, PatientService, UserService};
use crate::session::SessionStore;
use crate::storage::SessionStorage;

#[derive(Clone)]
pub struct ApiClient {
    transport: Arc<dyn Transport>,
    session: SessionStore,
}

impl ApiClient {
    /// Client talking to the configured backend over HTTP, every call
    /// bounded by the configured timeout
    pub fn new(config: ClientConfig, storage: Arc<dyn SessionStorage>) -> ApiResult<Self> {
        let timeout = config.timeout;
        let http = Arc::new(ReqwestTransport::new(config)?);
        let transport = Arc::new(TimeoutTransport::new(http, timeout));
        Ok(Self::with_transport(transport, storage))
    }

    pub fn with_transport(transport: Arc<dyn Transport>, storage: Arc<dyn SessionStorage>) -> Self {
        let session = SessionStore::new(transport.clone(), storage);
        Self { transport, session }
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    /// Send a request and return the success body
    pub async fn send(&self, request: ApiRequest) -> ApiResult<Value> {
        let token = self.session.access_token();
        let response = self.transport.execute(&request, token.as_deref()).await?;

        if response.status != 401 || request.is_auth_endpoint() {
            return response.into_result();
        }

        // Without a refresh token this signs the user out
        let rejected = ApiError::from_status(response.status, &response.body);
        log::warn!("{} returned 401, refreshing access token", request.describe());
        if !self.session.refresh_after_rejection(token.as_deref()).await {
            return Err(rejected);
        }

        let token = self.session.access_token();
        self.transport.execute(&request, token.as_deref()).await?.into_result()
    }

    /// Send a request and decode the success body
    pub async fn send_json<T: DeserializeOwned>(&self, request: ApiRequest) -> ApiResult<T> {
        let body = self.send(request).await?;
        Ok(serde_json::from_value(body)?)
    }

    pub fn patients(&self) -> PatientService<'_> {
        PatientService::new(self)
    }

    pub fn encounters(&self) -> EncounterService<'_> {
        EncounterService::new(self)
    }

    pub fn appointments(&self) -> AppointmentService<'_> {
        AppointmentService::new(self)
    }

    pub fn users(&self) -> UserService<'_> {
        UserService::new(self)
    }
}
