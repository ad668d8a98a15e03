//! In-memory backend shared by the integration tests.
//!
//! Accepts one access token at a time; the refresh endpoint rotates it.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::{json, Value};

use emr_client::{ApiClient, ApiError, ApiRequest, ApiResponse, ApiResult, MemoryStorage, Method, Transport};

pub const PASSWORD: &str = "rahasia123";

#[derive(Debug, Clone)]
pub struct Call {
    pub request: ApiRequest,
    pub bearer: Option<String>,
}

#[derive(Debug)]
struct State {
    valid_token: String,
    issued: u32,
    refresh_ok: bool,
    logout_offline: bool,
    reject_after_refresh: bool,
}

#[derive(Debug)]
pub struct FakeBackend {
    state: Mutex<State>,
    calls: Mutex<Vec<Call>>,
}

impl FakeBackend {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            state: Mutex::new(State {
                valid_token: "access-1".to_string(),
                issued: 1,
                refresh_ok: true,
                logout_offline: false,
                reject_after_refresh: false,
            }),
            calls: Mutex::new(Vec::new()),
        })
    }

    /// Invalidate the current access token, as if it had expired
    pub fn expire_token(&self) {
        self.state.lock().unwrap().valid_token = "expired".to_string();
    }

    pub fn fail_refresh(&self) {
        self.state.lock().unwrap().refresh_ok = false;
    }

    pub fn go_offline_for_logout(&self) {
        self.state.lock().unwrap().logout_offline = true;
    }

    /// Keep rejecting protected calls even with a fresh token
    pub fn reject_after_refresh(&self) {
        self.state.lock().unwrap().reject_after_refresh = true;
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count(&self, method: Method, path: &str) -> usize {
        self.calls()
            .iter()
            .filter(|c| c.request.method == method && c.request.path == path)
            .count()
    }

    pub fn refresh_calls(&self) -> usize {
        self.count(Method::Post, "/otentikasi/segarkan")
    }

    pub fn last_call(&self) -> Call {
        self.calls().last().cloned().expect("no calls recorded")
    }

    fn route(&self, request: &ApiRequest, bearer: Option<&str>) -> ApiResult<ApiResponse> {
        let mut state = self.state.lock().unwrap();
        let path = request.path.as_str();

        match (request.method, path) {
            (Method::Post, "/otentikasi/masuk") => {
                let body = request.body.clone().unwrap_or(Value::Null);
                if body["password"] == PASSWORD {
                    let response = json!({
                        "access_token": state.valid_token,
                        "refresh_token": "refresh-1",
                        "user": user_json(body["email"].as_str().unwrap_or_default()),
                    });
                    Ok(ApiResponse::new(200, response))
                } else if body["email"] == "server@rs-sehat.id" {
                    Ok(ApiResponse::new(500, Value::Null))
                } else {
                    Ok(ApiResponse::new(401, json!({"message": "Email atau kata sandi salah"})))
                }
            }
            (Method::Post, "/otentikasi/keluar") => {
                if state.logout_offline {
                    Err(ApiError::Transport("connection refused".into()))
                } else {
                    Ok(ApiResponse::new(200, json!({"message": "ok"})))
                }
            }
            (Method::Post, "/otentikasi/segarkan") => {
                let presented = request.body.as_ref().and_then(|b| b["refresh_token"].as_str());
                if !state.refresh_ok || presented != Some("refresh-1") {
                    return Ok(ApiResponse::new(401, json!({"message": "Refresh token kedaluwarsa"})));
                }
                state.issued += 1;
                state.valid_token = format!("access-{}", state.issued);
                Ok(ApiResponse::new(200, json!({"access_token": state.valid_token})))
            }
            _ => {
                if bearer != Some(state.valid_token.as_str()) || (state.reject_after_refresh && state.issued > 1) {
                    return Ok(ApiResponse::new(401, json!({"message": "Token tidak valid"})));
                }
                Ok(protected(request))
            }
        }
    }
}

#[async_trait(?Send)]
impl Transport for FakeBackend {
    async fn execute(&self, request: &ApiRequest, bearer: Option<&str>) -> ApiResult<ApiResponse> {
        // Let concurrent callers interleave like real network calls
        tokio::task::yield_now().await;
        self.calls.lock().unwrap().push(Call {
            request: request.clone(),
            bearer: bearer.map(str::to_string),
        });
        self.route(request, bearer)
    }
}

fn protected(request: &ApiRequest) -> ApiResponse {
    match (request.method, request.path.as_str()) {
        (Method::Get, "/pasien") => ApiResponse::new(
            200,
            json!({
                "data": [patient_json("p-1", "Siti", "Aminah")],
                "total": 21,
                "page": request.query_value("page").and_then(|p| p.parse::<u32>().ok()).unwrap_or(1),
                "page_size": 20,
                "total_pages": 2
            }),
        ),
        (Method::Get, "/janji-temu") => ApiResponse::new(
            200,
            json!({
                "data": [{
                    "id": "a-1", "appointment_type": "consultation", "status": "scheduled",
                    "start_time": "2026-03-05T09:00:00Z", "duration": 30,
                    "patient": {"id": "p-1", "first_name": "Siti", "last_name": "Aminah"}
                }],
                "total": 1, "page": 1, "page_size": 10, "total_pages": 1
            }),
        ),
        (Method::Get, "/kunjungan") => ApiResponse::new(
            200,
            json!({"data": [], "total": 4, "page": 1, "page_size": 1, "total_pages": 4}),
        ),
        (Method::Post, "/pasien") => {
            let mut body = request.body.clone().unwrap_or_else(|| json!({}));
            body["id"] = json!("p-new");
            body["mrn"] = json!("MRN-000123");
            ApiResponse::new(201, body)
        }
        (Method::Delete, path) if path.starts_with("/pasien/") => ApiResponse::new(204, Value::Null),
        (Method::Get, "/pasien/p-1") => ApiResponse::new(200, patient_json("p-1", "Siti", "Aminah")),
        (Method::Get, "/pasien/p-1/riwayat") => ApiResponse::new(
            200,
            json!({
                "allergies": [{"id": 1, "allergen": "Penisilin", "severity": "severe"}],
                "medications": [
                    {"id": 2, "medication_name": "Amoksisilin", "status": "active"},
                    {"id": 3, "medication_name": "Parasetamol", "status": "discontinued"}
                ],
                "encounters": [],
                "appointments": []
            }),
        ),
        (Method::Put, "/kunjungan/e-1/status") => ApiResponse::new(
            200,
            json!({"id": "e-1", "encounter_type": "outpatient", "status": request.body.as_ref().map(|b| b["status"].clone())}),
        ),
        (Method::Post, "/janji-temu/a-1/batal") => ApiResponse::new(
            200,
            json!({"id": "a-1", "status": "cancelled", "appointment_type": "consultation",
                   "cancellation_reason": request.body.as_ref().map(|b| b["reason"].clone())}),
        ),
        (Method::Get, "/janji-temu/ketersediaan") => ApiResponse::new(
            200,
            json!([
                {"start_time": "2026-03-05T09:00:00Z", "end_time": "2026-03-05T09:30:00Z", "available": true},
                {"start_time": "2026-03-05T09:30:00Z", "end_time": "2026-03-05T10:00:00Z", "available": false}
            ]),
        ),
        (Method::Get, "/pengguna") => ApiResponse::new(
            200,
            json!({"data": [user_json("dr.budi@rs-sehat.id")], "total": 1, "page": 1, "page_size": 100, "total_pages": 1}),
        ),
        _ => ApiResponse::new(404, json!({"message": "Tidak ditemukan"})),
    }
}

pub fn user_json(email: &str) -> Value {
    json!({
        "id": "u-1",
        "first_name": "Budi",
        "last_name": "Santoso",
        "email": email,
        "roles": [{
            "code": "doctor",
            "name": "Dokter",
            "permissions": [
                {"code": "view_patients"},
                {"code": "create_encounters"},
                {"code": "update_encounters"}
            ]
        }]
    })
}

pub fn patient_json(id: &str, first: &str, last: &str) -> Value {
    json!({"id": id, "mrn": "MRN-000001", "first_name": first, "last_name": last, "gender": "female"})
}

/// Persisted record for a signed-in doctor holding `token`
pub fn stored_session(token: &str, refresh: Option<&str>) -> String {
    json!({
        "user": user_json("dr.budi@rs-sehat.id"),
        "token": token,
        "refreshToken": refresh,
        "isAuthenticated": true
    })
    .to_string()
}

pub fn client(backend: &Arc<FakeBackend>, storage: &Arc<MemoryStorage>) -> ApiClient {
    ApiClient::with_transport(backend.clone(), storage.clone())
}

/// Client restored from a persisted session with the given tokens
pub fn signed_in(backend: &Arc<FakeBackend>, refresh: Option<&str>) -> (ApiClient, Arc<MemoryStorage>) {
    let storage = Arc::new(MemoryStorage::with_raw(&stored_session("access-1", refresh)));
    let client = client(backend, &storage);
    assert!(client.session().restore());
    (client, storage)
}
