//! Service wrappers: paths, query shaping and decoding.

mod common;

use emr_client::forms::PatientForm;
use emr_client::services::{load_dashboard, AppointmentFilter, PageRequest};
use emr_client::{ApiError, Method};

use common::{signed_in, FakeBackend};

#[tokio::test]
async fn test_patient_list_second_page() {
    let backend = FakeBackend::new();
    let (client, _storage) = signed_in(&backend, Some("refresh-1"));

    let page = client
        .patients()
        .list(PageRequest::new(2, 20), Some(""))
        .await
        .expect("list patients");
    assert_eq!(page.page, 2);
    assert_eq!(page.total_pages, 2);
    assert_eq!(page.data[0].full_name(), "Siti Aminah");

    let call = backend.last_call();
    assert_eq!(call.request.query_string(), "page=2&page_size=20");
}

#[tokio::test]
async fn test_create_patient_sends_shaped_body() {
    let backend = FakeBackend::new();
    let (client, _storage) = signed_in(&backend, Some("refresh-1"));

    let form = PatientForm {
        first_name: "Dewi".into(),
        last_name: "Lestari".into(),
        date_of_birth: "1985-11-02".into(),
        gender: "female".into(),
        ..Default::default()
    };
    let payload = form.to_payload().expect("valid form");
    let created = client.patients().create(&payload).await.expect("create patient");
    assert_eq!(created.id, "p-new");
    assert_eq!(created.mrn.as_deref(), Some("MRN-000123"));

    let body = backend.last_call().request.body.expect("json body");
    assert_eq!(body["date_of_birth"], "1985-11-02T00:00:00.000Z");
    assert_eq!(body["insurance"], serde_json::json!({}));
}

#[tokio::test]
async fn test_delete_and_timeline() {
    let backend = FakeBackend::new();
    let (client, _storage) = signed_in(&backend, Some("refresh-1"));

    client.patients().delete("p-1").await.expect("delete");
    assert_eq!(backend.count(Method::Delete, "/pasien/p-1"), 1);

    let timeline = client.patients().timeline("p-1").await.expect("timeline");
    assert_eq!(timeline.allergies[0].allergen, "Penisilin");
    assert_eq!(timeline.active_medications().count(), 1);
}

#[tokio::test]
async fn test_chart_issues_both_lookups() {
    let backend = FakeBackend::new();
    let (client, _storage) = signed_in(&backend, Some("refresh-1"));

    let (patient, timeline) = client.patients().chart("p-1").await;
    assert_eq!(patient.expect("patient").full_name(), "Siti Aminah");
    assert_eq!(timeline.expect("timeline").medications.len(), 2);

    let (patient, timeline) = client.patients().chart("p-404").await;
    assert!(patient.is_err());
    assert!(timeline.is_err());
    assert_eq!(backend.count(Method::Get, "/pasien/p-404"), 1);
    assert_eq!(backend.count(Method::Get, "/pasien/p-404/riwayat"), 1);
}

#[tokio::test]
async fn test_missing_resource_is_not_found() {
    let backend = FakeBackend::new();
    let (client, _storage) = signed_in(&backend, Some("refresh-1"));

    let err = client.patients().get("p-404").await.unwrap_err();
    assert_eq!(err, ApiError::NotFound { message: Some("Tidak ditemukan".into()) });
}

#[tokio::test]
async fn test_encounter_status_and_appointment_cancel() {
    let backend = FakeBackend::new();
    let (client, _storage) = signed_in(&backend, Some("refresh-1"));

    let encounter = client.encounters().update_status("e-1", "in_progress").await.expect("status");
    assert_eq!(encounter.status, "in_progress");
    assert_eq!(backend.last_call().request.method, Method::Put);

    let appointment = client.appointments().cancel("a-1", "Pasien berhalangan").await.expect("cancel");
    assert_eq!(appointment.cancellation_reason.as_deref(), Some("Pasien berhalangan"));
    assert!(!appointment.can_cancel());
}

#[tokio::test]
async fn test_availability_and_providers() {
    let backend = FakeBackend::new();
    let (client, _storage) = signed_in(&backend, Some("refresh-1"));

    let slots = client.appointments().availability("u-1", "2026-03-05").await.expect("slots");
    assert_eq!(slots.len(), 2);
    assert!(slots[0].available && !slots[1].available);
    assert_eq!(backend.last_call().request.query_string(), "date=2026-03-05&provider_id=u-1");

    let doctors = client.users().by_role("doctor").await.expect("doctors");
    assert_eq!(doctors.len(), 1);
    assert_eq!(backend.last_call().request.query_string(), "role=doctor&page=1&page_size=100");
}

#[tokio::test]
async fn test_appointment_list_query_shape() {
    let backend = FakeBackend::new();
    let (client, _storage) = signed_in(&backend, Some("refresh-1"));

    let page = client
        .appointments()
        .list(PageRequest::default(), &AppointmentFilter::on_date("2026-03-05"))
        .await
        .expect("appointments");
    assert_eq!(page.data[0].patient.as_ref().map(|p| p.full_name()), Some("Siti Aminah".to_string()));
    assert_eq!(backend.last_call().request.query_string(), "page=1&page_size=20&date=2026-03-05");
}

#[tokio::test]
async fn test_dashboard_summary() {
    let backend = FakeBackend::new();
    let (client, _storage) = signed_in(&backend, Some("refresh-1"));

    let summary = load_dashboard(&client, "2026-03-05").await.expect("dashboard");
    assert_eq!(summary.total_patients, 21);
    assert_eq!(summary.today_appointments, 1);
    assert_eq!(summary.active_encounters, 4);
    assert_eq!(summary.recent_patients.len(), 1);

    let queries: Vec<String> = backend.calls().iter().map(|c| c.request.describe()).collect();
    assert_eq!(
        queries,
        vec![
            "GET /pasien?page=1&page_size=5",
            "GET /janji-temu?page=1&page_size=10&date=2026-03-05",
            "GET /kunjungan?page=1&page_size=1&status=in_progress",
        ]
    );
}

#[tokio::test]
async fn test_dashboard_stops_at_first_failure() {
    let backend = FakeBackend::new();
    let (client, _storage) = signed_in(&backend, None);
    backend.expire_token();

    assert!(load_dashboard(&client, "2026-03-05").await.is_err());
    // One data call, then the sign-out notification
    assert_eq!(backend.calls().len(), 2);
    assert_eq!(backend.count(Method::Post, "/otentikasi/keluar"), 1);
    assert!(!client.session().is_authenticated());
}
