//! Patient Chart
//!
//! Demographics, contact and emergency-contact cards over a tabbed
//! clinical timeline. Patient and timeline load concurrently; the page
//! renders once both have settled.

use leptos::prelude::*;
use leptos::task::spawn_local;

use emr_client::authz;
use emr_client::format::{age_label, long_date, long_date_time, MISSING};
use emr_client::labels;
use emr_client::models::{Patient, PatientTimeline};
use emr_client::routes::{Route, PATIENTS};
use emr_client::{ResourceKind, Submission, ViewState};

use crate::components::{DeleteConfirmButton, DetailField, Link, Spinner, StatusBadge};
use crate::context::use_app_context;
use crate::store::{use_app_store, AppStateStoreFields};

const LOAD_FAILED: &str = "Gagal memuat data pasien";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tab {
    Summary,
    Allergies,
    Medications,
    Encounters,
    Appointments,
}

impl Tab {
    const ALL: [Tab; 5] = [Tab::Summary, Tab::Allergies, Tab::Medications, Tab::Encounters, Tab::Appointments];

    fn label(&self) -> &'static str {
        match self {
            Tab::Summary => "Ringkasan",
            Tab::Allergies => "Alergi",
            Tab::Medications => "Obat",
            Tab::Encounters => "Kunjungan",
            Tab::Appointments => "Janji Temu",
        }
    }
}

fn or_missing(value: &Option<String>) -> String {
    match value.as_deref().map(str::trim) {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => MISSING.to_string(),
    }
}

#[component]
pub fn PatientDetailPage(id: String) -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();

    let (state, set_state) = signal(ViewState::<(Patient, PatientTimeline)>::Loading);
    let (tab, set_tab) = signal(Tab::Summary);
    let (deleting, set_deleting) = signal(Submission::Idle);

    let can_delete = Memo::new(move |_| {
        store.session().with(|s| authz::can_delete(s.user.as_ref(), ResourceKind::Patient))
    });

    let load_id = id.clone();
    Effect::new(move |_| {
        let client = ctx.client();
        let id = load_id.clone();
        spawn_local(async move {
            let (patient, timeline) = client.patients().chart(&id).await;
            match patient {
                Ok(patient) => {
                    let timeline = timeline.unwrap_or_else(|e| {
                        log::warn!("Timeline for patient {} unavailable: {}", id, e);
                        PatientTimeline::default()
                    });
                    set_state.set(ViewState::Loaded((patient, timeline)));
                }
                Err(e) => {
                    log::error!("Error loading patient {}: {}", id, e);
                    ctx.error(LOAD_FAILED);
                    set_state.set(ViewState::Failed(LOAD_FAILED.to_string()));
                }
            }
        });
    });

    let delete_id = id.clone();
    let on_delete = Callback::new(move |_: ()| {
        if deleting.get_untracked().is_submitting() {
            return;
        }
        set_deleting.set(Submission::Submitting);
        let client = ctx.client();
        let id = delete_id.clone();
        spawn_local(async move {
            let result = client.patients().delete(&id).await;
            set_deleting.set(Submission::Idle);
            match result {
                Ok(()) => {
                    ctx.success("Pasien berhasil dihapus");
                    ctx.navigate(PATIENTS);
                }
                Err(e) if e.is_forbidden() => {
                    ctx.error("Anda tidak memiliki izin untuk menghapus pasien");
                }
                Err(e) => {
                    log::error!("Error deleting patient {}: {}", id, e);
                    ctx.error("Gagal menghapus pasien");
                }
            }
        });
    });
    let busy = Signal::derive(move || deleting.get().is_submitting());

    view! {
        {move || match state.get() {
            ViewState::Idle | ViewState::Loading => view! { <Spinner /> }.into_any(),
            ViewState::Failed(_) => view! {
                <div class="empty-state">
                    <p>"Pasien tidak ditemukan"</p>
                    <Link href=PATIENTS class="card-link">"Kembali ke daftar pasien"</Link>
                </div>
            }.into_any(),
            ViewState::Loaded((patient, timeline)) => {
                let timeline = StoredValue::new(timeline);
                let summary = StoredValue::new(patient.clone());
                let new_encounter = Route::NewEncounter { patient: Some(patient.id.clone()) }.path();
                let new_appointment = Route::NewAppointment { patient: Some(patient.id.clone()) }.path();
                let delete_message = format!(
                    "Apakah Anda yakin ingin menghapus pasien {}? Tindakan ini tidak dapat dibatalkan.",
                    patient.full_name()
                );
                let emergency = patient.emergency_contact.clone().unwrap_or_default();

                view! {
                    <div class="patient-detail-page">
                        <div class="page-header">
                            <div class="title-row">
                                <Link href=PATIENTS class="back-link">"←"</Link>
                                <div>
                                    <h1 class="page-title">{patient.full_name()}</h1>
                                    <p class="page-subtitle">"MRN: " {or_missing(&patient.mrn)}</p>
                                </div>
                            </div>
                            <div class="header-actions">
                                <Link href=new_encounter class="btn btn-secondary">"Kunjungan Baru"</Link>
                                <Link href=new_appointment class="btn btn-secondary">"Buat Janji Temu"</Link>
                                <Show when=move || can_delete.get()>
                                    <DeleteConfirmButton
                                        label="Hapus Pasien"
                                        message=delete_message.clone()
                                        busy=busy
                                        on_confirm=on_delete
                                    />
                                </Show>
                            </div>
                        </div>

                        <div class="info-grid">
                            <div class="card">
                                <h3 class="card-title">"Demografi"</h3>
                                <dl>
                                    <DetailField label="Umur" value=age_label(patient.date_of_birth.as_deref()) />
                                    <DetailField label="Jenis Kelamin" value=labels::label_opt(labels::GENDER, patient.gender.as_deref()) />
                                    <DetailField label="Golongan Darah" value=or_missing(&patient.blood_type) />
                                </dl>
                            </div>
                            <div class="card">
                                <h3 class="card-title">"Informasi Kontak"</h3>
                                <dl>
                                    <DetailField label="Email" value=or_missing(&patient.email) />
                                    <DetailField label="Telepon" value=or_missing(&patient.phone_number) />
                                    <DetailField label="Alamat" value=or_missing(&patient.address) />
                                </dl>
                            </div>
                            <div class="card">
                                <h3 class="card-title">"Kontak Darurat"</h3>
                                <dl>
                                    <DetailField label="Nama" value=or_missing(&emergency.name) />
                                    <DetailField label="Hubungan" value=or_missing(&emergency.relationship) />
                                    <DetailField label="Telepon" value=or_missing(&emergency.phone_number) />
                                </dl>
                            </div>
                        </div>

                        <nav class="tabs">
                            {Tab::ALL.iter().map(|t| {
                                let t = *t;
                                view! {
                                    <button
                                        class=move || if tab.get() == t { "tab active" } else { "tab" }
                                        on:click=move |_| set_tab.set(t)
                                    >
                                        {t.label()}
                                    </button>
                                }
                            }).collect_view()}
                        </nav>

                        <div class="card tab-panel">
                            {move || match tab.get() {
                                Tab::Summary => summary.with_value(|p| summary_tab(p)).into_any(),
                                Tab::Allergies => timeline.with_value(|t| allergies_tab(t)).into_any(),
                                Tab::Medications => timeline.with_value(|t| medications_tab(t)).into_any(),
                                Tab::Encounters => timeline.with_value(|t| encounters_tab(t)).into_any(),
                                Tab::Appointments => timeline.with_value(|t| appointments_tab(t)).into_any(),
                            }}
                        </div>
                    </div>
                }.into_any()
            }
        }}
    }
}

fn summary_tab(patient: &Patient) -> impl IntoView {
    view! {
        <h3 class="card-title">"Ringkasan Pasien"</h3>
        <dl class="detail-grid">
            <DetailField label="Tanggal Lahir" value=long_date(patient.date_of_birth.as_deref()) />
            <DetailField label="Kewarganegaraan" value=or_missing(&patient.nationality) />
            <DetailField label="Status Pernikahan" value=labels::label_opt(labels::MARITAL_STATUS, patient.marital_status.as_deref()) />
            <DetailField label="Pekerjaan" value=or_missing(&patient.occupation) />
        </dl>
    }
}

fn allergies_tab(timeline: &PatientTimeline) -> impl IntoView {
    if timeline.allergies.is_empty() {
        return view! {
            <h3 class="card-title">"Alergi"</h3>
            <p class="empty-text">"Tidak ada alergi tercatat"</p>
        }.into_any();
    }
    view! {
        <h3 class="card-title">"Alergi"</h3>
        {timeline.allergies.iter().map(|allergy| {
            let severity = allergy.severity.clone().unwrap_or_default();
            let tone = match severity.as_str() {
                "severe" => "badge badge-danger",
                "moderate" => "badge badge-warning",
                _ => "badge badge-info",
            };
            view! {
                <div class="list-row">
                    <div>
                        <p class="row-title">{allergy.allergen.clone()}</p>
                        <p class="row-sub">{allergy.allergy_type.clone().unwrap_or_default()}</p>
                        {allergy.reaction.clone().map(|reaction| view! { <p class="row-note">"Reaksi: " {reaction}</p> })}
                    </div>
                    <span class=tone>{severity}</span>
                </div>
            }
        }).collect_view()}
    }.into_any()
}

fn medications_tab(timeline: &PatientTimeline) -> impl IntoView {
    let active: Vec<_> = timeline.active_medications().cloned().collect();
    if active.is_empty() {
        return view! {
            <h3 class="card-title">"Obat Saat Ini"</h3>
            <p class="empty-text">"Tidak ada obat aktif"</p>
        }.into_any();
    }
    view! {
        <h3 class="card-title">"Obat Saat Ini"</h3>
        {active.into_iter().map(|medication| {
            let dosing = format!(
                "{} - {}",
                medication.dosage.clone().unwrap_or_default(),
                medication.frequency.clone().unwrap_or_default()
            );
            view! {
                <div class="list-row">
                    <div>
                        <p class="row-title">{medication.medication_name}</p>
                        <p class="row-sub">{dosing}</p>
                        {medication.instructions.map(|text| view! { <p class="row-note">{text}</p> })}
                    </div>
                    <span class="badge badge-success">"Aktif"</span>
                </div>
            }
        }).collect_view()}
    }.into_any()
}

fn encounters_tab(timeline: &PatientTimeline) -> impl IntoView {
    if timeline.encounters.is_empty() {
        return view! {
            <h3 class="card-title">"Kunjungan Medis"</h3>
            <p class="empty-text">"Tidak ada kunjungan tercatat"</p>
        }.into_any();
    }
    view! {
        <h3 class="card-title">"Kunjungan Medis"</h3>
        {timeline.encounters.iter().map(|encounter| {
            let href = Route::EncounterDetail { id: encounter.id.clone() }.path();
            let type_label = labels::encounter_type(&encounter.encounter_type).to_string();
            let admission = long_date(encounter.admission_date.as_deref());
            let status = encounter.status.clone();
            let status_label = labels::encounter_status(&encounter.status).to_string();
            view! {
                <Link href=href class="list-row">
                    <div>
                        <p class="row-title">{type_label}</p>
                        <p class="row-sub">{admission}</p>
                    </div>
                    <StatusBadge
                        status=status
                        label=status_label
                    />
                </Link>
            }
        }).collect_view()}
    }.into_any()
}

fn appointments_tab(timeline: &PatientTimeline) -> impl IntoView {
    if timeline.appointments.is_empty() {
        return view! {
            <h3 class="card-title">"Janji Temu"</h3>
            <p class="empty-text">"Tidak ada janji temu terjadwal"</p>
        }.into_any();
    }
    view! {
        <h3 class="card-title">"Janji Temu"</h3>
        {timeline.appointments.iter().map(|appointment| view! {
            <div class="list-row">
                <div>
                    <p class="row-title">{labels::appointment_type(&appointment.appointment_type).to_string()}</p>
                    <p class="row-sub">{long_date_time(appointment.start_time.as_deref())}</p>
                </div>
                <StatusBadge
                    status=appointment.status.clone()
                    label=labels::appointment_status(&appointment.status).to_string()
                />
            </div>
        }).collect_view()}
    }.into_any()
}
