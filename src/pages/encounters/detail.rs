//! Encounter Detail
//!
//! Header facts plus three sections (vital signs, clinical notes,
//! diagnoses). Each section has an inline form; at most one is open at a
//! time. A successful add closes the form and refetches the encounter.

use leptos::prelude::*;
use leptos::task::spawn_local;

use emr_client::format::{date_time, short_date, MISSING};
use emr_client::forms::{DiagnosisForm, FieldErrors, NoteForm, VitalsForm};
use emr_client::labels::{self, DIAGNOSIS_TYPE, NOTE_TYPE};
use emr_client::models::{ClinicalNote, Diagnosis, Encounter, VitalSigns};
use emr_client::routes::{ENCOUNTERS, PATIENTS};
use emr_client::{Notice, Panel, Submission, ViewState};

use crate::components::{Link, SelectInput, Spinner, StatusBadge, TextArea, TextInput};
use crate::context::use_app_context;

const LOAD_FAILED: &str = "Gagal memuat kunjungan";

#[component]
pub fn EncounterDetailPage(id: String) -> impl IntoView {
    let ctx = use_app_context();
    let id = StoredValue::new(id);

    let (state, set_state) = signal(ViewState::<Encounter>::Loading);
    let (reload, set_reload) = signal(0u32);
    let (panel, set_panel) = signal(Panel::None);
    let (submission, set_submission) = signal(Submission::Idle);

    let vitals = RwSignal::new(VitalsForm::default());
    let note = RwSignal::new(NoteForm::default());
    let diagnosis = RwSignal::new(DiagnosisForm::default());
    let (vitals_errors, set_vitals_errors) = signal(FieldErrors::new());
    let (note_errors, set_note_errors) = signal(FieldErrors::new());
    let (diagnosis_errors, set_diagnosis_errors) = signal(FieldErrors::new());

    // Refetches after an add keep the loaded view on screen
    Effect::new(move |_| {
        let _ = reload.get();
        if state.with_untracked(|s| s.loaded().is_none()) {
            set_state.set(ViewState::Loading);
        }
        let client = ctx.client();
        let id = id.get_value();
        spawn_local(async move {
            match client.encounters().get(&id).await {
                Ok(encounter) => set_state.set(ViewState::Loaded(encounter)),
                Err(e) => {
                    log::error!("Error loading encounter {}: {}", id, e);
                    ctx.notify(Notice::from_error(&e, LOAD_FAILED));
                    set_state.set(ViewState::Failed(e.user_message(LOAD_FAILED)));
                }
            }
        });
    });

    let toggle = move |target: Panel| set_panel.update(|p| *p = p.toggle(target));
    let added = move || {
        set_submission.set(Submission::Idle);
        set_panel.set(Panel::None);
        set_reload.update(|n| *n += 1);
    };

    let on_vitals = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        if submission.get_untracked().is_submitting() {
            return;
        }
        let payload = match vitals.with_untracked(|f| f.to_payload()) {
            Ok(payload) => payload,
            Err(errors) => {
                set_vitals_errors.set(errors);
                return;
            }
        };
        set_vitals_errors.set(FieldErrors::new());
        set_submission.set(Submission::Submitting);
        let client = ctx.client();
        let id = id.get_value();
        spawn_local(async move {
            match client.encounters().record_vital_signs(&id, &payload).await {
                Ok(_) => {
                    ctx.success("Tanda vital berhasil dicatat");
                    vitals.set(VitalsForm::default());
                    added();
                }
                Err(e) => {
                    log::error!("Error recording vital signs: {}", e);
                    ctx.notify(Notice::from_error(&e, "Gagal mencatat tanda vital"));
                    set_submission.set(Submission::Idle);
                }
            }
        });
    };

    let on_note = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        if submission.get_untracked().is_submitting() {
            return;
        }
        let payload = match note.with_untracked(|f| f.to_payload()) {
            Ok(payload) => payload,
            Err(errors) => {
                set_note_errors.set(errors);
                return;
            }
        };
        set_note_errors.set(FieldErrors::new());
        set_submission.set(Submission::Submitting);
        let client = ctx.client();
        let id = id.get_value();
        spawn_local(async move {
            match client.encounters().add_clinical_note(&id, &payload).await {
                Ok(_) => {
                    ctx.success("Catatan klinis berhasil ditambahkan");
                    note.set(NoteForm::default());
                    added();
                }
                Err(e) => {
                    log::error!("Error adding clinical note: {}", e);
                    ctx.notify(Notice::from_error(&e, "Gagal menambahkan catatan klinis"));
                    set_submission.set(Submission::Idle);
                }
            }
        });
    };

    let on_diagnosis = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        if submission.get_untracked().is_submitting() {
            return;
        }
        let payload = match diagnosis.with_untracked(|f| f.to_payload()) {
            Ok(payload) => payload,
            Err(errors) => {
                set_diagnosis_errors.set(errors);
                return;
            }
        };
        set_diagnosis_errors.set(FieldErrors::new());
        set_submission.set(Submission::Submitting);
        let client = ctx.client();
        let id = id.get_value();
        spawn_local(async move {
            match client.encounters().add_diagnosis(&id, &payload).await {
                Ok(_) => {
                    ctx.success("Diagnosis berhasil ditambahkan");
                    diagnosis.set(DiagnosisForm::default());
                    added();
                }
                Err(e) => {
                    log::error!("Error adding diagnosis: {}", e);
                    ctx.notify(Notice::from_error(&e, "Gagal menambahkan diagnosis"));
                    set_submission.set(Submission::Idle);
                }
            }
        });
    };

    let submit_label = move |idle: &'static str| {
        move || if submission.get().is_submitting() { "Menyimpan..." } else { idle }
    };
    let busy = move || submission.get().is_submitting();

    view! {
        <div class="encounter-detail-page">
            {move || match state.get() {
                ViewState::Idle | ViewState::Loading => view! { <Spinner /> }.into_any(),
                ViewState::Failed(_) => view! {
                    <div class="empty-state">
                        <p>"Kunjungan tidak ditemukan"</p>
                        <Link href=ENCOUNTERS class="card-link">"Kembali ke kunjungan"</Link>
                    </div>
                }.into_any(),
                ViewState::Loaded(encounter) => {
                    let patient_line = encounter.patient.as_ref().map(|p| {
                        format!("{} - {}", p.full_name(), p.mrn.clone().unwrap_or_else(|| MISSING.to_string()))
                    });
                    let patient_href = encounter.patient_id.as_ref().map(|pid| format!("{}/{}", PATIENTS, pid));
                    let provider = encounter.provider.as_ref().map(|p| p.full_name()).unwrap_or_else(|| MISSING.to_string());
                    let status = encounter.status.clone();
                    let status_label = labels::encounter_status(&status).to_string();

                    view! {
                        <div class="title-row">
                            <Link href=ENCOUNTERS class="back-link">"←"</Link>
                            <div>
                                <h1 class="page-title">"Detail Kunjungan"</h1>
                                {patient_line.map(|line| match patient_href {
                                    Some(href) => view! { <Link href=href class="page-subtitle">{line}</Link> }.into_any(),
                                    None => view! { <p class="page-subtitle">{line}</p> }.into_any(),
                                })}
                            </div>
                            <StatusBadge status=status label=status_label />
                        </div>

                        <div class="card">
                            <div class="detail-grid">
                                <div>
                                    <div class="detail-label">"Tipe"</div>
                                    <div>{labels::encounter_type(&encounter.encounter_type).to_string()}</div>
                                </div>
                                <div>
                                    <div class="detail-label">"Dokter"</div>
                                    <div>{provider}</div>
                                </div>
                                <div>
                                    <div class="detail-label">"Tanggal Masuk"</div>
                                    <div>{short_date(encounter.admission_date.as_deref())}</div>
                                </div>
                            </div>
                            {encounter.chief_complaint.clone().map(|complaint| view! {
                                <div class="detail-block">
                                    <div class="detail-label">"Keluhan Utama"</div>
                                    <p>{complaint}</p>
                                </div>
                            })}
                        </div>

                        // ==================== Vital signs ====================
                        <section class="card">
                            <div class="card-header">
                                <h2 class="card-title">"Tanda Vital"</h2>
                                <button class="btn btn-secondary" on:click=move |_| toggle(Panel::Vitals)>
                                    "Catat Tanda Vital"
                                </button>
                            </div>
                            <Show when=move || panel.get() == Panel::Vitals>
                                <form class="inline-form" on:submit=on_vitals>
                                    <div class="form-grid">
                                        <TextInput label="Suhu (°C)" name="temperature" input_type="number" step="0.1"
                                            errors=vitals_errors
                                            value=form_value!(vitals.temperature) on_input=form_setter!(vitals.temperature) />
                                        <TextInput label="Detak Jantung (bpm)" name="heart_rate" input_type="number"
                                            errors=vitals_errors
                                            value=form_value!(vitals.heart_rate) on_input=form_setter!(vitals.heart_rate) />
                                        <TextInput label="TD Sistolik" name="blood_pressure_systolic" input_type="number"
                                            errors=vitals_errors
                                            value=form_value!(vitals.blood_pressure_systolic)
                                            on_input=form_setter!(vitals.blood_pressure_systolic) />
                                        <TextInput label="TD Diastolik" name="blood_pressure_diastolic" input_type="number"
                                            errors=vitals_errors
                                            value=form_value!(vitals.blood_pressure_diastolic)
                                            on_input=form_setter!(vitals.blood_pressure_diastolic) />
                                        <TextInput label="Laju Napas" name="respiratory_rate" input_type="number"
                                            errors=vitals_errors
                                            value=form_value!(vitals.respiratory_rate) on_input=form_setter!(vitals.respiratory_rate) />
                                        <TextInput label="Saturasi O2 (%)" name="oxygen_saturation" input_type="number" step="0.1"
                                            errors=vitals_errors
                                            value=form_value!(vitals.oxygen_saturation) on_input=form_setter!(vitals.oxygen_saturation) />
                                        <TextInput label="Berat (kg)" name="weight" input_type="number" step="0.1"
                                            errors=vitals_errors
                                            value=form_value!(vitals.weight) on_input=form_setter!(vitals.weight) />
                                        <TextInput label="Tinggi (cm)" name="height" input_type="number" step="0.1"
                                            errors=vitals_errors
                                            value=form_value!(vitals.height) on_input=form_setter!(vitals.height) />
                                        <TextInput label="Nyeri (0-10)" name="pain" input_type="number"
                                            errors=vitals_errors
                                            value=form_value!(vitals.pain) on_input=form_setter!(vitals.pain) />
                                    </div>
                                    <div class="form-actions">
                                        <button type="button" class="btn btn-secondary" on:click=move |_| set_panel.set(Panel::None)>
                                            "Batal"
                                        </button>
                                        <button type="submit" class="btn btn-primary" disabled=busy>{submit_label("Catat")}</button>
                                    </div>
                                </form>
                            </Show>
                            {vitals_list(encounter.vital_signs.clone())}
                        </section>

                        // ==================== Clinical notes ====================
                        <section class="card">
                            <div class="card-header">
                                <h2 class="card-title">"Catatan Klinis"</h2>
                                <button class="btn btn-secondary" on:click=move |_| toggle(Panel::Note)>
                                    "Tambah Catatan"
                                </button>
                            </div>
                            <Show when=move || panel.get() == Panel::Note>
                                <form class="inline-form" on:submit=on_note>
                                    <SelectInput label="Tipe Catatan" name="note_type" options=NOTE_TYPE required=true
                                        errors=note_errors
                                        value=form_value!(note.note_type) on_change=form_setter!(note.note_type) />
                                    <TextArea label="Subjektif" name="subjective"
                                        value=form_value!(note.subjective) on_input=form_setter!(note.subjective) />
                                    <TextArea label="Objektif" name="objective"
                                        value=form_value!(note.objective) on_input=form_setter!(note.objective) />
                                    <TextArea label="Penilaian" name="assessment"
                                        value=form_value!(note.assessment) on_input=form_setter!(note.assessment) />
                                    <TextArea label="Rencana" name="plan"
                                        value=form_value!(note.plan) on_input=form_setter!(note.plan) />
                                    <div class="form-actions">
                                        <button type="button" class="btn btn-secondary" on:click=move |_| set_panel.set(Panel::None)>
                                            "Batal"
                                        </button>
                                        <button type="submit" class="btn btn-primary" disabled=busy>
                                            {submit_label("Simpan Catatan")}
                                        </button>
                                    </div>
                                </form>
                            </Show>
                            {notes_list(encounter.clinical_notes.clone())}
                        </section>

                        // ==================== Diagnoses ====================
                        <section class="card">
                            <div class="card-header">
                                <h2 class="card-title">"Diagnosis"</h2>
                                <button class="btn btn-secondary" on:click=move |_| toggle(Panel::Diagnosis)>
                                    "Tambah Diagnosis"
                                </button>
                            </div>
                            <Show when=move || panel.get() == Panel::Diagnosis>
                                <form class="inline-form" on:submit=on_diagnosis>
                                    <div class="form-grid">
                                        <TextInput label="Kode ICD-10" name="icd10_code" required=true placeholder="J06.9"
                                            errors=diagnosis_errors
                                            value=form_value!(diagnosis.icd10_code) on_input=form_setter!(diagnosis.icd10_code) />
                                        <SelectInput label="Tipe Diagnosis" name="diagnosis_type" options=DIAGNOSIS_TYPE required=true
                                            errors=diagnosis_errors
                                            value=form_value!(diagnosis.diagnosis_type) on_change=form_setter!(diagnosis.diagnosis_type) />
                                    </div>
                                    <TextInput label="Deskripsi" name="description" required=true
                                        errors=diagnosis_errors
                                        value=form_value!(diagnosis.description) on_input=form_setter!(diagnosis.description) />
                                    <TextArea label="Catatan" name="notes" rows=2
                                        value=form_value!(diagnosis.notes) on_input=form_setter!(diagnosis.notes) />
                                    <div class="form-actions">
                                        <button type="button" class="btn btn-secondary" on:click=move |_| set_panel.set(Panel::None)>
                                            "Batal"
                                        </button>
                                        <button type="submit" class="btn btn-primary" disabled=busy>
                                            {submit_label("Simpan Diagnosis")}
                                        </button>
                                    </div>
                                </form>
                            </Show>
                            {diagnoses_list(encounter.diagnoses.clone())}
                        </section>
                    }.into_any()
                }
            }}
        </div>
    }
}

fn vitals_list(vitals: Vec<VitalSigns>) -> AnyView {
    if vitals.is_empty() {
        return view! { <p class="empty-text">"Tidak ada tanda vital tercatat"</p> }.into_any();
    }
    vitals
        .into_iter()
        .map(|v| {
            let reading = |label: &'static str, value: Option<String>| {
                value.map(|value| view! { <span class="reading"><strong>{label}</strong>" "{value}</span> })
            };
            let temperature = v.temperature.map(|t| format!("{:.1}°C", t));
            let heart_rate = v.heart_rate.map(|hr| format!("{} bpm", hr));
            let pressure = v.blood_pressure().map(|bp| format!("{} mmHg", bp));
            let oxygen = v.oxygen_saturation.map(|o2| format!("{}%", o2));
            let bmi = v.bmi.map(|bmi| format!("{:.1}", bmi));
            view! {
                <div class="record">
                    <div class="record-meta">{date_time(v.measured_at.as_deref())}</div>
                    <div class="readings">
                        {reading("Suhu:", temperature)}
                        {reading("DJ:", heart_rate)}
                        {reading("TD:", pressure)}
                        {reading("O2:", oxygen)}
                        {reading("BMI:", bmi)}
                    </div>
                </div>
            }
        })
        .collect_view()
        .into_any()
}

fn notes_list(notes: Vec<ClinicalNote>) -> AnyView {
    if notes.is_empty() {
        return view! { <p class="empty-text">"Tidak ada catatan klinis"</p> }.into_any();
    }
    notes
        .into_iter()
        .map(|note| {
            let section = |label: &'static str, text: Option<String>| {
                text.map(|text| view! { <p><strong>{label}</strong>" "{text}</p> })
            };
            let author = note.author.as_ref().map(|a| a.full_name());
            view! {
                <div class="record">
                    <div class="record-header">
                        <span class="record-title">{labels::note_type(&note.note_type).to_string()}</span>
                        <span class="record-meta">{date_time(note.created_at.as_deref())}</span>
                    </div>
                    {section("S:", note.subjective)}
                    {section("O:", note.objective)}
                    {section("A:", note.assessment)}
                    {section("P:", note.plan)}
                    {author.map(|name| view! { <p class="record-meta">"Oleh: "{name}</p> })}
                </div>
            }
        })
        .collect_view()
        .into_any()
}

fn diagnoses_list(diagnoses: Vec<Diagnosis>) -> AnyView {
    if diagnoses.is_empty() {
        return view! { <p class="empty-text">"Tidak ada diagnosis tercatat"</p> }.into_any();
    }
    diagnoses
        .into_iter()
        .map(|d| {
            view! {
                <div class="record">
                    <div class="record-title">{d.description}</div>
                    <div class="record-meta">"ICD-10: "{d.icd10_code}</div>
                    <span class="badge badge-info">{labels::diagnosis_type(&d.diagnosis_type).to_string()}</span>
                    {d.notes.map(|notes| view! { <p>{notes}</p> })}
                </div>
            }
        })
        .collect_view()
        .into_any()
}
