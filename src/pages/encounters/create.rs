//! New Encounter
//!
//! The signed-in user is the provider. A `?patient=` query preselects the
//! patient when coming from the patient chart.

use leptos::prelude::*;
use leptos::task::spawn_local;

use emr_client::format::now_input;
use emr_client::forms::{EncounterForm, FieldErrors, SELECT_PATIENT};
use emr_client::labels::{ENCOUNTER_PRIORITY, ENCOUNTER_TYPE};
use emr_client::routes::ENCOUNTERS;
use emr_client::{Notice, Submission};

use crate::components::{Link, PatientSelect, SelectInput, TextArea, TextInput};
use crate::context::use_app_context;

#[component]
pub fn CreateEncounterPage(patient: Option<String>) -> impl IntoView {
    let ctx = use_app_context();
    let form = RwSignal::new(EncounterForm {
        patient_id: patient.unwrap_or_default(),
        admission_date: now_input(),
        ..Default::default()
    });
    let (errors, set_errors) = signal(FieldErrors::new());
    let (submission, set_submission) = signal(Submission::Idle);

    let provider = ctx.client().session().user();
    let provider_name = provider.as_ref().map(|u| u.full_name()).unwrap_or_default();
    let provider_id = provider.map(|u| u.id).unwrap_or_default();

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        if submission.get_untracked().is_submitting() {
            return;
        }
        if !form.with_untracked(|f| f.has_patient()) {
            ctx.error(SELECT_PATIENT);
            return;
        }
        let payload = match form.with_untracked(|f| f.to_payload(&provider_id)) {
            Ok(payload) => payload,
            Err(field_errors) => {
                set_errors.set(field_errors);
                return;
            }
        };
        set_errors.set(FieldErrors::new());
        set_submission.set(Submission::Submitting);

        let client = ctx.client();
        spawn_local(async move {
            let result = client.encounters().create(&payload).await;
            set_submission.set(Submission::Idle);
            match result {
                Ok(encounter) => {
                    log::info!("Created encounter {}", encounter.id);
                    ctx.success("Kunjungan berhasil dibuat");
                    ctx.navigate(ENCOUNTERS);
                }
                Err(e) => {
                    log::error!("Error creating encounter: {}", e);
                    ctx.notify(Notice::from_error(&e, "Gagal membuat kunjungan"));
                }
            }
        });
    };

    view! {
        <div class="create-page">
            <div class="title-row">
                <Link href=ENCOUNTERS class="back-link">"←"</Link>
                <h1 class="page-title">"Buat Kunjungan Baru"</h1>
            </div>

            <form class="form-stack" on:submit=on_submit>
                <section class="card">
                    <h2 class="card-title">"Informasi Kunjungan"</h2>
                    <div class="form-grid">
                        <PatientSelect errors=errors
                            value=form_value!(form.patient_id) on_change=form_setter!(form.patient_id) />
                        <div class="form-field">
                            <label class="form-label">"Dokter *"</label>
                            <input type="text" class="input input-readonly" value=provider_name disabled=true />
                        </div>
                        <SelectInput label="Tipe Kunjungan" name="encounter_type" options=ENCOUNTER_TYPE required=true
                            placeholder="Pilih tipe" errors=errors
                            value=form_value!(form.encounter_type) on_change=form_setter!(form.encounter_type) />
                        <SelectInput label="Prioritas" name="priority" options=ENCOUNTER_PRIORITY
                            value=form_value!(form.priority) on_change=form_setter!(form.priority) />
                        <TextInput label="Tanggal Masuk" name="admission_date" input_type="datetime-local" required=true
                            errors=errors
                            value=form_value!(form.admission_date) on_input=form_setter!(form.admission_date) />
                        <TextInput label="Departemen" name="department" placeholder="mis: Penyakit Dalam"
                            value=form_value!(form.department) on_input=form_setter!(form.department) />
                        <TextInput label="Lokasi" name="location" placeholder="mis: Ruang 201"
                            value=form_value!(form.location) on_input=form_setter!(form.location) />
                    </div>
                    <TextArea label="Keluhan Utama" name="chief_complaint" rows=2
                        placeholder="Keluhan utama atau alasan kunjungan pasien"
                        value=form_value!(form.chief_complaint) on_input=form_setter!(form.chief_complaint) />
                    <TextArea label="Alasan Kunjungan" name="reason_for_visit" rows=2
                        placeholder="Alasan kunjungan secara detail"
                        value=form_value!(form.reason_for_visit) on_input=form_setter!(form.reason_for_visit) />
                </section>

                <div class="form-actions">
                    <Link href=ENCOUNTERS class="btn btn-secondary">"Batal"</Link>
                    <button type="submit" class="btn btn-primary" disabled=move || submission.get().is_submitting()>
                        {move || if submission.get().is_submitting() { "Membuat..." } else { "Buat Kunjungan" }}
                    </button>
                </div>
            </form>
        </div>
    }
}
