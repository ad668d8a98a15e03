//! Patient Registration
//!
//! Personal, contact, emergency-contact and insurance sections. The form
//! is shaped into a request body by `PatientForm::to_payload`.

use leptos::prelude::*;
use leptos::task::spawn_local;

use emr_client::forms::{FieldErrors, PatientForm};
use emr_client::labels::{BLOOD_TYPES, GENDER, MARITAL_STATUS};
use emr_client::routes::PATIENTS;
use emr_client::{Notice, Submission};

use crate::components::{Link, SelectInput, TextInput};
use crate::context::use_app_context;

#[component]
pub fn CreatePatientPage() -> impl IntoView {
    let ctx = use_app_context();
    let form = RwSignal::new(PatientForm::default());
    let (errors, set_errors) = signal(FieldErrors::new());
    let (submission, set_submission) = signal(Submission::Idle);

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        if submission.get_untracked().is_submitting() {
            return;
        }
        let payload = match form.with_untracked(|f| f.to_payload()) {
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
            let result = client.patients().create(&payload).await;
            set_submission.set(Submission::Idle);
            match result {
                Ok(patient) => {
                    log::info!("Created patient {}", patient.id);
                    ctx.success("Pasien berhasil dibuat");
                    ctx.navigate(PATIENTS);
                }
                Err(e) => {
                    log::error!("Error creating patient: {}", e);
                    ctx.notify(Notice::from_error(&e, "Gagal membuat pasien"));
                }
            }
        });
    };

    view! {
        <div class="create-page">
            <div class="title-row">
                <Link href=PATIENTS class="back-link">"←"</Link>
                <h1 class="page-title">"Buat Pasien Baru"</h1>
            </div>

            <form class="form-stack" on:submit=on_submit>
                <section class="card">
                    <h2 class="card-title">"Informasi Pribadi"</h2>
                    <div class="form-grid">
                        <TextInput label="Nama Depan" name="first_name" required=true errors=errors
                            value=form_value!(form.first_name) on_input=form_setter!(form.first_name) />
                        <TextInput label="Nama Belakang" name="last_name" required=true errors=errors
                            value=form_value!(form.last_name) on_input=form_setter!(form.last_name) />
                        <TextInput label="Nama Tengah" name="middle_name"
                            value=form_value!(form.middle_name) on_input=form_setter!(form.middle_name) />
                        <TextInput label="Tanggal Lahir" name="date_of_birth" input_type="date" required=true errors=errors
                            value=form_value!(form.date_of_birth) on_input=form_setter!(form.date_of_birth) />
                        <SelectInput label="Jenis Kelamin" name="gender" options=GENDER required=true errors=errors
                            placeholder="Pilih jenis kelamin"
                            value=form_value!(form.gender) on_change=form_setter!(form.gender) />
                        <div class="form-field">
                            <label class="form-label" for="blood_type">"Golongan Darah"</label>
                            <select
                                id="blood_type"
                                class="input"
                                prop:value=move || form.with(|f| f.blood_type.clone())
                                on:change=move |ev| form.update(|f| f.blood_type = event_target_value(&ev))
                            >
                                <option value="">"Pilih golongan darah"</option>
                                {BLOOD_TYPES.iter().map(|bt| view! { <option value=*bt>{*bt}</option> }).collect_view()}
                            </select>
                        </div>
                        <SelectInput label="Status Pernikahan" name="marital_status" options=MARITAL_STATUS
                            placeholder="Pilih status"
                            value=form_value!(form.marital_status) on_change=form_setter!(form.marital_status) />
                        <TextInput label="Kewarganegaraan" name="nationality"
                            value=form_value!(form.nationality) on_input=form_setter!(form.nationality) />
                    </div>
                </section>

                <section class="card">
                    <h2 class="card-title">"Informasi Kontak"</h2>
                    <div class="form-grid">
                        <TextInput label="Email" name="email" input_type="email"
                            value=form_value!(form.email) on_input=form_setter!(form.email) />
                        <TextInput label="Nomor Telepon" name="phone_number" input_type="tel"
                            value=form_value!(form.phone_number) on_input=form_setter!(form.phone_number) />
                        <TextInput label="Alamat" name="address"
                            value=form_value!(form.address) on_input=form_setter!(form.address) />
                        <TextInput label="Kota" name="city"
                            value=form_value!(form.city) on_input=form_setter!(form.city) />
                        <TextInput label="Provinsi" name="state"
                            value=form_value!(form.state) on_input=form_setter!(form.state) />
                        <TextInput label="Kode Pos" name="zip_code"
                            value=form_value!(form.zip_code) on_input=form_setter!(form.zip_code) />
                        <TextInput label="Negara" name="country"
                            value=form_value!(form.country) on_input=form_setter!(form.country) />
                    </div>
                </section>

                <section class="card">
                    <h2 class="card-title">"Kontak Darurat"</h2>
                    <div class="form-grid">
                        <TextInput label="Nama" name="emergency_contact_name"
                            value=form_value!(form.emergency_contact_name) on_input=form_setter!(form.emergency_contact_name) />
                        <TextInput label="Hubungan" name="emergency_contact_relationship"
                            value=form_value!(form.emergency_contact_relationship)
                            on_input=form_setter!(form.emergency_contact_relationship) />
                        <TextInput label="Nomor Telepon" name="emergency_contact_phone" input_type="tel"
                            value=form_value!(form.emergency_contact_phone) on_input=form_setter!(form.emergency_contact_phone) />
                        <TextInput label="Email" name="emergency_contact_email" input_type="email"
                            value=form_value!(form.emergency_contact_email) on_input=form_setter!(form.emergency_contact_email) />
                    </div>
                </section>

                <section class="card">
                    <h2 class="card-title">"Informasi Asuransi"</h2>
                    <div class="form-grid">
                        <TextInput label="Penyedia Asuransi" name="insurance_provider"
                            value=form_value!(form.insurance_provider) on_input=form_setter!(form.insurance_provider) />
                        <TextInput label="Nomor Polis" name="insurance_policy_number"
                            value=form_value!(form.insurance_policy_number) on_input=form_setter!(form.insurance_policy_number) />
                        <TextInput label="Nomor Grup" name="insurance_group_number"
                            value=form_value!(form.insurance_group_number) on_input=form_setter!(form.insurance_group_number) />
                    </div>
                </section>

                <div class="form-actions">
                    <Link href=PATIENTS class="btn btn-secondary">"Batal"</Link>
                    <button type="submit" class="btn btn-primary" disabled=move || submission.get().is_submitting()>
                        {move || if submission.get().is_submitting() { "Membuat..." } else { "Buat Pasien" }}
                    </button>
                </div>
            </form>
        </div>
    }
}
