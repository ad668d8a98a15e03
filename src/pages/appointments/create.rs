//! New Appointment
//!
//! Booking form with an availability sidebar. Choosing a doctor and a day
//! lists that doctor's open slots; clicking one fills the start time.

use leptos::prelude::*;
use leptos::task::spawn_local;

use emr_client::authz::roles;
use emr_client::format::{time_of_day, timestamp_to_input, today_input};
use emr_client::forms::{AppointmentForm, FieldErrors};
use emr_client::labels::{APPOINTMENT_DURATIONS, APPOINTMENT_TYPE};
use emr_client::models::{AvailabilitySlot, User};
use emr_client::routes::APPOINTMENTS;
use emr_client::{Notice, Submission, ViewState};

use crate::components::{FieldError, Link, PatientSelect, SelectInput, Spinner, TextArea, TextInput};
use crate::context::use_app_context;

fn duration_label(minutes: u32) -> String {
    match (minutes / 60, minutes % 60) {
        (0, m) => format!("{} menit", m),
        (h, 0) => format!("{} jam", h),
        (h, 30) => format!("{},5 jam", h),
        _ => format!("{} menit", minutes),
    }
}

#[component]
pub fn CreateAppointmentPage(patient: Option<String>) -> impl IntoView {
    let ctx = use_app_context();
    let form = RwSignal::new(AppointmentForm {
        patient_id: patient.unwrap_or_default(),
        ..Default::default()
    });
    let (errors, set_errors) = signal(FieldErrors::new());
    let (submission, set_submission) = signal(Submission::Idle);
    let (providers, set_providers) = signal(Vec::<User>::new());
    let (selected_date, set_selected_date) = signal(today_input());
    let (slots, set_slots) = signal(ViewState::<Vec<AvailabilitySlot>>::Idle);

    let provider_id = Memo::new(move |_| form.with(|f| f.provider_id.clone()));

    Effect::new(move |_| {
        let client = ctx.client();
        spawn_local(async move {
            match client.users().by_role(roles::DOCTOR).await {
                Ok(users) => set_providers.set(users),
                Err(e) => log::error!("Error loading providers: {}", e),
            }
        });
    });

    // Availability for the chosen doctor and day
    Effect::new(move |_| {
        let provider = provider_id.get();
        let date = selected_date.get();
        if provider.is_empty() || date.is_empty() {
            set_slots.set(ViewState::Idle);
            return;
        }
        set_slots.set(ViewState::Loading);
        let client = ctx.client();
        spawn_local(async move {
            let result = client.appointments().availability(&provider, &date).await;
            // A newer selection supersedes this response
            if provider_id.get_untracked() != provider || selected_date.get_untracked() != date {
                return;
            }
            match result {
                Ok(found) => set_slots.set(ViewState::Loaded(found)),
                Err(e) => {
                    log::error!("Error loading availability: {}", e);
                    set_slots.set(ViewState::Loaded(Vec::new()));
                }
            }
        });
    });

    let on_slot = move |slot: &AvailabilitySlot| match timestamp_to_input(&slot.start_time) {
        Some(start) => form.update(|f| f.start_time = start),
        None => log::warn!("Unreadable slot start time: {}", slot.start_time),
    };

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
            let result = client.appointments().create(&payload).await;
            set_submission.set(Submission::Idle);
            match result {
                Ok(appointment) => {
                    log::info!("Created appointment {}", appointment.id);
                    ctx.success("Janji temu berhasil dibuat!");
                    ctx.navigate(APPOINTMENTS);
                }
                Err(e) => {
                    log::error!("Error creating appointment: {}", e);
                    ctx.notify(Notice::from_error(&e, "Gagal membuat janji temu"));
                }
            }
        });
    };

    let duration = Memo::new(move |_| form.with(|f| f.duration.clone()));

    view! {
        <div class="create-page">
            <div class="title-row">
                <Link href=APPOINTMENTS class="back-link">"←"</Link>
                <div>
                    <h1 class="page-title">"Janji Temu Baru"</h1>
                    <p class="page-subtitle">"Jadwalkan janji temu pasien baru"</p>
                </div>
            </div>

            <div class="split-layout">
                <form class="form-stack" on:submit=on_submit>
                    <section class="card">
                        <h2 class="card-title">"Detail Janji Temu"</h2>
                        <PatientSelect errors=errors
                            value=form_value!(form.patient_id) on_change=form_setter!(form.patient_id) />

                        <div class="form-field">
                            <label class="form-label" for="provider_id">"Dokter *"</label>
                            <select
                                id="provider_id"
                                class="input"
                                on:change=move |ev| form.update(|f| f.provider_id = event_target_value(&ev))
                            >
                                <option value="">"Pilih dokter"</option>
                                <For
                                    each=move || providers.get()
                                    key=|user| user.id.clone()
                                    children=move |user| {
                                        let id = user.id.clone();
                                        view! {
                                            <option value=user.id.clone() selected=move || provider_id.get() == id>
                                                {format!("Dr. {}", user.full_name())}
                                            </option>
                                        }
                                    }
                                />
                            </select>
                            <FieldError errors=errors field="provider_id" />
                        </div>

                        <SelectInput label="Tipe Janji Temu" name="appointment_type" options=APPOINTMENT_TYPE required=true
                            placeholder="Pilih tipe" errors=errors
                            value=form_value!(form.appointment_type) on_change=form_setter!(form.appointment_type) />

                        <div class="form-grid">
                            <div class="form-field">
                                <label class="form-label" for="date">"Tanggal *"</label>
                                <input
                                    id="date"
                                    type="date"
                                    class="input"
                                    min=today_input()
                                    prop:value=move || selected_date.get()
                                    on:change=move |ev| set_selected_date.set(event_target_value(&ev))
                                />
                            </div>
                            <div class="form-field">
                                <label class="form-label" for="duration">"Durasi (menit) *"</label>
                                <select
                                    id="duration"
                                    class="input"
                                    prop:value=move || duration.get()
                                    on:change=move |ev| form.update(|f| f.duration = event_target_value(&ev))
                                >
                                    {APPOINTMENT_DURATIONS.iter().map(|minutes| {
                                        let value = minutes.to_string();
                                        view! {
                                            <option value=value.clone() selected=move || duration.get() == value>
                                                {duration_label(*minutes)}
                                            </option>
                                        }
                                    }).collect_view()}
                                </select>
                                <FieldError errors=errors field="duration" />
                            </div>
                        </div>

                        <TextInput label="Waktu Mulai" name="start_time" input_type="datetime-local" required=true
                            errors=errors
                            value=form_value!(form.start_time) on_input=form_setter!(form.start_time) />
                        <TextInput label="Lokasi" name="location" placeholder="mis: Gedung A, Ruang 201"
                            value=form_value!(form.location) on_input=form_setter!(form.location) />
                        <TextArea label="Alasan Kunjungan" name="reason_for_visit"
                            placeholder="Deskripsi singkat alasan janji temu ini"
                            value=form_value!(form.reason_for_visit) on_input=form_setter!(form.reason_for_visit) />
                        <TextArea label="Catatan" name="notes" rows=2
                            placeholder="Catatan tambahan atau instruksi"
                            value=form_value!(form.notes) on_input=form_setter!(form.notes) />
                    </section>

                    <div class="form-actions">
                        <Link href=APPOINTMENTS class="btn btn-secondary">"Batal"</Link>
                        <button type="submit" class="btn btn-primary" disabled=move || submission.get().is_submitting()>
                            {move || if submission.get().is_submitting() { "Membuat..." } else { "Buat Janji Temu" }}
                        </button>
                    </div>
                </form>

                <aside class="card availability">
                    <h3 class="card-title">"Slot Waktu Tersedia"</h3>
                    {move || match slots.get() {
                        ViewState::Idle => view! {
                            <p class="empty-text">"Pilih dokter untuk melihat ketersediaan"</p>
                        }.into_any(),
                        ViewState::Loading => view! { <Spinner /> }.into_any(),
                        ViewState::Failed(_) => view! {
                            <p class="empty-text">"Tidak ada data ketersediaan"</p>
                        }.into_any(),
                        ViewState::Loaded(found) if found.is_empty() => view! {
                            <p class="empty-text">"Tidak ada data ketersediaan"</p>
                        }.into_any(),
                        ViewState::Loaded(found) => {
                            let open: Vec<AvailabilitySlot> = found.into_iter().filter(|s| s.available).collect();
                            if open.is_empty() {
                                return view! {
                                    <p class="empty-text">"Tidak ada slot tersedia untuk tanggal ini"</p>
                                }.into_any();
                            }
                            view! {
                                <div class="slot-list">
                                    {open.into_iter().map(|slot| {
                                        let time = time_of_day(Some(slot.start_time.as_str()));
                                        view! {
                                            <button type="button" class="slot-button" on:click=move |_| on_slot(&slot)>
                                                <span class="slot-time">{time}</span>
                                                <span class="slot-duration">{move || format!("{} min", duration.get())}</span>
                                            </button>
                                        }
                                    }).collect_view()}
                                </div>
                            }.into_any()
                        }
                    }}
                </aside>
            </div>
        </div>
    }
}
