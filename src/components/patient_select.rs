//! Patient Select Component
//!
//! Picker over the first page of patients ("Name - MRN"). Load failures
//! are logged and leave the picker empty.

use leptos::prelude::*;
use leptos::task::spawn_local;

use emr_client::forms::FieldErrors;
use emr_client::models::Patient;
use emr_client::services::{PageRequest, PICKER_PAGE_SIZE};

use super::FieldError;
use crate::context::use_app_context;

#[component]
pub fn PatientSelect(
    value: Signal<String>,
    #[prop(into)] on_change: Callback<String>,
    errors: ReadSignal<FieldErrors>,
) -> impl IntoView {
    let ctx = use_app_context();
    let (patients, set_patients) = signal(Vec::<Patient>::new());
    let (loading, set_loading) = signal(true);

    Effect::new(move |_| {
        let client = ctx.client();
        spawn_local(async move {
            match client.patients().list(PageRequest::first(PICKER_PAGE_SIZE), None).await {
                Ok(page) => set_patients.set(page.data),
                Err(e) => log::error!("Error loading patients: {}", e),
            }
            set_loading.set(false);
        });
    });

    view! {
        <div class="form-field">
            <label class="form-label" for="patient_id">"Pasien *"</label>
            <select
                id="patient_id"
                class="input"
                disabled=move || loading.get()
                on:change=move |ev| on_change.run(event_target_value(&ev))
            >
                <option value="">"Pilih pasien"</option>
                <For
                    each=move || patients.get()
                    key=|patient| patient.id.clone()
                    children=move |patient| {
                        let id = patient.id.clone();
                        view! {
                            <option value=patient.id.clone() selected=move || value.get() == id>
                                {patient.picker_label()}
                            </option>
                        }
                    }
                />
            </select>
            <FieldError errors=errors field="patient_id" />
        </div>
    }
}
