//! Patient List
//!
//! Paged table with a submit-to-search box over name, MRN and e-mail.

use leptos::prelude::*;
use leptos::task::spawn_local;

use emr_client::format::{age_label, MISSING};
use emr_client::labels;
use emr_client::models::Patient;
use emr_client::routes::PATIENTS;
use emr_client::{Notice, Pager, ViewState};

use crate::components::{Link, PagerBar, Spinner, StatusBadge};
use crate::context::use_app_context;

const LOAD_FAILED: &str = "Gagal memuat pasien";

#[component]
pub fn PatientsPage() -> impl IntoView {
    let ctx = use_app_context();

    let (search, set_search) = signal(String::new());
    // Term actually sent; changes only on submit
    let (query, set_query) = signal(String::new());
    let (reload, set_reload) = signal(0u32);
    let (pager, set_pager) = signal(Pager::default());
    let (state, set_state) = signal(ViewState::<Vec<Patient>>::Loading);

    let page = Memo::new(move |_| pager.get().page);

    // Reload when page, search term or trigger changes
    Effect::new(move |_| {
        let _ = reload.get();
        let _ = page.get();
        let term = query.get();
        let request = pager.get_untracked().request();
        set_state.set(ViewState::Loading);

        let client = ctx.client();
        spawn_local(async move {
            match client.patients().list(request, Some(&term)).await {
                Ok(result) => {
                    set_pager.update(|p| *p = p.with_totals(&result));
                    set_state.set(ViewState::Loaded(result.data));
                }
                Err(e) => {
                    log::error!("Error loading patients: {}", e);
                    ctx.notify(Notice::from_error(&e, LOAD_FAILED));
                    set_state.set(ViewState::Failed(e.user_message(LOAD_FAILED)));
                }
            }
        });
    });

    let on_search = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        set_pager.update(|p| *p = p.reset());
        set_query.set(search.get_untracked().trim().to_string());
        set_reload.update(|v| *v += 1);
    };

    let new_patient = format!("{}/baru", PATIENTS);

    view! {
        <div class="patients-page">
            <div class="page-header">
                <div>
                    <h1 class="page-title">"Pasien"</h1>
                    <p class="page-subtitle">"Kelola catatan dan informasi pasien"</p>
                </div>
                <Link href=new_patient.clone() class="btn btn-primary">"+ Pasien Baru"</Link>
            </div>

            <div class="card">
                <form class="search-form" on:submit=on_search>
                    <input
                        type="text"
                        class="input"
                        placeholder="Cari berdasarkan nama, MRN, atau email..."
                        prop:value=move || search.get()
                        on:input=move |ev| set_search.set(event_target_value(&ev))
                    />
                    <button type="submit" class="btn btn-primary">"Cari"</button>
                </form>
            </div>

            <div class="card">
                {move || match state.get() {
                    ViewState::Idle | ViewState::Loading => view! { <Spinner /> }.into_any(),
                    ViewState::Failed(message) => view! {
                        <div class="empty-state"><p>{message}</p></div>
                    }.into_any(),
                    ViewState::Loaded(patients) if patients.is_empty() => view! {
                        <div class="empty-state">
                            <p>"Tidak ada pasien ditemukan"</p>
                            <Link href=new_patient.clone() class="card-link">"Buat pasien pertama Anda"</Link>
                        </div>
                    }.into_any(),
                    ViewState::Loaded(patients) => view! {
                        <table class="table">
                            <thead>
                                <tr>
                                    <th>"Pasien"</th>
                                    <th>"MRN"</th>
                                    <th>"Umur/Jenis Kelamin"</th>
                                    <th>"Kontak"</th>
                                    <th>"Status"</th>
                                    <th>"Aksi"</th>
                                </tr>
                            </thead>
                            <tbody>
                                {patients.into_iter().map(patient_row).collect_view()}
                            </tbody>
                        </table>
                        <PagerBar pager=pager set_pager=set_pager />
                    }.into_any(),
                }}
            </div>
        </div>
    }
}

fn patient_row(patient: Patient) -> impl IntoView {
    let status = patient.status.clone().unwrap_or_default();
    let href = format!("{}/{}", PATIENTS, patient.id);
    view! {
        <tr>
            <td>
                <div class="person-cell">
                    <span class="avatar">{patient.initials()}</span>
                    <div>
                        <div class="person-name">{patient.full_name()}</div>
                        <div class="person-sub">{patient.email.clone().unwrap_or_default()}</div>
                    </div>
                </div>
            </td>
            <td class="mono">{patient.mrn.clone().unwrap_or_else(|| MISSING.to_string())}</td>
            <td>
                <div>{age_label(patient.date_of_birth.as_deref())}</div>
                <div class="person-sub">{labels::label_opt(labels::GENDER, patient.gender.as_deref())}</div>
            </td>
            <td>{patient.phone_number.clone().unwrap_or_else(|| MISSING.to_string())}</td>
            <td><StatusBadge status=status.clone() label=status /></td>
            <td><Link href=href class="table-link">"Lihat"</Link></td>
        </tr>
    }
}
