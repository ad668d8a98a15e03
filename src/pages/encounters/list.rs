//! Encounter List
//!
//! Paged table filtered by status. The status column is an inline select
//! that writes through to the server and patches the row in place.

use leptos::prelude::*;
use leptos::task::spawn_local;

use emr_client::format::short_date;
use emr_client::labels::{self, ENCOUNTER_STATUS};
use emr_client::models::Encounter;
use emr_client::routes::{Route, ENCOUNTERS};
use emr_client::services::EncounterFilter;
use emr_client::{Notice, Pager, ViewState};

use crate::components::{Link, PagerBar, Spinner};
use crate::context::use_app_context;

const LOAD_FAILED: &str = "Gagal memuat kunjungan";

#[component]
pub fn EncountersPage() -> impl IntoView {
    let ctx = use_app_context();

    let (status_filter, set_status_filter) = signal(String::new());
    let (pager, set_pager) = signal(Pager::default());
    let (state, set_state) = signal(ViewState::<Vec<Encounter>>::Loading);

    let page = Memo::new(move |_| pager.get().page);

    Effect::new(move |_| {
        let _ = page.get();
        let status = status_filter.get();
        let request = pager.get_untracked().request();
        set_state.set(ViewState::Loading);

        let filter = if status.is_empty() {
            EncounterFilter::default()
        } else {
            EncounterFilter::status(status)
        };
        let client = ctx.client();
        spawn_local(async move {
            match client.encounters().list(request, &filter).await {
                Ok(result) => {
                    set_pager.update(|p| *p = p.with_totals(&result));
                    set_state.set(ViewState::Loaded(result.data));
                }
                Err(e) => {
                    log::error!("Error loading encounters: {}", e);
                    ctx.notify(Notice::from_error(&e, LOAD_FAILED));
                    set_state.set(ViewState::Failed(e.user_message(LOAD_FAILED)));
                }
            }
        });
    });

    let on_status_change = move |id: String, status: String| {
        let client = ctx.client();
        spawn_local(async move {
            match client.encounters().update_status(&id, &status).await {
                Ok(_) => {
                    set_state.update(|state| {
                        if let ViewState::Loaded(rows) = state {
                            if let Some(row) = rows.iter_mut().find(|e| e.id == id) {
                                row.status = status;
                            }
                        }
                    });
                    ctx.success("Status kunjungan berhasil diperbarui");
                }
                Err(e) => {
                    log::error!("Error updating encounter {}: {}", id, e);
                    ctx.notify(Notice::from_error(&e, "Gagal memperbarui status"));
                }
            }
        });
    };

    let new_encounter = Route::NewEncounter { patient: None }.path();

    view! {
        <div class="encounters-page">
            <div class="page-header">
                <div>
                    <h1 class="page-title">"Kunjungan"</h1>
                    <p class="page-subtitle">"Kelola kunjungan klinis dan visit"</p>
                </div>
                <Link href=new_encounter.clone() class="btn btn-primary">"+ Kunjungan Baru"</Link>
            </div>

            <div class="card">
                <div class="filter-row">
                    <label class="form-label" for="status-filter">"Status"</label>
                    <select
                        id="status-filter"
                        class="input"
                        prop:value=move || status_filter.get()
                        on:change=move |ev| {
                            set_pager.update(|p| *p = p.reset());
                            set_status_filter.set(event_target_value(&ev));
                        }
                    >
                        <option value="">"Semua Status"</option>
                        {ENCOUNTER_STATUS.iter().map(|(code, text)| view! {
                            <option value=*code>{*text}</option>
                        }).collect_view()}
                    </select>
                </div>
            </div>

            <div class="card">
                {move || match state.get() {
                    ViewState::Idle | ViewState::Loading => view! { <Spinner /> }.into_any(),
                    ViewState::Failed(message) => view! {
                        <div class="empty-state"><p>{message}</p></div>
                    }.into_any(),
                    ViewState::Loaded(encounters) if encounters.is_empty() => view! {
                        <div class="empty-state">
                            <p>"Tidak ada kunjungan ditemukan"</p>
                            <Link href=new_encounter.clone() class="card-link">"Buat kunjungan pertama Anda"</Link>
                        </div>
                    }.into_any(),
                    ViewState::Loaded(encounters) => view! {
                        <table class="table">
                            <thead>
                                <tr>
                                    <th>"No. Kunjungan"</th>
                                    <th>"Pasien"</th>
                                    <th>"Dokter"</th>
                                    <th>"Tipe"</th>
                                    <th>"Tanggal Masuk"</th>
                                    <th>"Status"</th>
                                    <th>"Aksi"</th>
                                </tr>
                            </thead>
                            <tbody>
                                {encounters.into_iter().map(|encounter| {
                                    encounter_row(encounter, on_status_change)
                                }).collect_view()}
                            </tbody>
                        </table>
                        <PagerBar pager=pager set_pager=set_pager />
                    }.into_any(),
                }}
            </div>
        </div>
    }
}

fn encounter_row(
    encounter: Encounter,
    on_status_change: impl Fn(String, String) + Copy + 'static,
) -> impl IntoView {
    let id = encounter.id.clone();
    let href = format!("{}/{}", ENCOUNTERS, encounter.id);
    let number = encounter.encounter_number.clone().unwrap_or_else(|| encounter.id.clone());
    let patient = encounter.patient.as_ref().map(|p| p.full_name()).unwrap_or_default();
    let mrn = encounter.patient.as_ref().and_then(|p| p.mrn.clone()).unwrap_or_default();
    let provider = encounter.provider.as_ref().map(|p| p.full_name()).unwrap_or_default();
    let current = encounter.status.clone();

    view! {
        <tr>
            <td class="mono">{number}</td>
            <td>
                <div class="person-name">{patient}</div>
                <div class="person-sub">{mrn}</div>
            </td>
            <td>{provider}</td>
            <td>{labels::encounter_type(&encounter.encounter_type).to_string()}</td>
            <td>{short_date(encounter.admission_date.as_deref())}</td>
            <td>
                <select
                    class=format!("input input-sm badge-{}", labels::status_tone(&current))
                    on:change=move |ev| on_status_change(id.clone(), event_target_value(&ev))
                >
                    {ENCOUNTER_STATUS.iter().map(|(code, text)| {
                        let selected = *code == current;
                        view! { <option value=*code selected=selected>{*text}</option> }
                    }).collect_view()}
                </select>
            </td>
            <td><Link href=href class="table-link">"Detail"</Link></td>
        </tr>
    }
}
