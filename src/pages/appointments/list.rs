//! Appointment List
//!
//! Filtered by day (today by default) and status. Check-in and cancel act
//! on one row and then refetch the page.

use leptos::prelude::*;
use leptos::task::spawn_local;

use emr_client::format::{time_of_day, today_input};
use emr_client::forms::cancel_reason;
use emr_client::labels::{self, APPOINTMENT_STATUS};
use emr_client::models::Appointment;
use emr_client::routes::Route;
use emr_client::services::AppointmentFilter;
use emr_client::{Notice, Pager, ViewState};

use crate::components::{Link, PagerBar, Spinner, StatusBadge};
use crate::context::use_app_context;
use crate::router;

const LOAD_FAILED: &str = "Gagal memuat janji temu";

/// Row action picked from the table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RowAction {
    CheckIn,
    Cancel,
}

#[component]
pub fn AppointmentsPage() -> impl IntoView {
    let ctx = use_app_context();

    let (date, set_date) = signal(today_input());
    let (status_filter, set_status_filter) = signal(String::new());
    let (reload, set_reload) = signal(0u32);
    let (pager, set_pager) = signal(Pager::default());
    let (state, set_state) = signal(ViewState::<Vec<Appointment>>::Loading);

    let page = Memo::new(move |_| pager.get().page);

    Effect::new(move |_| {
        let _ = reload.get();
        let _ = page.get();
        let filter = AppointmentFilter {
            status: Some(status_filter.get()).filter(|s| !s.is_empty()),
            date: Some(date.get()).filter(|d| !d.is_empty()),
            ..Default::default()
        };
        let request = pager.get_untracked().request();
        set_state.set(ViewState::Loading);

        let client = ctx.client();
        spawn_local(async move {
            match client.appointments().list(request, &filter).await {
                Ok(result) => {
                    set_pager.update(|p| *p = p.with_totals(&result));
                    set_state.set(ViewState::Loaded(result.data));
                }
                Err(e) => {
                    log::error!("Error loading appointments: {}", e);
                    ctx.notify(Notice::from_error(&e, LOAD_FAILED));
                    set_state.set(ViewState::Failed(e.user_message(LOAD_FAILED)));
                }
            }
        });
    });

    let on_action = move |id: String, action: RowAction| {
        let client = ctx.client();
        match action {
            RowAction::CheckIn => spawn_local(async move {
                match client.appointments().check_in(&id).await {
                    Ok(_) => {
                        ctx.success("Pasien berhasil check in");
                        set_reload.update(|n| *n += 1);
                    }
                    Err(e) => {
                        log::error!("Error checking in appointment {}: {}", id, e);
                        ctx.notify(Notice::from_error(&e, "Gagal check in"));
                    }
                }
            }),
            RowAction::Cancel => {
                // Dismissed or blank prompt does nothing
                let Ok(reason) = cancel_reason(router::prompt("Masukkan alasan pembatalan:").as_deref()) else {
                    return;
                };
                spawn_local(async move {
                    match client.appointments().cancel(&id, &reason).await {
                        Ok(_) => {
                            ctx.success("Janji temu berhasil dibatalkan");
                            set_reload.update(|n| *n += 1);
                        }
                        Err(e) => {
                            log::error!("Error cancelling appointment {}: {}", id, e);
                            ctx.notify(Notice::from_error(&e, "Gagal membatalkan janji temu"));
                        }
                    }
                });
            }
        }
    };

    let new_appointment = Route::NewAppointment { patient: None }.path();

    view! {
        <div class="appointments-page">
            <div class="page-header">
                <div>
                    <h1 class="page-title">"Janji Temu"</h1>
                    <p class="page-subtitle">"Kelola janji temu dan penjadwalan pasien"</p>
                </div>
                <Link href=new_appointment.clone() class="btn btn-primary">"+ Janji Temu Baru"</Link>
            </div>

            <div class="card">
                <div class="filter-row">
                    <div class="form-field">
                        <label class="form-label" for="date-filter">"Tanggal"</label>
                        <input
                            id="date-filter"
                            type="date"
                            class="input"
                            prop:value=move || date.get()
                            on:change=move |ev| {
                                set_pager.update(|p| *p = p.reset());
                                set_date.set(event_target_value(&ev));
                            }
                        />
                    </div>
                    <div class="form-field">
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
                            {APPOINTMENT_STATUS.iter().map(|(code, text)| view! {
                                <option value=*code>{*text}</option>
                            }).collect_view()}
                        </select>
                    </div>
                </div>
            </div>

            <div class="card">
                {move || match state.get() {
                    ViewState::Idle | ViewState::Loading => view! { <Spinner /> }.into_any(),
                    ViewState::Failed(message) => view! {
                        <div class="empty-state"><p>{message}</p></div>
                    }.into_any(),
                    ViewState::Loaded(appointments) if appointments.is_empty() => view! {
                        <div class="empty-state">
                            <p>"Tidak ada janji temu ditemukan"</p>
                            <Link href=new_appointment.clone() class="card-link">"Jadwalkan janji temu"</Link>
                        </div>
                    }.into_any(),
                    ViewState::Loaded(appointments) => view! {
                        <table class="table">
                            <thead>
                                <tr>
                                    <th>"Waktu"</th>
                                    <th>"Pasien"</th>
                                    <th>"Dokter"</th>
                                    <th>"Tipe"</th>
                                    <th>"Status"</th>
                                    <th class="align-right">"Aksi"</th>
                                </tr>
                            </thead>
                            <tbody>
                                {appointments.into_iter().map(|a| appointment_row(a, on_action)).collect_view()}
                            </tbody>
                        </table>
                        <PagerBar pager=pager set_pager=set_pager />
                    }.into_any(),
                }}
            </div>
        </div>
    }
}

fn appointment_row(
    appointment: Appointment,
    on_action: impl Fn(String, RowAction) + Copy + 'static,
) -> impl IntoView {
    let (patient, mrn, initials) = match &appointment.patient {
        Some(p) => (
            p.full_name(),
            p.mrn.clone().unwrap_or_default(),
            [&p.first_name, &p.last_name]
                .iter()
                .filter_map(|n| n.chars().next())
                .flat_map(char::to_uppercase)
                .collect::<String>(),
        ),
        None => Default::default(),
    };
    let provider = appointment.provider.as_ref().map(|p| p.full_name()).unwrap_or_default();
    let duration = appointment.duration.map(|d| format!("{} mnt", d)).unwrap_or_default();
    let check_in_id = appointment.id.clone();
    let cancel_id = appointment.id.clone();
    let status_label = labels::appointment_status(&appointment.status).to_string();

    view! {
        <tr>
            <td>
                <div class="person-name">{time_of_day(appointment.start_time.as_deref())}</div>
                <div class="person-sub">{duration}</div>
            </td>
            <td>
                <div class="person-cell">
                    <span class="avatar">{initials}</span>
                    <div>
                        <div class="person-name">{patient}</div>
                        <div class="person-sub">{mrn}</div>
                    </div>
                </div>
            </td>
            <td>{provider}</td>
            <td>{labels::appointment_type(&appointment.appointment_type).to_string()}</td>
            <td><StatusBadge status=appointment.status.clone() label=status_label /></td>
            <td class="align-right">
                <div class="row-actions">
                    {appointment.can_check_in().then(|| view! {
                        <button class="link-button text-success"
                            on:click=move |_| on_action(check_in_id.clone(), RowAction::CheckIn)>
                            "Check In"
                        </button>
                    })}
                    {appointment.can_cancel().then(|| view! {
                        <button class="link-button text-danger"
                            on:click=move |_| on_action(cancel_id.clone(), RowAction::Cancel)>
                            "Batal"
                        </button>
                    })}
                </div>
            </td>
        </tr>
    }
}
