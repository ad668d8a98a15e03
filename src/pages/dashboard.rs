//! Dashboard Page
//!
//! Three counters and two short lists, loaded once on mount.

use leptos::prelude::*;
use leptos::task::spawn_local;

use emr_client::format::{time_of_day, today_input};
use emr_client::labels;
use emr_client::routes::{APPOINTMENTS, ENCOUNTERS, PATIENTS};
use emr_client::services::{load_dashboard, DashboardSummary};
use emr_client::ViewState;

use crate::components::{Link, Spinner, StatusBadge};
use crate::context::use_app_context;

#[component]
pub fn DashboardPage() -> impl IntoView {
    let ctx = use_app_context();
    let (state, set_state) = signal(ViewState::<DashboardSummary>::Loading);

    // Load on mount
    Effect::new(move |_| {
        let client = ctx.client();
        spawn_local(async move {
            let result = load_dashboard(&client, &today_input()).await;
            if let Err(e) = &result {
                log::error!("Error loading dashboard data: {}", e);
            }
            set_state.set(ViewState::from_result(result, "Gagal memuat data dashboard"));
        });
    });

    view! {
        <div class="dashboard-page">
            <div class="page-header">
                <div>
                    <h1 class="page-title">"Dashboard Overview"</h1>
                    <p class="page-subtitle">"Ringkasan aktivitas rumah sakit hari ini."</p>
                </div>
                <Link href=format!("{}/baru", PATIENTS) class="btn btn-primary">"+ Pasien Baru"</Link>
            </div>

            {move || match state.get() {
                ViewState::Idle | ViewState::Loading => view! { <Spinner /> }.into_any(),
                ViewState::Failed(message) => view! {
                    <div class="card empty-state">
                        <p>{message}</p>
                    </div>
                }.into_any(),
                ViewState::Loaded(summary) => dashboard_body(summary).into_any(),
            }}
        </div>
    }
}

fn stat_card(label: &'static str, value: u64, href: &'static str) -> impl IntoView {
    view! {
        <Link href=href class="card stat-card">
            <p class="stat-label">{label}</p>
            <p class="stat-value">{value}</p>
        </Link>
    }
}

fn dashboard_body(summary: DashboardSummary) -> impl IntoView {
    let DashboardSummary {
        total_patients,
        today_appointments,
        active_encounters,
        recent_patients,
        appointments_today,
    } = summary;

    let patients_view = if recent_patients.is_empty() {
        view! {
            <tr>
                <td colspan="3" class="empty-cell">"Tidak ada data pasien terbaru"</td>
            </tr>
        }.into_any()
    } else {
        recent_patients.into_iter().map(|patient| {
            let href = format!("{}/{}", PATIENTS, patient.id);
            let initials = patient.initials();
            let full_name = patient.full_name();
            view! {
                <tr>
                    <td>
                        <Link href=href class="person-cell">
                            <span class="avatar">{initials}</span>
                            <span>{full_name}</span>
                        </Link>
                    </td>
                    <td class="mono">{patient.mrn.clone().unwrap_or_default()}</td>
                    <td>{labels::label_opt(labels::GENDER, patient.gender.as_deref())}</td>
                </tr>
            }
        }).collect_view().into_any()
    };

    let appointments_view = if appointments_today.is_empty() {
        view! {
            <div class="empty-state">
                <p>"Tidak ada janji temu untuk hari ini"</p>
            </div>
        }.into_any()
    } else {
        appointments_today.into_iter().map(|appointment| {
            let patient = appointment.patient.as_ref().map(|p| p.full_name()).unwrap_or_default();
            view! {
                <div class="appointment-row">
                    <div>
                        <p class="appointment-patient">{patient}</p>
                        <p class="appointment-time">{time_of_day(appointment.start_time.as_deref())}</p>
                    </div>
                    <StatusBadge
                        status=appointment.status.clone()
                        label=labels::appointment_status(&appointment.status).to_string()
                    />
                </div>
            }
        }).collect_view().into_any()
    };

    view! {
        <div class="stat-grid">
            {stat_card("Total Pasien", total_patients, PATIENTS)}
            {stat_card("Janji Temu Hari Ini", today_appointments, APPOINTMENTS)}
            {stat_card("Kunjungan Aktif", active_encounters, ENCOUNTERS)}
        </div>

        <div class="dashboard-panels">
            <div class="card">
                <div class="card-header">
                    <h2 class="card-title">"Pasien Terbaru"</h2>
                    <Link href=PATIENTS class="card-link">"Lihat semua"</Link>
                </div>
                <table class="table">
                    <thead>
                        <tr>
                            <th>"Pasien"</th>
                            <th>"MRN"</th>
                            <th>"Jenis Kelamin"</th>
                        </tr>
                    </thead>
                    <tbody>{patients_view}</tbody>
                </table>
            </div>

            <div class="card">
                <div class="card-header">
                    <h2 class="card-title">"Janji Temu Hari Ini"</h2>
                    <Link href=APPOINTMENTS class="card-link">"Lihat semua"</Link>
                </div>
                <div class="appointment-list">{appointments_view}</div>
            </div>
        </div>
    }
}
