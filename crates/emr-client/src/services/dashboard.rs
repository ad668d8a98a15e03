use super::{AppointmentFilter, EncounterFilter, PageRequest};
use crate::error::ApiResult;
use crate::http::ApiClient;
use crate::models::{Appointment, Patient};

const RECENT_PATIENTS: u32 = 5;
const TODAY_APPOINTMENTS: u32 = 10;

/// Numbers and short lists for the landing page
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DashboardSummary {
    pub total_patients: u64,
    pub today_appointments: u64,
    pub active_encounters: u64,
    pub recent_patients: Vec<Patient>,
    pub appointments_today: Vec<Appointment>,
}

/// Three sequential list calls; the first failure aborts the rest.
/// `today` is `YYYY-MM-DD`.
pub async fn load_dashboard(client: &ApiClient, today: &str) -> ApiResult<DashboardSummary> {
    let patients = client.patients().list(PageRequest::first(RECENT_PATIENTS), None).await?;
    let appointments = client
        .appointments()
        .list(PageRequest::first(TODAY_APPOINTMENTS), &AppointmentFilter::on_date(today))
        .await?;
    // Only the total is needed
    let encounters = client
        .encounters()
        .list(PageRequest::first(1), &EncounterFilter::status("in_progress"))
        .await?;

    Ok(DashboardSummary {
        total_patients: patients.total,
        today_appointments: appointments.total,
        active_encounters: encounters.total,
        recent_patients: patients.data,
        appointments_today: appointments.data,
    })
}
