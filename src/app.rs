//! Hospital EMR Frontend App
//!
//! Root component: builds the API client, restores the session, bridges
//! session changes into the store, and renders the route for the current
//! location inside its shell.

use std::sync::Arc;

use leptos::ev;
use leptos::prelude::*;
use leptos::task::spawn_local;
use reactive_stores::Store;

use emr_client::routes::{resolve, Shell};
use emr_client::{ApiClient, ClientConfig, Route, RouteDecision};

use crate::components::{Spinner, ToastHost};
use crate::context::AppContext;
use crate::layouts::{AuthLayout, MainLayout};
use crate::pages::{
    AppointmentsPage, CreateAppointmentPage, CreateEncounterPage, CreatePatientPage, DashboardPage,
    EncounterDetailPage, EncountersPage, LoginPage, NotFoundPage, PatientDetailPage, PatientsPage,
};
use crate::router;
use crate::storage::BrowserStorage;
use crate::store::{store_is_authenticated, store_set_session, AppState};

#[component]
pub fn App() -> impl IntoView {
    match ApiClient::new(ClientConfig::from_env(), Arc::new(BrowserStorage)) {
        Ok(client) => view! { <AppShell client=client /> }.into_any(),
        Err(e) => {
            log::error!("Failed to start API client: {}", e);
            view! {
                <div class="fatal-error">
                    <h1>"Hospital EMR"</h1>
                    <p>"Aplikasi gagal dimulai. Silakan muat ulang halaman."</p>
                </div>
            }
            .into_any()
        }
    }
}

#[component]
fn AppShell(client: ApiClient) -> impl IntoView {
    client.session().restore();

    let store = Store::new(AppState {
        session: client.session().snapshot(),
        ..Default::default()
    });
    provide_context(store);

    let ctx = AppContext::new(client.clone(), store, signal(router::current_location()));
    provide_context(ctx);

    // Mirror every session change (login, refresh, forced logout) into the store
    let mut changes = client.session().subscribe();
    spawn_local(async move {
        while changes.changed().await.is_ok() {
            let session = changes.borrow_and_update().clone();
            store_set_session(&store, session);
        }
    });

    // Back/forward buttons
    let _ = window_event_listener(ev::popstate, move |_| ctx.sync_location());

    let decision = Memo::new(move |_| resolve(&ctx.location.get(), store_is_authenticated(&store)));

    Effect::new(move |_| match decision.get() {
        RouteDecision::Redirect(target) => {
            log::debug!("Redirecting to {}", target);
            ctx.replace(&target);
        }
        RouteDecision::Render(route) => router::set_document_title(route.title()),
    });

    let route = Memo::new(move |_| match decision.get() {
        RouteDecision::Render(route) => Some(route),
        RouteDecision::Redirect(_) => None,
    });
    // Layouts stay mounted while only the page changes
    let shell = Memo::new(move |_| route.get().map(|r| r.shell()));

    view! {
        {move || match shell.get() {
            None => view! { <Spinner /> }.into_any(),
            Some(Shell::Auth) => view! { <AuthLayout>{move || render_page(route.get())}</AuthLayout> }.into_any(),
            Some(Shell::Main) => view! { <MainLayout>{move || render_page(route.get())}</MainLayout> }.into_any(),
            Some(Shell::Bare) => view! { {move || render_page(route.get())} }.into_any(),
        }}
        <ToastHost />
    }
}

fn render_page(route: Option<Route>) -> AnyView {
    let Some(route) = route else {
        return view! { <Spinner /> }.into_any();
    };
    match route {
        Route::Login => view! { <LoginPage /> }.into_any(),
        Route::Dashboard => view! { <DashboardPage /> }.into_any(),
        Route::Patients => view! { <PatientsPage /> }.into_any(),
        Route::NewPatient => view! { <CreatePatientPage /> }.into_any(),
        Route::PatientDetail { id } => view! { <PatientDetailPage id=id /> }.into_any(),
        Route::Encounters => view! { <EncountersPage /> }.into_any(),
        Route::NewEncounter { patient } => view! { <CreateEncounterPage patient=patient /> }.into_any(),
        Route::EncounterDetail { id } => view! { <EncounterDetailPage id=id /> }.into_any(),
        Route::Appointments => view! { <AppointmentsPage /> }.into_any(),
        Route::NewAppointment { patient } => view! { <CreateAppointmentPage patient=patient /> }.into_any(),
        Route::NotFound => view! { <NotFoundPage /> }.into_any(),
    }
}
