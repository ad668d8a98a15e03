//! Main Layout
//!
//! Sidebar navigation, user block with logout, and a top bar showing the
//! current section and today's date.

use leptos::prelude::*;
use leptos::task::spawn_local;

use emr_client::format::{indonesian_date, today};
use emr_client::routes::{is_active, NAV_ITEMS, LOGIN};

use crate::components::Link;
use crate::context::use_app_context;
use crate::store::{use_app_store, AppStateStoreFields};

/// Path part of a location, for highlighting nav entries
fn path_of(location: &str) -> String {
    location.split(['?', '#']).next().unwrap_or_default().to_string()
}

#[component]
pub fn MainLayout(children: Children) -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();
    let (sidebar_open, set_sidebar_open) = signal(false);
    let (signing_out, set_signing_out) = signal(false);

    let current_path = Memo::new(move |_| path_of(&ctx.location.get()));
    let section = move || {
        let path = current_path.get();
        NAV_ITEMS
            .iter()
            .find(|item| is_active(&path, item.href))
            .map(|item| item.label)
            .unwrap_or("Hospital EMR")
    };

    let user_initials = move || store.session().with(|s| s.user.as_ref().map(|u| u.initials()).unwrap_or_default());
    let user_name = move || store.session().with(|s| s.user.as_ref().map(|u| u.full_name()).unwrap_or_default());
    let user_email = move || store.session().with(|s| s.user.as_ref().map(|u| u.email.clone()).unwrap_or_default());

    let logout = move |_| {
        if signing_out.get() {
            return;
        }
        set_signing_out.set(true);
        let client = ctx.client();
        spawn_local(async move {
            client.session().logout().await;
            set_signing_out.set(false);
            ctx.sync_session();
            ctx.navigate(LOGIN);
        });
    };

    view! {
        <div class="main-layout">
            <Show when=move || sidebar_open.get()>
                <div class="sidebar-backdrop" on:click=move |_| set_sidebar_open.set(false)></div>
            </Show>

            <aside class=move || if sidebar_open.get() { "sidebar open" } else { "sidebar" }>
                <div class="sidebar-brand">
                    <div class="brand-mark">"H"</div>
                    <span class="brand-name">"Hospital"<span class="brand-accent">"EMR"</span></span>
                    <button class="sidebar-close" on:click=move |_| set_sidebar_open.set(false)>"×"</button>
                </div>

                <nav class="sidebar-nav">
                    <div class="nav-heading">"Menu Utama"</div>
                    {NAV_ITEMS.iter().map(|item| {
                        let href = item.href;
                        view! {
                            <div
                                class=move || if is_active(&current_path.get(), href) { "nav-item active" } else { "nav-item" }
                                on:click=move |_| set_sidebar_open.set(false)
                            >
                                <Link href=href>
                                    <span class=format!("icon icon-{}", item.icon)></span>
                                    {item.label}
                                </Link>
                            </div>
                        }
                    }).collect_view()}
                </nav>

                <div class="sidebar-user">
                    <div class="user-avatar">{user_initials}</div>
                    <div class="user-meta">
                        <p class="user-name">{user_name}</p>
                        <p class="user-email">{user_email}</p>
                    </div>
                    <button class="logout-btn" disabled=move || signing_out.get() on:click=logout>
                        <span class="icon icon-log-out"></span>
                        "Keluar"
                    </button>
                </div>
            </aside>

            <div class="main-column">
                <header class="top-bar">
                    <button class="menu-btn" on:click=move |_| set_sidebar_open.set(true)>"☰"</button>
                    <h2 class="section-title">{section}</h2>
                    <span class="today">{indonesian_date(today())}</span>
                </header>
                <main class="page-content">
                    {children()}
                </main>
            </div>
        </div>
    }
}
