//! Not Found

use leptos::prelude::*;

use emr_client::routes::DASHBOARD;

use crate::components::Link;

#[component]
pub fn NotFoundPage() -> impl IntoView {
    view! {
        <div class="not-found">
            <h1 class="not-found-code">"404"</h1>
            <p class="not-found-text">"Halaman tidak ditemukan"</p>
            <Link href=DASHBOARD class="btn btn-primary">"Kembali ke Beranda"</Link>
        </div>
    }
}
