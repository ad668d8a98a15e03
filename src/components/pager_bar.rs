//! Pager Bar Component
//!
//! "Menampilkan X sampai Y dari Z hasil" with previous/next buttons.

use leptos::prelude::*;

use emr_client::Pager;

#[component]
pub fn PagerBar(
    pager: ReadSignal<Pager>,
    set_pager: WriteSignal<Pager>,
) -> impl IntoView {
    view! {
        <div class="pager">
            <div class="pager-summary">{move || pager.get().summary()}</div>
            <div class="pager-buttons">
                <button
                    class="btn btn-secondary"
                    disabled=move || !pager.get().has_previous()
                    on:click=move |_| set_pager.update(|p| *p = p.previous())
                >
                    "Sebelumnya"
                </button>
                <button
                    class="btn btn-secondary"
                    disabled=move || !pager.get().has_next()
                    on:click=move |_| set_pager.update(|p| *p = p.next())
                >
                    "Selanjutnya"
                </button>
            </div>
        </div>
    }
}
