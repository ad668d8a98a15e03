//! Status Badge Component

use leptos::prelude::*;

use emr_client::labels::status_tone;

/// Colored pill for a status code; `label` is the translated text
#[component]
pub fn StatusBadge(
    #[prop(into)] status: String,
    #[prop(into)] label: String,
) -> impl IntoView {
    let class = format!("badge badge-{}", status_tone(&status));
    view! { <span class=class>{label}</span> }
}
