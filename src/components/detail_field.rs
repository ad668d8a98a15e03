//! Detail Field Component

use leptos::prelude::*;

/// Label over value, as used in the detail cards
#[component]
pub fn DetailField(
    label: &'static str,
    #[prop(into)] value: String,
) -> impl IntoView {
    view! {
        <div class="detail-field">
            <dt class="detail-label">{label}</dt>
            <dd class="detail-value">{value}</dd>
        </div>
    }
}
