//! Field Error Component
//!
//! Message under an input, taken from the form's `FieldErrors`.

use leptos::prelude::*;

use emr_client::forms::FieldErrors;

#[component]
pub fn FieldError(
    errors: ReadSignal<FieldErrors>,
    field: &'static str,
) -> impl IntoView {
    move || {
        errors.with(|e| e.get(field).map(str::to_string)).map(|message| view! {
            <p class="field-error">{message}</p>
        })
    }
}
