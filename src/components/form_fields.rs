//! Form Field Components
//!
//! Labelled inputs bound to one field of a page's form signal, with the
//! validation message for that field underneath.

use leptos::prelude::*;

use emr_client::forms::FieldErrors;
use emr_client::labels::LabelTable;

use super::FieldError;

fn label_text(label: &'static str, required: bool) -> String {
    if required {
        format!("{} *", label)
    } else {
        label.to_string()
    }
}

#[component]
pub fn TextInput(
    label: &'static str,
    /// Key into `errors`
    name: &'static str,
    value: Signal<String>,
    #[prop(into)] on_input: Callback<String>,
    #[prop(default = "text")] input_type: &'static str,
    #[prop(optional)] placeholder: &'static str,
    #[prop(optional)] required: bool,
    #[prop(optional)] step: Option<&'static str>,
    #[prop(optional)] errors: Option<ReadSignal<FieldErrors>>,
) -> impl IntoView {
    let invalid = move || errors.map_or(false, |e| e.with(|e| e.contains(name)));
    view! {
        <div class="form-field">
            <label class="form-label" for=name>{label_text(label, required)}</label>
            <input
                id=name
                name=name
                type=input_type
                step=step
                class=move || if invalid() { "input input-invalid" } else { "input" }
                placeholder=placeholder
                prop:value=move || value.get()
                on:input=move |ev| on_input.run(event_target_value(&ev))
            />
            {errors.map(|errors| view! { <FieldError errors=errors field=name /> })}
        </div>
    }
}

#[component]
pub fn TextArea(
    label: &'static str,
    name: &'static str,
    value: Signal<String>,
    #[prop(into)] on_input: Callback<String>,
    #[prop(default = 3)] rows: u32,
    #[prop(optional)] placeholder: &'static str,
    #[prop(optional)] required: bool,
    #[prop(optional)] errors: Option<ReadSignal<FieldErrors>>,
) -> impl IntoView {
    view! {
        <div class="form-field">
            <label class="form-label" for=name>{label_text(label, required)}</label>
            <textarea
                id=name
                name=name
                class="input"
                rows=rows
                placeholder=placeholder
                prop:value=move || value.get()
                on:input=move |ev| on_input.run(event_target_value(&ev))
            ></textarea>
            {errors.map(|errors| view! { <FieldError errors=errors field=name /> })}
        </div>
    }
}

/// Select over a code → label table; `placeholder` adds an empty first option
#[component]
pub fn SelectInput(
    label: &'static str,
    name: &'static str,
    options: LabelTable,
    value: Signal<String>,
    #[prop(into)] on_change: Callback<String>,
    #[prop(optional)] placeholder: Option<&'static str>,
    #[prop(optional)] required: bool,
    #[prop(optional)] errors: Option<ReadSignal<FieldErrors>>,
) -> impl IntoView {
    view! {
        <div class="form-field">
            <label class="form-label" for=name>{label_text(label, required)}</label>
            <select
                id=name
                name=name
                class="input"
                prop:value=move || value.get()
                on:change=move |ev| on_change.run(event_target_value(&ev))
            >
                {placeholder.map(|text| view! { <option value="">{text}</option> })}
                {options.iter().map(|(code, text)| {
                    let code = *code;
                    view! {
                        <option value=code selected=move || value.get() == code>{*text}</option>
                    }
                }).collect_view()}
            </select>
            {errors.map(|errors| view! { <FieldError errors=errors field=name /> })}
        </div>
    }
}
