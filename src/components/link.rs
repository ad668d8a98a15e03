//! Link Component
//!
//! Anchor that navigates through the history router instead of reloading.

use leptos::prelude::*;

use crate::context::use_app_context;

#[component]
pub fn Link(
    #[prop(into)] href: String,
    #[prop(into, optional)] class: String,
    children: Children,
) -> impl IntoView {
    let ctx = use_app_context();
    let target = href.clone();

    view! {
        <a
            href=href
            class=class
            on:click=move |ev: web_sys::MouseEvent| {
                // Let modified clicks open a new tab
                if ev.ctrl_key() || ev.meta_key() || ev.shift_key() || ev.button() != 0 {
                    return;
                }
                ev.prevent_default();
                ctx.navigate(&target);
            }
        >
            {children()}
        </a>
    }
}
