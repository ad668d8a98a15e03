//! Auth Layout
//!
//! Centered card with the product name, used by the login page.

use leptos::prelude::*;

#[component]
pub fn AuthLayout(children: Children) -> impl IntoView {
    view! {
        <div class="auth-layout">
            <div class="auth-card">
                <div class="auth-brand">
                    <h1 class="auth-title">"Hospital EMR"</h1>
                    <p class="auth-subtitle">"Electronic Medical Record System"</p>
                </div>
                {children()}
            </div>
        </div>
    }
}
