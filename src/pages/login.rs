//! Login Page
//!
//! E-mail and password form. Field rules run before the request; a
//! rejected login keeps the form and shows the server's message.

use leptos::prelude::*;
use leptos::task::spawn_local;

use emr_client::forms::{FieldErrors, LoginForm};
use emr_client::routes::DASHBOARD;
use emr_client::{LoginOutcome, Submission};

use crate::components::FieldError;
use crate::context::use_app_context;

#[component]
pub fn LoginPage() -> impl IntoView {
    let ctx = use_app_context();

    let (email, set_email) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (show_password, set_show_password) = signal(false);
    let (submission, set_submission) = signal(Submission::Idle);
    let (errors, set_errors) = signal(FieldErrors::new());

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        if submission.get_untracked().is_submitting() {
            return;
        }
        let form = LoginForm {
            email: email.get_untracked(),
            password: password.get_untracked(),
        };
        if let Err(field_errors) = form.validate() {
            set_errors.set(field_errors);
            return;
        }
        set_errors.set(FieldErrors::new());
        set_submission.set(Submission::Submitting);

        let client = ctx.client();
        spawn_local(async move {
            let result = client.session().login(form.email.trim(), &form.password).await;
            set_submission.set(Submission::Idle);
            match result {
                Ok(LoginOutcome::Authenticated) => {
                    ctx.sync_session();
                    ctx.success("Login berhasil!");
                    ctx.navigate(DASHBOARD);
                }
                Ok(LoginOutcome::Rejected { message }) => ctx.error(message),
                Err(e) => {
                    log::error!("Login request failed: {}", e);
                    ctx.error("Terjadi kesalahan. Silakan coba lagi.");
                }
            }
        });
    };

    view! {
        <div class="login-page">
            <h2 class="login-title">"Masuk"</h2>
            <form class="login-form" on:submit=on_submit>
                <div class="form-field">
                    <label class="form-label" for="email">"Alamat Email"</label>
                    <input
                        id="email"
                        type="email"
                        class=move || if errors.with(|e| e.contains("email")) { "input input-invalid" } else { "input" }
                        placeholder="admin@hospital-emr.com"
                        prop:value=move || email.get()
                        on:input=move |ev| set_email.set(event_target_value(&ev))
                    />
                    <FieldError errors=errors field="email" />
                </div>

                <div class="form-field">
                    <label class="form-label" for="password">"Kata Sandi"</label>
                    <div class="password-row">
                        <input
                            id="password"
                            type=move || if show_password.get() { "text" } else { "password" }
                            class=move || if errors.with(|e| e.contains("password")) { "input input-invalid" } else { "input" }
                            placeholder="••••••••"
                            prop:value=move || password.get()
                            on:input=move |ev| set_password.set(event_target_value(&ev))
                        />
                        <button
                            type="button"
                            class="password-toggle"
                            on:click=move |_| set_show_password.update(|v| *v = !*v)
                        >
                            {move || if show_password.get() { "Sembunyikan" } else { "Tampilkan" }}
                        </button>
                    </div>
                    <FieldError errors=errors field="password" />
                </div>

                <button type="submit" class="btn btn-primary btn-block" disabled=move || submission.get().is_submitting()>
                    {move || if submission.get().is_submitting() { "Masuk..." } else { "Masuk" }}
                </button>
            </form>

            <div class="demo-credentials">
                <p class="demo-title">"Kredensial Demo:"</p>
                <p>"Admin: admin@hospital-emr.com / password123"</p>
                <p>"Dokter: doctor@hospital-emr.com / password123"</p>
            </div>
        </div>
    }
}
