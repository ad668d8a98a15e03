//! Delete Confirm Button Component
//!
//! Delete button that asks for confirmation in a modal before running.

use leptos::prelude::*;

/// Delete button with a confirmation modal
///
/// # Arguments
/// * `label` - Text of the button that opens the modal
/// * `message` - Body text of the modal
/// * `busy` - True while the delete request is in flight; disables both modal buttons
/// * `on_confirm` - Callback to execute when the user confirms deletion
#[component]
pub fn DeleteConfirmButton(
    #[prop(into)] label: String,
    #[prop(into)] message: String,
    #[prop(into)] busy: Signal<bool>,
    #[prop(into)] on_confirm: Callback<()>,
) -> impl IntoView {
    let (confirm_delete, set_confirm_delete) = signal(false);

    // Close once the request settles
    Effect::new(move |was_busy: Option<bool>| {
        let now = busy.get();
        if was_busy == Some(true) && !now {
            set_confirm_delete.set(false);
        }
        now
    });

    view! {
        <button
            class="btn btn-danger"
            on:click=move |ev| {
                ev.stop_propagation();
                set_confirm_delete.set(true);
            }
        >
            {label}
        </button>
        <Show when=move || confirm_delete.get()>
            <div class="modal-backdrop">
                <div class="modal">
                    <h3 class="modal-title">"Konfirmasi Hapus"</h3>
                    <p class="modal-body">{message.clone()}</p>
                    <div class="modal-actions">
                        <button
                            class="btn btn-secondary"
                            disabled=move || busy.get()
                            on:click=move |ev| {
                                ev.stop_propagation();
                                set_confirm_delete.set(false);
                            }
                        >
                            "Batal"
                        </button>
                        <button
                            class="btn btn-danger"
                            disabled=move || busy.get()
                            on:click=move |ev| {
                                ev.stop_propagation();
                                on_confirm.run(());
                            }
                        >
                            {move || if busy.get() { "Menghapus..." } else { "Hapus" }}
                        </button>
                    </div>
                </div>
            </div>
        </Show>
    }
}
