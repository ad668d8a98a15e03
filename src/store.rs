//! Global Application State Store
//!
//! Uses Leptos reactive_stores for fine-grained reactivity. The session
//! field mirrors the client's `SessionStore`; nothing else writes it.

use leptos::prelude::*;
use reactive_stores::Store;

use emr_client::session::SessionStatus;
use emr_client::{Notice, Session};

/// Global application state with field-level reactivity
#[derive(Clone, Debug, Default, Store)]
pub struct AppState {
    /// Snapshot of the signed-in user and tokens
    pub session: Session,
    /// Toasts currently on screen, oldest first
    pub notices: Vec<Notice>,
    /// Id handed to the next toast
    pub next_notice_id: u64,
}

/// Type alias for the store
pub type AppStore = Store<AppState>;

/// Get the app store from context
pub fn use_app_store() -> AppStore {
    expect_context::<AppStore>()
}

// ========================
// Store Helper Functions
// ========================

/// Replace the session snapshot
pub fn store_set_session(store: &AppStore, session: Session) {
    *store.session().write() = session;
}

pub fn store_is_authenticated(store: &AppStore) -> bool {
    store.session().with(|s| s.status() == SessionStatus::Authenticated)
}

/// Add a toast, returning the id it was given
pub fn store_push_notice(store: &AppStore, notice: Notice) -> u64 {
    let id = store.next_notice_id().get_untracked() + 1;
    *store.next_notice_id().write() = id;
    store.notices().write().push(notice.with_id(id));
    id
}

/// Remove a toast by id
pub fn store_dismiss_notice(store: &AppStore, id: u64) {
    store.notices().write().retain(|n| n.id != id);
}
