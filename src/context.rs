//! Application Context
//!
//! Shared handles provided via Leptos Context API: the API client, the
//! current location, and toast dispatch.

use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;

use emr_client::{ApiClient, Notice};

use crate::router;
use crate::store::{store_dismiss_notice, store_push_notice, store_set_session, AppStore};

/// App-wide handles provided via context
#[derive(Clone, Copy)]
pub struct AppContext {
    client: StoredValue<ApiClient, LocalStorage>,
    store: AppStore,
    /// Current path and query - read
    pub location: ReadSignal<String>,
    /// Current path and query - write
    set_location: WriteSignal<String>,
}

impl AppContext {
    pub fn new(client: ApiClient, store: AppStore, location: (ReadSignal<String>, WriteSignal<String>)) -> Self {
        Self {
            client: StoredValue::new_local(client),
            store,
            location: location.0,
            set_location: location.1,
        }
    }

    /// Cheap handle for use inside `spawn_local`
    pub fn client(&self) -> ApiClient {
        self.client.get_value()
    }

    /// Copy the client's session into the store now, ahead of the
    /// subscription, so a following navigation sees the new state
    pub fn sync_session(&self) {
        store_set_session(&self.store, self.client().session().snapshot());
    }

    /// Push a new history entry and render it
    pub fn navigate(&self, path: &str) {
        log::debug!("Navigate to {}", path);
        router::push(path);
        self.set_location.set(path.to_string());
    }

    /// Replace the current history entry (guard redirects)
    pub fn replace(&self, path: &str) {
        router::replace(path);
        self.set_location.set(path.to_string());
    }

    /// Re-read the address bar after back/forward
    pub fn sync_location(&self) {
        self.set_location.set(router::current_location());
    }

    /// Show a toast and schedule its dismissal
    pub fn notify(&self, notice: Notice) {
        let ttl = notice.ttl_ms();
        let store = self.store;
        let id = store_push_notice(&store, notice);
        spawn_local(async move {
            TimeoutFuture::new(ttl).await;
            store_dismiss_notice(&store, id);
        });
    }

    pub fn success(&self, message: impl Into<String>) {
        self.notify(Notice::success(message));
    }

    pub fn error(&self, message: impl Into<String>) {
        self.notify(Notice::error(message));
    }
}

pub fn use_app_context() -> AppContext {
    use_context::<AppContext>().expect("AppContext should be provided")
}
