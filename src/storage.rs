//! Browser Session Storage
//!
//! localStorage implementation of `SessionStorage`. A missing or
//! inaccessible store (private mode, sandboxed iframe) behaves as empty.

use emr_client::storage::{decode_session, encode_session};
use emr_client::{Session, SessionStorage, STORAGE_KEY};

#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserStorage;

fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window()?.local_storage().ok().flatten()
}

impl SessionStorage for BrowserStorage {
    fn load(&self) -> Option<Session> {
        let raw = local_storage()?.get_item(STORAGE_KEY).ok().flatten()?;
        decode_session(&raw)
    }

    fn save(&self, session: &Session) {
        let Some(storage) = local_storage() else {
            log::warn!("localStorage unavailable, session not persisted");
            return;
        };
        match encode_session(session) {
            Ok(raw) => {
                if storage.set_item(STORAGE_KEY, &raw).is_err() {
                    log::error!("Failed to write {}", STORAGE_KEY);
                }
            }
            Err(e) => log::error!("Failed to encode session: {}", e),
        }
    }

    fn clear(&self) {
        if let Some(storage) = local_storage() {
            let _ = storage.remove_item(STORAGE_KEY);
        }
    }
}
