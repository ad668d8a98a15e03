//! Session Persistence
//!
//! The session survives page reloads as one JSON record under a fixed key.
//! The browser implementation lives in the UI crate (localStorage).

use std::sync::Mutex;

use crate::session::Session;

/// Key of the persisted session record
pub const STORAGE_KEY: &str = "auth-storage";

/// Synchronous key-value persistence for the session record
pub trait SessionStorage: Send + Sync {
    fn load(&self) -> Option<Session>;
    fn save(&self, session: &Session);
    fn clear(&self);
}

pub fn encode_session(session: &Session) -> Result<String, serde_json::Error> {
    serde_json::to_string(session)
}

/// Corrupt records are logged and treated as absent
pub fn decode_session(raw: &str) -> Option<Session> {
    match serde_json::from_str(raw) {
        Ok(session) => Some(session),
        Err(e) => {
            log::warn!("Ignoring unreadable {} record: {}", STORAGE_KEY, e);
            None
        }
    }
}

/// In-process storage, used natively and in tests
#[derive(Debug, Default)]
pub struct MemoryStorage {
    slot: Mutex<Option<String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed with a raw record, as if left by a previous page load
    pub fn with_raw(raw: &str) -> Self {
        Self {
            slot: Mutex::new(Some(raw.to_string())),
        }
    }

    pub fn raw(&self) -> Option<String> {
        self.slot.lock().ok().and_then(|slot| slot.clone())
    }
}

impl SessionStorage for MemoryStorage {
    fn load(&self) -> Option<Session> {
        self.raw().as_deref().and_then(decode_session)
    }

    fn save(&self, session: &Session) {
        match encode_session(session) {
            Ok(raw) => {
                if let Ok(mut slot) = self.slot.lock() {
                    *slot = Some(raw);
                }
            }
            Err(e) => log::error!("Failed to encode session: {}", e),
        }
    }

    fn clear(&self) {
        if let Ok(mut slot) = self.slot.lock() {
            *slot = None;
        }
    }
}
