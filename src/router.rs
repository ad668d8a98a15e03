//! History Router
//!
//! Thin wrapper over the History API. Route parsing and the session guard
//! live in `emr_client::routes`; this module only reads and writes the
//! address bar.

use wasm_bindgen::JsValue;

/// Path plus query of the current address, e.g. "/kunjungan/baru?patient=7"
pub fn current_location() -> String {
    let Some(window) = web_sys::window() else {
        return String::from("/");
    };
    let location = window.location();
    let path = location.pathname().unwrap_or_else(|_| String::from("/"));
    let search = location.search().unwrap_or_default();
    format!("{}{}", path, search)
}

pub fn push(path: &str) {
    write_history(path, false);
}

pub fn replace(path: &str) {
    write_history(path, true);
}

fn write_history(path: &str, replace: bool) {
    let Some(history) = web_sys::window().and_then(|w| w.history().ok()) else {
        log::error!("History API unavailable, cannot navigate to {}", path);
        return;
    };
    let result = if replace {
        history.replace_state_with_url(&JsValue::NULL, "", Some(path))
    } else {
        history.push_state_with_url(&JsValue::NULL, "", Some(path))
    };
    if let Err(e) = result {
        log::error!("Navigation to {} failed: {:?}", path, e);
    }
}

/// Browser prompt; `None` when dismissed
pub fn prompt(message: &str) -> Option<String> {
    web_sys::window()?.prompt_with_message(message).ok().flatten()
}

pub fn set_document_title(title: &str) {
    if let Some(document) = web_sys::window().and_then(|w| w.document()) {
        document.set_title(&format!("{} | Hospital EMR", title));
    }
}
