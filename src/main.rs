//! Hospital EMR Frontend Entry Point

mod storage;
mod store;
mod context;
mod router;
mod components;
mod layouts;
mod pages;
mod app;

use app::App;
use leptos::prelude::*;

fn main() {
    console_error_panic_hook::set_once();
    if let Err(e) = console_logger::init_logger("HospitalEMR", log::LevelFilter::Info) {
        web_sys::console::warn_1(&format!("Logger already installed: {}", e).into());
    }
    mount_to_body(App);
}
