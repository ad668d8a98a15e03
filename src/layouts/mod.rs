//! Page Shells
//!
//! Chrome shared by groups of routes.

mod auth_layout;
mod main_layout;

pub use auth_layout::AuthLayout;
pub use main_layout::MainLayout;
