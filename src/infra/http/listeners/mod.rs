//! Listener settings page.

mod errors;
mod forms;
mod handlers;
mod views;

pub(super) use handlers::{listener_settings, listener_settings_update};
