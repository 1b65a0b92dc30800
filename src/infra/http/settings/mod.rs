//! Archive-wide and site settings pages.
//!
//! - `handlers`: HTTP handler functions
//! - `forms`: submitted form payloads
//! - `views`: view building functions
//! - `errors`: error mapping

mod errors;
mod forms;
mod handlers;
mod views;

pub(super) use handlers::{
    admin_settings, admin_settings_update, site_settings, site_settings_update,
};
