//! Podcast pages: list, detail, subscription toggle and the new-from-URL form.

mod errors;
mod forms;
mod handlers;
mod views;

pub(super) use handlers::{
    podcast_create, podcast_detail, podcast_list, podcast_new, podcast_toggle_subscription,
};
