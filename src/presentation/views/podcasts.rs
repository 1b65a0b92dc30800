use askama::Template;

use super::{FormFieldView, LayoutChrome};

#[derive(Clone)]
pub struct PodcastListItemView {
    pub title: String,
    pub href: String,
    pub author: Option<String>,
    pub description: Option<String>,
}

#[derive(Clone)]
pub struct PodcastListView {
    pub heading: String,
    pub items: Vec<PodcastListItemView>,
    pub new_href: String,
    pub empty_message: String,
}

impl PodcastListView {
    pub fn has_items(&self) -> bool {
        !self.items.is_empty()
    }
}

#[derive(Template)]
#[template(path = "podcasts/list.html")]
pub struct PodcastListTemplate {
    pub chrome: LayoutChrome,
    pub content: PodcastListView,
}

#[derive(Clone)]
pub struct NewPodcastFormView {
    pub heading: String,
    pub form_action: String,
    pub feed_url: FormFieldView,
    pub form_errors: Vec<String>,
    pub submit_label: String,
}

impl NewPodcastFormView {
    pub fn has_form_errors(&self) -> bool {
        !self.form_errors.is_empty()
    }
}

#[derive(Template)]
#[template(path = "podcasts/new.html")]
pub struct NewPodcastTemplate {
    pub chrome: LayoutChrome,
    pub content: NewPodcastFormView,
}

#[derive(Template)]
#[template(path = "podcasts/new_panel.html")]
pub struct NewPodcastPanelTemplate {
    pub content: NewPodcastFormView,
}

#[derive(Clone)]
pub struct SubscribeToggleView {
    pub action: String,
    pub subscribed: bool,
    pub label: String,
}

#[derive(Clone)]
pub struct PodcastDetailView {
    pub title: String,
    pub subtitle: Option<String>,
    pub feed_url: String,
    pub link: Option<String>,
    pub image_url: Option<String>,
    pub author: Option<String>,
    pub language: Option<String>,
    pub description: Option<String>,
    pub added_at: String,
    pub subscribe: Option<SubscribeToggleView>,
}

#[derive(Template)]
#[template(path = "podcasts/detail.html")]
pub struct PodcastDetailTemplate {
    pub chrome: LayoutChrome,
    pub content: PodcastDetailView,
}

#[derive(Template)]
#[template(path = "podcasts/subscribe_toggle.html")]
pub struct SubscribeTogglePanelTemplate {
    pub content: PodcastDetailView,
}
