use askama::Template;

use super::LayoutChrome;

#[derive(Clone)]
pub struct SubscriptionCheckboxView {
    pub input_id: String,
    pub value: String,
    pub label: String,
    pub checked: bool,
}

#[derive(Clone)]
pub struct ListenerSettingsView {
    pub heading: String,
    pub form_action: String,
    pub field_name: String,
    pub label: String,
    pub help_html: String,
    pub long_help_html: String,
    pub choices: Vec<SubscriptionCheckboxView>,
    pub errors: Vec<String>,
    pub submit_label: String,
}

impl ListenerSettingsView {
    pub fn has_choices(&self) -> bool {
        !self.choices.is_empty()
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

#[derive(Template)]
#[template(path = "listeners/settings.html")]
pub struct ListenerSettingsTemplate {
    pub chrome: LayoutChrome,
    pub content: ListenerSettingsView,
}

#[derive(Template)]
#[template(path = "listeners/settings_panel.html")]
pub struct ListenerSettingsPanelTemplate {
    pub content: ListenerSettingsView,
}
