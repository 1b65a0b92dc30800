use askama::Template;

use super::{FormFieldView, LayoutChrome};

#[derive(Clone)]
pub struct AdminSettingsView {
    pub heading: String,
    pub form_action: String,
    pub storage_directory: FormFieldView,
    pub naming_scheme: FormFieldView,
    pub updated_at: String,
    pub submit_label: String,
}

#[derive(Template)]
#[template(path = "settings/admin.html")]
pub struct AdminSettingsTemplate {
    pub chrome: LayoutChrome,
    pub content: AdminSettingsView,
}

#[derive(Template)]
#[template(path = "settings/admin_panel.html")]
pub struct AdminSettingsPanelTemplate {
    pub content: AdminSettingsView,
}

#[derive(Clone)]
pub struct SiteSettingsView {
    pub heading: String,
    pub form_action: String,
    pub site_name: String,
    pub domain: FormFieldView,
    pub submit_label: String,
}

#[derive(Template)]
#[template(path = "settings/site.html")]
pub struct SiteSettingsTemplate {
    pub chrome: LayoutChrome,
    pub content: SiteSettingsView,
}

#[derive(Template)]
#[template(path = "settings/site_panel.html")]
pub struct SiteSettingsPanelTemplate {
    pub content: SiteSettingsView,
}
