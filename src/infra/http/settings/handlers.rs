use axum::{
    extract::{Form, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::application::settings::AdminSettingsError;
use crate::presentation::views::{
    AdminSettingsPanelTemplate, AdminSettingsTemplate, SiteSettingsPanelTemplate,
    SiteSettingsTemplate, render_template_response,
};

use super::super::{
    HttpState,
    shared::{Toast, stream_panel},
};
use super::errors::admin_settings_error;
use super::forms::{AdminSettingsForm, SiteSettingsForm};
use super::views::{
    ADMIN_FORM_ACTION, AdminFieldValues, SITE_FORM_ACTION, admin_values_from_record, admin_view,
    site_view,
};

pub(crate) async fn admin_settings(State(state): State<HttpState>) -> Response {
    let chrome = match state.chrome.load(ADMIN_FORM_ACTION, None).await {
        Ok(chrome) => chrome,
        Err(err) => return err.into_response(),
    };

    let settings = match state.settings.load_admin().await {
        Ok(settings) => settings,
        Err(err) => {
            return admin_settings_error("infra::http::settings::admin", err).into_response();
        }
    };

    let content = admin_view(admin_values_from_record(&settings), None);
    render_template_response(AdminSettingsTemplate { chrome, content }, StatusCode::OK)
}

pub(crate) async fn admin_settings_update(
    State(state): State<HttpState>,
    Form(form): Form<AdminSettingsForm>,
) -> Response {
    let source = "infra::http::settings::admin_update";

    match state.settings.update_admin(form.to_command()).await {
        Ok(updated) => {
            let content = admin_view(admin_values_from_record(&updated), None);
            stream_panel(
                AdminSettingsPanelTemplate { content },
                &[Toast::success("Archive settings updated successfully")],
                source,
            )
        }
        Err(AdminSettingsError::Invalid(errors)) => {
            let original = match state.settings.load_admin().await {
                Ok(settings) => settings,
                Err(err) => return admin_settings_error(source, err).into_response(),
            };
            let values = AdminFieldValues {
                storage_directory: form.storage_directory.trim(),
                naming_scheme: form.naming_scheme.trim(),
                ..admin_values_from_record(&original)
            };
            let content = admin_view(values, Some(&errors));
            stream_panel(
                AdminSettingsPanelTemplate { content },
                &Toast::from_form_errors(&errors),
                source,
            )
        }
        Err(err) => admin_settings_error(source, err).into_response(),
    }
}

pub(crate) async fn site_settings(State(state): State<HttpState>) -> Response {
    let chrome = match state.chrome.load(SITE_FORM_ACTION, None).await {
        Ok(chrome) => chrome,
        Err(err) => return err.into_response(),
    };

    let site = match state.settings.load_site().await {
        Ok(site) => site,
        Err(err) => {
            return admin_settings_error("infra::http::settings::site", err).into_response();
        }
    };

    let content = site_view(&site, &site.domain, None);
    render_template_response(SiteSettingsTemplate { chrome, content }, StatusCode::OK)
}

pub(crate) async fn site_settings_update(
    State(state): State<HttpState>,
    Form(form): Form<SiteSettingsForm>,
) -> Response {
    let source = "infra::http::settings::site_update";

    match state.settings.update_site(form.to_command()).await {
        Ok(site) => {
            let content = site_view(&site, &site.domain, None);
            stream_panel(
                SiteSettingsPanelTemplate { content },
                &[Toast::success("Site settings updated successfully")],
                source,
            )
        }
        Err(AdminSettingsError::Invalid(errors)) => {
            let site = match state.settings.load_site().await {
                Ok(site) => site,
                Err(err) => return admin_settings_error(source, err).into_response(),
            };
            let content = site_view(&site, form.domain.trim(), Some(&errors));
            stream_panel(
                SiteSettingsPanelTemplate { content },
                &Toast::from_form_errors(&errors),
                source,
            )
        }
        Err(err) => admin_settings_error(source, err).into_response(),
    }
}
