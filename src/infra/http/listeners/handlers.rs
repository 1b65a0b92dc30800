use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_extra::extract::Form;
use uuid::Uuid;

use crate::application::listeners::ListenerSettingsError;
use crate::presentation::views::{
    ListenerSettingsPanelTemplate, ListenerSettingsTemplate, render_not_found_response,
    render_template_response,
};

use super::super::{
    HttpState,
    shared::{Toast, stream_panel},
};
use super::errors::listener_settings_error;
use super::forms::ListenerSettingsFormData;
use super::views::settings_view;

pub(crate) async fn listener_settings(
    State(state): State<HttpState>,
    Path(listener_id): Path<Uuid>,
) -> Response {
    let path = format!("/listeners/{listener_id}/settings");

    let form = match state.listeners.load_form(listener_id).await {
        Ok(form) => form,
        Err(ListenerSettingsError::NotFound) => {
            let chrome = match state.chrome.load(&path, None).await {
                Ok(chrome) => chrome,
                Err(err) => return err.into_response(),
            };
            return render_not_found_response(chrome, "This listener does not exist.");
        }
        Err(err) => {
            return listener_settings_error("infra::http::listeners::settings", err)
                .into_response();
        }
    };

    let chrome = match state.chrome.load(&path, Some(listener_id)).await {
        Ok(chrome) => chrome,
        Err(err) => return err.into_response(),
    };

    let content = settings_view(&form, None);
    render_template_response(ListenerSettingsTemplate { chrome, content }, StatusCode::OK)
}

pub(crate) async fn listener_settings_update(
    State(state): State<HttpState>,
    Path(listener_id): Path<Uuid>,
    Form(data): Form<ListenerSettingsFormData>,
) -> Response {
    let source = "infra::http::listeners::settings_update";

    match state.listeners.update(data.into_command(listener_id)).await {
        Ok(form) => {
            let content = settings_view(&form, None);
            stream_panel(
                ListenerSettingsPanelTemplate { content },
                &[Toast::success("Subscriptions updated")],
                source,
            )
        }
        Err(ListenerSettingsError::Invalid { errors, form }) => {
            let content = settings_view(&form, Some(&errors));
            stream_panel(
                ListenerSettingsPanelTemplate { content },
                &Toast::from_form_errors(&errors),
                source,
            )
        }
        Err(err) => listener_settings_error(source, err).into_response(),
    }
}
