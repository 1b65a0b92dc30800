use axum::http::StatusCode;

use crate::{
    application::{error::HttpError, listeners::ListenerSettingsError},
    infra::http::repo_error_to_http,
};

pub(super) fn listener_settings_error(
    source: &'static str,
    err: ListenerSettingsError,
) -> HttpError {
    match err {
        ListenerSettingsError::NotFound => HttpError::new(
            source,
            StatusCode::NOT_FOUND,
            "Listener not found",
            "listener not found",
        ),
        ListenerSettingsError::Invalid { errors, .. } => HttpError::new(
            source,
            StatusCode::BAD_REQUEST,
            "Listener settings could not be saved",
            errors.to_string(),
        ),
        ListenerSettingsError::Repo(repo) => repo_error_to_http(source, repo),
    }
}
