use axum::http::StatusCode;

use crate::{
    application::{error::HttpError, settings::AdminSettingsError},
    infra::http::repo_error_to_http,
};

pub(super) fn admin_settings_error(source: &'static str, err: AdminSettingsError) -> HttpError {
    match err {
        AdminSettingsError::Invalid(errors) => HttpError::new(
            source,
            StatusCode::BAD_REQUEST,
            "Settings request could not be processed",
            errors.to_string(),
        ),
        AdminSettingsError::Repo(repo) => repo_error_to_http(source, repo),
    }
}
