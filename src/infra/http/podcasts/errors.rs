use axum::http::StatusCode;

use crate::{
    application::{
        error::HttpError,
        podcasts::{PodcastError, PodcastFormError},
    },
    infra::http::repo_error_to_http,
};

pub(super) fn podcast_error(source: &'static str, err: PodcastError) -> HttpError {
    match err {
        PodcastError::NotFound => HttpError::new(
            source,
            StatusCode::NOT_FOUND,
            "Podcast not found",
            "podcast not found",
        ),
        PodcastError::UnknownListener => unknown_listener(source),
        PodcastError::Repo(repo) => repo_error_to_http(source, repo),
    }
}

/// Errors that cannot be rendered back into the form.
pub(super) fn podcast_form_error(source: &'static str, err: PodcastFormError) -> HttpError {
    match err {
        PodcastFormError::Invalid(errors) => HttpError::new(
            source,
            StatusCode::BAD_REQUEST,
            "Podcast could not be added",
            errors.to_string(),
        ),
        PodcastFormError::UnknownListener => unknown_listener(source),
        PodcastFormError::Slug(slug) => HttpError::from_error(
            source,
            StatusCode::UNPROCESSABLE_ENTITY,
            "Podcast title cannot be turned into a slug",
            &slug,
        ),
        PodcastFormError::Repo(repo) => repo_error_to_http(source, repo),
    }
}

pub(super) fn missing_listener(source: &'static str) -> HttpError {
    HttpError::new(
        source,
        StatusCode::BAD_REQUEST,
        "A listener is required",
        "missing `listener` query parameter",
    )
}

fn unknown_listener(source: &'static str) -> HttpError {
    HttpError::new(
        source,
        StatusCode::NOT_FOUND,
        "Listener not found",
        "listener not found",
    )
}
