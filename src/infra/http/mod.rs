mod listeners;
mod middleware;
mod podcasts;
mod selectors;
mod settings;
mod shared;
mod state;

pub use state::HttpState;

use axum::{
    Router,
    extract::{Query, State},
    http::StatusCode,
    middleware as axum_middleware,
    response::{IntoResponse, Redirect, Response},
    routing::{get, post},
};

use crate::application::chrome::with_listener;
use crate::application::error::{ErrorReport, HttpError};
use crate::application::repos::RepoError;

use self::middleware::{log_responses, set_request_context};
use self::shared::ListenerQuery;

pub fn build_router(state: HttpState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/podcasts", get(podcasts::podcast_list))
        .route(
            "/podcasts/new",
            get(podcasts::podcast_new).post(podcasts::podcast_create),
        )
        .route("/podcasts/{slug}", get(podcasts::podcast_detail))
        .route(
            "/podcasts/{slug}/subscribe",
            post(podcasts::podcast_toggle_subscription),
        )
        .route(
            "/listeners/{id}/settings",
            get(listeners::listener_settings).post(listeners::listener_settings_update),
        )
        .route(
            "/settings/admin",
            get(settings::admin_settings).post(settings::admin_settings_update),
        )
        .route(
            "/settings/site",
            get(settings::site_settings).post(settings::site_settings_update),
        )
        .route("/_health/db", get(db_health))
        .with_state(state)
        .layer(axum_middleware::from_fn(log_responses))
        .layer(axum_middleware::from_fn(set_request_context))
}

async fn index(Query(query): Query<ListenerQuery>) -> Redirect {
    Redirect::to(&with_listener("/podcasts", query.listener))
}

async fn db_health(State(state): State<HttpState>) -> Response {
    match state.health.ping().await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => {
            let mut response = StatusCode::SERVICE_UNAVAILABLE.into_response();
            ErrorReport::from_error(
                "infra::http::db_health",
                StatusCode::SERVICE_UNAVAILABLE,
                &err,
            )
            .attach(&mut response);
            response
        }
    }
}

/// Map a repository error to a consistent HTTP error response.
pub fn repo_error_to_http(source: &'static str, err: RepoError) -> HttpError {
    match err {
        RepoError::Duplicate { constraint } => {
            HttpError::new(source, StatusCode::CONFLICT, "Duplicate record", constraint)
        }
        RepoError::NotFound => HttpError::new(
            source,
            StatusCode::NOT_FOUND,
            "Resource not found",
            "resource not found",
        ),
        RepoError::InvalidInput { message } => {
            HttpError::new(source, StatusCode::BAD_REQUEST, "Invalid input", message)
        }
        RepoError::Integrity { message } => HttpError::new(
            source,
            StatusCode::CONFLICT,
            "Integrity constraint violated",
            message,
        ),
        RepoError::Timeout => HttpError::new(
            source,
            StatusCode::SERVICE_UNAVAILABLE,
            "Database timeout",
            "Database timeout",
        ),
        RepoError::Persistence(message) => HttpError::new(
            source,
            StatusCode::INTERNAL_SERVER_ERROR,
            "Persistence error",
            message,
        ),
    }
}
