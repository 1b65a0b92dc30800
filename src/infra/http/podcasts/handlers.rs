use axum::{
    extract::{Form, Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::application::chrome::with_listener;
use crate::application::podcasts::{PodcastError, PodcastFormError};
use crate::application::stream::StreamBuilder;
use crate::presentation::views::{
    NewPodcastPanelTemplate, NewPodcastTemplate, PodcastDetailTemplate, PodcastListTemplate,
    SubscribeTogglePanelTemplate, render_not_found_response, render_template_response,
};

use super::super::{
    HttpState,
    selectors::SUBSCRIBE_TOGGLE,
    shared::{ListenerQuery, Toast, push_toasts, stream_panel, stream_patch},
};
use super::errors::{missing_listener, podcast_error, podcast_form_error};
use super::forms::NewFromUrlForm;
use super::views::{detail_view, list_view, new_form_view};

const SOURCE_BASE: &str = "infra::http::podcasts";

pub(crate) async fn podcast_list(
    State(state): State<HttpState>,
    Query(query): Query<ListenerQuery>,
) -> Response {
    let chrome = match state.chrome.load("/podcasts", query.listener).await {
        Ok(chrome) => chrome,
        Err(err) => return err.into_response(),
    };

    let podcasts = match state.podcasts.list().await {
        Ok(podcasts) => podcasts,
        Err(err) => return podcast_error(SOURCE_BASE, err).into_response(),
    };

    let content = list_view(&podcasts, query.listener);
    render_template_response(PodcastListTemplate { chrome, content }, StatusCode::OK)
}

pub(crate) async fn podcast_new(
    State(state): State<HttpState>,
    Query(query): Query<ListenerQuery>,
) -> Response {
    let chrome = match state.chrome.load("/podcasts/new", query.listener).await {
        Ok(chrome) => chrome,
        Err(err) => return err.into_response(),
    };

    let content = new_form_view("", None, query.listener);
    render_template_response(NewPodcastTemplate { chrome, content }, StatusCode::OK)
}

pub(crate) async fn podcast_create(
    State(state): State<HttpState>,
    Query(query): Query<ListenerQuery>,
    Form(form): Form<NewFromUrlForm>,
) -> Response {
    let source = "infra::http::podcasts::create";

    match state
        .podcasts
        .create_from_url(form.to_command(query.listener))
        .await
    {
        Ok(podcast) => {
            let mut stream = StreamBuilder::new();
            if let Err(err) = push_toasts(
                &mut stream,
                &[Toast::success(format!("Added \u{201c}{}\u{201d}", podcast.title))],
            ) {
                return err.into_response();
            }
            stream.push_redirect(&with_listener(
                &format!("/podcasts/{}", podcast.slug),
                query.listener,
            ));
            stream.into_response()
        }
        Err(PodcastFormError::Invalid(errors)) => {
            let content = new_form_view(&form.feed_url, Some(&errors), query.listener);
            stream_panel(
                NewPodcastPanelTemplate { content },
                &Toast::from_form_errors(&errors),
                source,
            )
        }
        Err(err) => podcast_form_error(source, err).into_response(),
    }
}

pub(crate) async fn podcast_detail(
    State(state): State<HttpState>,
    Path(slug): Path<String>,
    Query(query): Query<ListenerQuery>,
) -> Response {
    let path = format!("/podcasts/{slug}");
    let chrome = match state.chrome.load(&path, query.listener).await {
        Ok(chrome) => chrome,
        Err(err) => return err.into_response(),
    };

    match state.podcasts.detail(&slug, query.listener).await {
        Ok(detail) => {
            let content = detail_view(&detail, query.listener);
            render_template_response(PodcastDetailTemplate { chrome, content }, StatusCode::OK)
        }
        Err(PodcastError::NotFound) => {
            render_not_found_response(chrome, "This podcast is not in the archive.")
        }
        Err(err) => podcast_error("infra::http::podcasts::detail", err).into_response(),
    }
}

pub(crate) async fn podcast_toggle_subscription(
    State(state): State<HttpState>,
    Path(slug): Path<String>,
    Query(query): Query<ListenerQuery>,
) -> Response {
    let source = "infra::http::podcasts::toggle_subscription";
    let Some(listener) = query.listener else {
        return missing_listener(source).into_response();
    };

    match state.podcasts.toggle_subscription(&slug, listener).await {
        Ok(detail) => {
            let message = if detail.subscribed == Some(true) {
                format!("Subscribed to {}", detail.podcast.title)
            } else {
                format!("Unsubscribed from {}", detail.podcast.title)
            };
            let content = detail_view(&detail, Some(listener));
            stream_patch(
                SUBSCRIBE_TOGGLE,
                SubscribeTogglePanelTemplate { content },
                &[Toast::success(message)],
                source,
            )
        }
        Err(err) => podcast_error(source, err).into_response(),
    }
}
