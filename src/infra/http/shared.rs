use askama::{Error as AskamaError, Template};
use axum::response::{IntoResponse, Response};
use datastar::prelude::ElementPatchMode;
use serde::Deserialize;
use std::time::Duration;
use uuid::Uuid;

use super::selectors::{PANEL, TOAST_STACK};
use crate::{
    application::{error::HttpError, forms::FormErrors, stream::StreamBuilder},
    presentation::views::{TemplateRenderError, ToastItem, ToastStackTemplate},
};

/// Query string naming the listener a request acts for.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(super) struct ListenerQuery {
    pub(super) listener: Option<Uuid>,
}

#[derive(Clone)]
pub(super) struct Toast {
    pub id: Uuid,
    pub kind: ToastKind,
    pub text: String,
    pub ttl: Duration,
}

#[derive(Clone, Copy)]
pub(super) enum ToastKind {
    Success,
    Error,
}

impl ToastKind {
    fn as_variant(self) -> &'static str {
        match self {
            ToastKind::Success => "success",
            ToastKind::Error => "error",
        }
    }
}

const DEFAULT_TOAST_TTL: Duration = Duration::from_millis(6000);

impl Toast {
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind: ToastKind::Success,
            text: text.into(),
            ttl: DEFAULT_TOAST_TTL,
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind: ToastKind::Error,
            text: text.into(),
            ttl: DEFAULT_TOAST_TTL,
        }
    }

    /// One error toast per validation message, form-level messages first.
    pub fn from_form_errors(errors: &FormErrors) -> Vec<Self> {
        errors.messages().into_iter().map(Self::error).collect()
    }
}

pub(super) fn push_toasts(stream: &mut StreamBuilder, toasts: &[Toast]) -> Result<(), HttpError> {
    let view_items = toasts
        .iter()
        .map(|toast| ToastItem {
            id: toast.id.to_string(),
            kind: toast.kind.as_variant(),
            text: toast.text.clone(),
            ttl_ms: toast.ttl.as_millis() as u64,
        })
        .collect::<Vec<_>>();

    let template = ToastStackTemplate { toasts: view_items };

    let html = template.render().map_err(|err| {
        template_render_http_error(
            "infra::http::push_toasts",
            "Template rendering failed",
            err,
        )
    })?;

    stream.push_patch(html, TOAST_STACK, ElementPatchMode::Replace);
    Ok(())
}

pub(super) fn datastar_replace(selector: &str, html: String) -> StreamBuilder {
    let mut stream = StreamBuilder::new();
    stream.push_patch(html, selector, ElementPatchMode::Replace);
    stream
}

/// Render `template` and replace the form panel with it, followed by toasts.
pub(super) fn stream_panel<T: Template>(
    template: T,
    toasts: &[Toast],
    source: &'static str,
) -> Response {
    stream_patch(PANEL, template, toasts, source)
}

pub(super) fn stream_patch<T: Template>(
    selector: &str,
    template: T,
    toasts: &[Toast],
    source: &'static str,
) -> Response {
    let html = match template.render() {
        Ok(html) => html,
        Err(err) => {
            return template_render_http_error(source, "Template rendering failed", err)
                .into_response();
        }
    };

    let mut stream = datastar_replace(selector, html);
    if !toasts.is_empty()
        && let Err(err) = push_toasts(&mut stream, toasts)
    {
        return err.into_response();
    }

    stream.into_response()
}

pub(super) fn template_render_http_error(
    source: &'static str,
    message: &'static str,
    err: AskamaError,
) -> HttpError {
    HttpError::from(TemplateRenderError::new(source, message, err))
}
