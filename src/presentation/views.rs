use crate::application::error::{ErrorReport, HttpError};
use askama::{Error as AskamaError, Template};
use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use thiserror::Error;

mod listeners;
mod podcasts;
mod settings;
mod toast;

pub use listeners::*;
pub use podcasts::*;
pub use settings::*;
pub use toast::*;

#[derive(Debug, Error)]
#[error("{public_message}")]
pub struct TemplateRenderError {
    pub(crate) source: &'static str,
    pub(crate) public_message: &'static str,
    #[source]
    pub(crate) error: AskamaError,
}

impl TemplateRenderError {
    pub fn new(source: &'static str, public_message: &'static str, error: AskamaError) -> Self {
        Self {
            source,
            public_message,
            error,
        }
    }
}

impl From<TemplateRenderError> for HttpError {
    fn from(err: TemplateRenderError) -> Self {
        let TemplateRenderError {
            source,
            public_message,
            error,
        } = err;

        HttpError::from_error(
            source,
            StatusCode::INTERNAL_SERVER_ERROR,
            public_message,
            &error,
        )
    }
}

pub fn render_template<T: Template>(template: T) -> Result<Html<String>, HttpError> {
    template.render().map(Html).map_err(|err| {
        TemplateRenderError::new(
            "presentation::views::render_template",
            "Template rendering failed",
            err,
        )
        .into()
    })
}

pub fn render_template_response<T: Template>(template: T, status: StatusCode) -> Response {
    match render_template(template) {
        Ok(html) => (status, html).into_response(),
        Err(err) => err.into_response(),
    }
}

pub fn render_not_found_response(chrome: LayoutChrome, message: &str) -> Response {
    let content = ErrorPageView::not_found(message);
    let mut response = render_template_response(
        ErrorTemplate { chrome, content },
        StatusCode::NOT_FOUND,
    );
    ErrorReport::from_message(
        "presentation::views::render_not_found_response",
        StatusCode::NOT_FOUND,
        message.to_string(),
    )
    .attach(&mut response);
    response
}

#[derive(Clone)]
pub struct BrandView {
    pub title: String,
    pub href: String,
}

#[derive(Clone)]
pub struct NavigationItemView {
    pub label: String,
    pub href: String,
    pub is_active: bool,
}

#[derive(Clone)]
pub struct PageMetaView {
    pub title: String,
}

#[derive(Clone)]
pub struct LayoutChrome {
    pub brand: BrandView,
    pub navigation: Vec<NavigationItemView>,
    pub meta: PageMetaView,
    pub asset_version: String,
}

/// A single rendered form field with its bound value and errors.
#[derive(Clone, Default)]
pub struct FormFieldView {
    pub name: String,
    pub label: String,
    pub value: String,
    /// Short help rendered under the input; may contain markup.
    pub help_html: String,
    /// Longer explanation shown in a collapsible block; may contain markup.
    pub long_help_html: Option<String>,
    pub errors: Vec<String>,
    pub rows: Option<u32>,
    pub placeholder: Option<String>,
}

impl FormFieldView {
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn input_id(&self) -> String {
        format!("field-{}", self.name.replace('_', "-"))
    }
}

#[derive(Clone)]
pub struct ErrorPageView {
    pub title: String,
    pub message: String,
    pub home_href: String,
}

impl ErrorPageView {
    pub fn not_found(message: &str) -> Self {
        Self {
            title: "Not found".to_string(),
            message: message.to_string(),
            home_href: "/podcasts".to_string(),
        }
    }
}

#[derive(Template)]
#[template(path = "error.html")]
pub struct ErrorTemplate {
    pub chrome: LayoutChrome,
    pub content: ErrorPageView,
}
