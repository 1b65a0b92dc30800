use std::sync::Arc;

use axum::http::StatusCode;
use uuid::Uuid;

use crate::application::error::HttpError;
use crate::application::repos::{RepoError, SettingsRepo};
use crate::presentation::views::{BrandView, LayoutChrome, NavigationItemView, PageMetaView};

const SOURCE: &str = "application::chrome::ChromeService";
const NAV_ITEMS: &[(&str, &str)] = &[
    ("/podcasts", "Podcasts"),
    ("/podcasts/new", "Add podcast"),
    ("/settings/admin", "Archive settings"),
    ("/settings/site", "Site settings"),
];

/// Builds the page chrome shared by every HTML page.
#[derive(Clone)]
pub struct ChromeService {
    settings: Arc<dyn SettingsRepo>,
}

impl ChromeService {
    pub fn new(settings: Arc<dyn SettingsRepo>) -> Self {
        Self { settings }
    }

    /// Links carry the acting listener along so it survives navigation.
    pub async fn load(
        &self,
        active_path: &str,
        listener: Option<Uuid>,
    ) -> Result<LayoutChrome, HttpError> {
        let site = self
            .settings
            .load_site()
            .await
            .map_err(repo_failure)?;

        let mut navigation: Vec<NavigationItemView> = NAV_ITEMS
            .iter()
            .map(|(href, label)| NavigationItemView {
                label: (*label).to_string(),
                href: with_listener(href, listener),
                is_active: *href == active_path,
            })
            .collect();

        if let Some(id) = listener {
            let href = format!("/listeners/{id}/settings");
            navigation.push(NavigationItemView {
                label: "My subscriptions".to_string(),
                is_active: href == active_path,
                href: with_listener(&href, listener),
            });
        }

        let active_label = navigation
            .iter()
            .find(|item| item.is_active)
            .map(|item| item.label.clone());
        let title = match active_label {
            Some(label) => format!("{} · {label}", site.name),
            None => site.name.clone(),
        };

        Ok(LayoutChrome {
            brand: BrandView {
                title: site.name,
                href: with_listener("/podcasts", listener),
            },
            navigation,
            meta: PageMetaView { title },
            asset_version: env!("CARGO_PKG_VERSION").to_string(),
        })
    }
}

fn repo_failure(err: RepoError) -> HttpError {
    HttpError::new(
        SOURCE,
        StatusCode::INTERNAL_SERVER_ERROR,
        "Failed to load page chrome",
        err.to_string(),
    )
}

/// Append the `listener` query parameter to an internal path.
pub fn with_listener(path: &str, listener: Option<Uuid>) -> String {
    match listener {
        Some(id) => {
            let separator = if path.contains('?') { '&' } else { '?' };
            format!("{path}{separator}listener={id}")
        }
        None => path.to_string(),
    }
}
