use std::sync::Arc;

use metrics::counter;
use thiserror::Error;
use tracing::{info, warn};
use url::Url;
use uuid::Uuid;

use crate::application::feeds::{FeedFetcher, FeedInfo};
use crate::application::forms::FormErrors;
use crate::application::repos::{CreatePodcastParams, ListenersRepo, PodcastsRepo, RepoError};
use crate::domain::entities::{PODCAST_SLUG_FALLBACK, PODCAST_SLUG_MAX_LEN, PodcastRecord};
use crate::domain::slug::{SlugAsyncError, SlugError, derive_slug, generate_unique_slug_async};

pub const FEED_URL_FIELD: &str = "feed_url";
pub const INVALID_FEED_MESSAGE: &str = "The URL did not return a valid podcast feed";
pub const DUPLICATE_FEED_MESSAGE: &str = "Podcast with this Feed URL already exists.";
const FEED_URL_MAX_LEN: usize = 2000;

#[derive(Debug, Error)]
pub enum PodcastFormError {
    #[error("podcast form is invalid: {0}")]
    Invalid(FormErrors),
    #[error("listener not found")]
    UnknownListener,
    #[error("slug generation failed: {0}")]
    Slug(SlugError),
    #[error(transparent)]
    Repo(#[from] RepoError),
}

#[derive(Debug, Error)]
pub enum PodcastError {
    #[error("podcast not found")]
    NotFound,
    #[error("listener not found")]
    UnknownListener,
    #[error(transparent)]
    Repo(#[from] RepoError),
}

#[derive(Debug, Clone)]
pub struct NewFromUrlCommand {
    pub feed_url: String,
    /// Listener who added the podcast; it becomes interested and subscribed.
    pub listener_id: Option<Uuid>,
}

/// A validated new-from-URL submission, ready to be saved.
#[derive(Debug, Clone)]
pub struct CleanedNewPodcast {
    pub feed_url: Url,
    pub info: FeedInfo,
}

#[derive(Debug, Clone)]
pub struct PodcastDetail {
    pub podcast: PodcastRecord,
    pub subscribed: Option<bool>,
}

#[derive(Clone)]
pub struct PodcastService {
    podcasts: Arc<dyn PodcastsRepo>,
    listeners: Arc<dyn ListenersRepo>,
    feeds: Arc<dyn FeedFetcher>,
}

impl PodcastService {
    pub fn new(
        podcasts: Arc<dyn PodcastsRepo>,
        listeners: Arc<dyn ListenersRepo>,
        feeds: Arc<dyn FeedFetcher>,
    ) -> Self {
        Self {
            podcasts,
            listeners,
            feeds,
        }
    }

    pub async fn list(&self) -> Result<Vec<PodcastRecord>, PodcastError> {
        self.podcasts
            .list_podcasts()
            .await
            .map_err(PodcastError::from)
    }

    pub async fn detail(
        &self,
        slug: &str,
        listener_id: Option<Uuid>,
    ) -> Result<PodcastDetail, PodcastError> {
        let podcast = self
            .podcasts
            .find_by_slug(slug)
            .await?
            .ok_or(PodcastError::NotFound)?;

        let subscribed = match listener_id {
            Some(listener_id) => {
                self.ensure_listener(listener_id).await?;
                // Viewing a podcast puts it into the listener's interested pool.
                self.listeners
                    .add_interest(listener_id, podcast.id, false)
                    .await?;
                let ids = self.listeners.list_subscribed_ids(listener_id).await?;
                Some(ids.contains(&podcast.id))
            }
            None => None,
        };

        Ok(PodcastDetail {
            podcast,
            subscribed,
        })
    }

    /// Flip the listener's subscription; returns the new state.
    pub async fn toggle_subscription(
        &self,
        slug: &str,
        listener_id: Uuid,
    ) -> Result<PodcastDetail, PodcastError> {
        let detail = self.detail(slug, Some(listener_id)).await?;
        let subscribe = !detail.subscribed.unwrap_or(false);

        if subscribe {
            self.listeners
                .add_interest(listener_id, detail.podcast.id, true)
                .await?;
        } else {
            self.listeners
                .set_subscribed(listener_id, detail.podcast.id, false)
                .await?;
        }

        info!(
            target = "podarchive::podcasts",
            podcast = %detail.podcast.slug,
            listener = %listener_id,
            subscribed = subscribe,
            "subscription toggled"
        );

        Ok(PodcastDetail {
            podcast: detail.podcast,
            subscribed: Some(subscribe),
        })
    }

    /// Validate a feed URL: well-formed, not archived yet, and serving a feed.
    pub async fn clean(&self, raw_url: &str) -> Result<CleanedNewPodcast, PodcastFormError> {
        let feed_url = parse_feed_url(raw_url).map_err(PodcastFormError::Invalid)?;

        if self
            .podcasts
            .find_by_feed_url(feed_url.as_str())
            .await?
            .is_some()
        {
            return Err(duplicate_feed_error());
        }

        counter!("podarchive_feed_fetch_total").increment(1);
        match self.feeds.fetch(&feed_url).await {
            Ok(info) => Ok(CleanedNewPodcast { feed_url, info }),
            Err(err) => {
                counter!("podarchive_feed_fetch_failed_total").increment(1);
                warn!(
                    target = "podarchive::podcasts",
                    feed_url = %feed_url,
                    error = %err,
                    "feed validation failed"
                );
                Err(PodcastFormError::Invalid(FormErrors::form(
                    INVALID_FEED_MESSAGE,
                )))
            }
        }
    }

    /// Persist a cleaned submission under a unique, title-derived slug.
    ///
    /// A slug taken between the uniqueness check and the insert is retried
    /// once with a fresh candidate.
    pub async fn save(
        &self,
        cleaned: CleanedNewPodcast,
        listener_id: Option<Uuid>,
    ) -> Result<PodcastRecord, PodcastFormError> {
        let CleanedNewPodcast { feed_url, info } = cleaned;
        let mut params = CreatePodcastParams {
            feed_url: feed_url.to_string(),
            slug: self.unique_slug(&info.title).await?,
            title: info.title,
            subtitle: info.subtitle,
            description: info.description,
            link: info.link,
            image_url: info.image_url,
            author: info.author,
            language: info.language,
        };

        let podcast = match self.podcasts.create_podcast(params.clone()).await {
            Err(RepoError::Duplicate { constraint }) if constraint.contains("slug") => {
                warn!(
                    target = "podarchive::podcasts",
                    slug = %params.slug,
                    "slug taken concurrently, retrying"
                );
                params.slug = self.unique_slug(&params.title).await?;
                self.podcasts.create_podcast(params).await
            }
            other => other,
        }
        .map_err(|err| match err {
            RepoError::Duplicate { constraint } if constraint.contains("feed_url") => {
                duplicate_feed_error()
            }
            other => PodcastFormError::Repo(other),
        })?;

        if let Some(listener_id) = listener_id {
            self.listeners
                .add_interest(listener_id, podcast.id, true)
                .await?;
        }

        counter!("podarchive_podcasts_created_total").increment(1);
        info!(
            target = "podarchive::podcasts",
            podcast = %podcast.slug,
            feed_url = %podcast.feed_url,
            "podcast created"
        );

        Ok(podcast)
    }

    pub async fn create_from_url(
        &self,
        command: NewFromUrlCommand,
    ) -> Result<PodcastRecord, PodcastFormError> {
        if let Some(listener_id) = command.listener_id {
            self.listeners
                .find_listener(listener_id)
                .await?
                .ok_or(PodcastFormError::UnknownListener)?;
        }

        let cleaned = self.clean(&command.feed_url).await?;
        self.save(cleaned, command.listener_id).await
    }

    async fn unique_slug(&self, title: &str) -> Result<String, PodcastFormError> {
        let source = if derive_slug(title).is_ok() {
            title
        } else {
            PODCAST_SLUG_FALLBACK
        };

        let podcasts = self.podcasts.clone();
        generate_unique_slug_async(source, PODCAST_SLUG_MAX_LEN, move |candidate| {
            let podcasts = podcasts.clone();
            let candidate = candidate.to_string();
            async move { podcasts.slug_exists(&candidate).await.map(|taken| !taken) }
        })
        .await
        .map_err(|err| match err {
            SlugAsyncError::Slug(err) => PodcastFormError::Slug(err),
            SlugAsyncError::Predicate(err) => PodcastFormError::Repo(err),
        })
    }

    async fn ensure_listener(&self, listener_id: Uuid) -> Result<(), PodcastError> {
        self.listeners
            .find_listener(listener_id)
            .await?
            .map(|_| ())
            .ok_or(PodcastError::UnknownListener)
    }
}

fn duplicate_feed_error() -> PodcastFormError {
    PodcastFormError::Invalid(FormErrors::field(FEED_URL_FIELD, DUPLICATE_FEED_MESSAGE))
}

fn too_long_error() -> FormErrors {
    FormErrors::field(
        FEED_URL_FIELD,
        format!("Ensure this value has at most {FEED_URL_MAX_LEN} characters."),
    )
}

fn parse_feed_url(raw: &str) -> Result<Url, FormErrors> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(FormErrors::field(FEED_URL_FIELD, "This field is required."));
    }
    if trimmed.len() > FEED_URL_MAX_LEN {
        return Err(too_long_error());
    }

    let url = Url::parse(trimmed)
        .map_err(|_| FormErrors::field(FEED_URL_FIELD, "Enter a valid URL."))?;
    if !matches!(url.scheme(), "http" | "https") || url.host_str().is_none() {
        return Err(FormErrors::field(FEED_URL_FIELD, "Enter a valid URL."));
    }
    // Percent-encoding and punycode can grow the stored form past the input.
    if url.as_str().len() > FEED_URL_MAX_LEN {
        return Err(too_long_error());
    }

    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_feed_url_requires_a_value() {
        let errors = parse_feed_url("   ").expect_err("blank url");
        assert_eq!(errors.for_field(FEED_URL_FIELD), ["This field is required."]);
    }

    #[test]
    fn parse_feed_url_rejects_non_http_schemes() {
        for raw in ["ftp://example.com/feed.xml", "not a url", "mailto:a@b.c"] {
            let errors = parse_feed_url(raw).expect_err("invalid url");
            assert_eq!(errors.for_field(FEED_URL_FIELD), ["Enter a valid URL."]);
        }
    }

    #[test]
    fn parse_feed_url_limits_the_encoded_length() {
        let raw = format!("https://feeds.example.com/{}", "\u{e9}".repeat(900));
        assert!(raw.len() <= FEED_URL_MAX_LEN);

        let errors = parse_feed_url(&raw).expect_err("encoded url too long");
        assert_eq!(
            errors.for_field(FEED_URL_FIELD),
            [format!("Ensure this value has at most {FEED_URL_MAX_LEN} characters.")]
        );
    }

    #[test]
    fn parse_feed_url_trims_whitespace() {
        let url = parse_feed_url("  https://feeds.example.com/show.xml \n").expect("url");
        assert_eq!(url.as_str(), "https://feeds.example.com/show.xml");
    }
}
