//! Repository traits describing persistence adapters.

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::domain::entities::{
    ListenerRecord, PodcastRecord, PodcastsSettingsRecord, SiteRecord,
};

#[derive(Debug, Error)]
pub enum RepoError {
    #[error("persistence error: {0}")]
    Persistence(String),
    #[error("duplicate record violates unique constraint `{constraint}`")]
    Duplicate { constraint: String },
    #[error("resource not found")]
    NotFound,
    #[error("invalid input: {message}")]
    InvalidInput { message: String },
    #[error("integrity error: {message}")]
    Integrity { message: String },
    #[error("database timeout")]
    Timeout,
}

impl RepoError {
    pub fn from_persistence(err: impl std::fmt::Display) -> Self {
        Self::Persistence(err.to_string())
    }
}

#[derive(Debug, Clone)]
pub struct CreatePodcastParams {
    pub feed_url: String,
    pub title: String,
    pub slug: String,
    pub subtitle: Option<String>,
    pub description: Option<String>,
    pub link: Option<String>,
    pub image_url: Option<String>,
    pub author: Option<String>,
    pub language: Option<String>,
}

#[async_trait]
pub trait PodcastsRepo: Send + Sync {
    /// All podcasts, ordered by title.
    async fn list_podcasts(&self) -> Result<Vec<PodcastRecord>, RepoError>;

    async fn find_by_slug(&self, slug: &str) -> Result<Option<PodcastRecord>, RepoError>;

    async fn find_by_feed_url(&self, feed_url: &str) -> Result<Option<PodcastRecord>, RepoError>;

    async fn slug_exists(&self, slug: &str) -> Result<bool, RepoError>;

    async fn create_podcast(&self, params: CreatePodcastParams)
    -> Result<PodcastRecord, RepoError>;
}

#[async_trait]
pub trait ListenersRepo: Send + Sync {
    async fn find_listener(&self, id: Uuid) -> Result<Option<ListenerRecord>, RepoError>;

    /// Podcasts the listener has shown interest in, ordered by title.
    async fn list_interested(&self, listener_id: Uuid) -> Result<Vec<PodcastRecord>, RepoError>;

    async fn list_subscribed_ids(&self, listener_id: Uuid) -> Result<Vec<Uuid>, RepoError>;

    /// Mark a podcast as interesting to the listener, optionally subscribing too.
    async fn add_interest(
        &self,
        listener_id: Uuid,
        podcast_id: Uuid,
        subscribe: bool,
    ) -> Result<(), RepoError>;

    async fn set_subscribed(
        &self,
        listener_id: Uuid,
        podcast_id: Uuid,
        subscribed: bool,
    ) -> Result<(), RepoError>;

    /// Replace the listener's whole subscription set.
    async fn replace_subscriptions(
        &self,
        listener_id: Uuid,
        podcast_ids: &[Uuid],
    ) -> Result<(), RepoError>;
}

#[async_trait]
pub trait SettingsRepo: Send + Sync {
    async fn load_podcasts_settings(&self) -> Result<PodcastsSettingsRecord, RepoError>;

    async fn upsert_podcasts_settings(
        &self,
        settings: PodcastsSettingsRecord,
    ) -> Result<(), RepoError>;

    async fn load_site(&self) -> Result<SiteRecord, RepoError>;

    async fn update_site_domain(&self, domain: &str) -> Result<SiteRecord, RepoError>;
}

#[async_trait]
pub trait HealthRepo: Send + Sync {
    async fn ping(&self) -> Result<(), RepoError>;
}
