//! Feed fetching collaborator used while validating new podcasts.

use async_trait::async_trait;
use thiserror::Error;
use url::Url;

/// Channel-level metadata extracted from a podcast feed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedInfo {
    pub title: String,
    pub subtitle: Option<String>,
    pub description: Option<String>,
    pub link: Option<String>,
    pub image_url: Option<String>,
    pub author: Option<String>,
    pub language: Option<String>,
    pub episode_count: usize,
}

#[derive(Debug, Error)]
pub enum FeedFetchError {
    #[error("feed request failed: {0}")]
    Transport(String),
    #[error("feed server answered with status {status}")]
    Status { status: u16 },
    #[error("feed body exceeds {limit} bytes")]
    TooLarge { limit: u64 },
    #[error("feed could not be parsed: {0}")]
    Parse(String),
    #[error("feed has no title")]
    MissingTitle,
}

#[async_trait]
pub trait FeedFetcher: Send + Sync {
    /// Download and parse the feed behind `url`.
    async fn fetch(&self, url: &Url) -> Result<FeedInfo, FeedFetchError>;
}
