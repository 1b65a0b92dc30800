//! Domain entities mirrored from persistent storage.

use serde::Serialize;
use time::OffsetDateTime;
use uuid::Uuid;

/// Upper bound for `podcasts.slug`, including any collision suffix.
pub const PODCAST_SLUG_MAX_LEN: usize = 50;

/// Fallback slug base for titles that slugify to nothing.
pub const PODCAST_SLUG_FALLBACK: &str = "podcast";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PodcastRecord {
    pub id: Uuid,
    pub feed_url: String,
    pub title: String,
    pub slug: String,
    pub subtitle: Option<String>,
    pub description: Option<String>,
    pub link: Option<String>,
    pub image_url: Option<String>,
    pub author: Option<String>,
    pub language: Option<String>,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListenerRecord {
    pub id: Uuid,
    pub user_id: Uuid,
    pub username: String,
    /// Seconds; not editable until playback controls ship.
    pub playback_seek_forward_by: i32,
    pub playback_seek_backward_by: i32,
    pub created_at: OffsetDateTime,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PodcastsSettingsRecord {
    pub storage_directory: Option<String>,
    pub naming_scheme: String,
    pub updated_at: OffsetDateTime,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SiteRecord {
    pub id: i32,
    pub domain: String,
    pub name: String,
}
