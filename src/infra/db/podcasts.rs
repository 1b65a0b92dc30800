use async_trait::async_trait;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::{
    application::repos::{CreatePodcastParams, PodcastsRepo, RepoError},
    domain::entities::PodcastRecord,
};

use super::{PostgresRepositories, map_sqlx_error};

pub(super) const PODCAST_COLUMNS: &str = "p.id, p.feed_url, p.title, p.slug, p.subtitle, \
    p.description, p.link, p.image_url, p.author, p.language, p.created_at, p.updated_at";

#[derive(sqlx::FromRow)]
pub(super) struct PodcastRow {
    id: Uuid,
    feed_url: String,
    title: String,
    slug: String,
    subtitle: Option<String>,
    description: Option<String>,
    link: Option<String>,
    image_url: Option<String>,
    author: Option<String>,
    language: Option<String>,
    created_at: OffsetDateTime,
    updated_at: OffsetDateTime,
}

impl From<PodcastRow> for PodcastRecord {
    fn from(row: PodcastRow) -> Self {
        Self {
            id: row.id,
            feed_url: row.feed_url,
            title: row.title,
            slug: row.slug,
            subtitle: row.subtitle,
            description: row.description,
            link: row.link,
            image_url: row.image_url,
            author: row.author,
            language: row.language,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[async_trait]
impl PodcastsRepo for PostgresRepositories {
    async fn list_podcasts(&self) -> Result<Vec<PodcastRecord>, RepoError> {
        let sql = format!("SELECT {PODCAST_COLUMNS} FROM podcasts p ORDER BY LOWER(p.title), p.slug");
        let rows = sqlx::query_as::<_, PodcastRow>(&sql)
            .fetch_all(self.pool())
            .await
            .map_err(map_sqlx_error)?;

        Ok(rows.into_iter().map(PodcastRecord::from).collect())
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<PodcastRecord>, RepoError> {
        let sql = format!("SELECT {PODCAST_COLUMNS} FROM podcasts p WHERE p.slug = $1");
        let row = sqlx::query_as::<_, PodcastRow>(&sql)
            .bind(slug)
            .fetch_optional(self.pool())
            .await
            .map_err(map_sqlx_error)?;

        Ok(row.map(PodcastRecord::from))
    }

    async fn find_by_feed_url(&self, feed_url: &str) -> Result<Option<PodcastRecord>, RepoError> {
        let sql = format!("SELECT {PODCAST_COLUMNS} FROM podcasts p WHERE p.feed_url = $1");
        let row = sqlx::query_as::<_, PodcastRow>(&sql)
            .bind(feed_url)
            .fetch_optional(self.pool())
            .await
            .map_err(map_sqlx_error)?;

        Ok(row.map(PodcastRecord::from))
    }

    async fn slug_exists(&self, slug: &str) -> Result<bool, RepoError> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS (SELECT 1 FROM podcasts WHERE slug = $1)")
            .bind(slug)
            .fetch_one(self.pool())
            .await
            .map_err(map_sqlx_error)
    }

    async fn create_podcast(
        &self,
        params: CreatePodcastParams,
    ) -> Result<PodcastRecord, RepoError> {
        let row = sqlx::query_as::<_, PodcastRow>(
            r#"
            INSERT INTO podcasts (
                id, feed_url, title, slug, subtitle, description, link, image_url, author,
                language
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING id, feed_url, title, slug, subtitle, description, link, image_url,
                      author, language, created_at, updated_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&params.feed_url)
        .bind(&params.title)
        .bind(&params.slug)
        .bind(params.subtitle.as_deref())
        .bind(params.description.as_deref())
        .bind(params.link.as_deref())
        .bind(params.image_url.as_deref())
        .bind(params.author.as_deref())
        .bind(params.language.as_deref())
        .fetch_one(self.pool())
        .await
        .map_err(map_sqlx_error)?;

        Ok(PodcastRecord::from(row))
    }
}
