use async_trait::async_trait;
use time::OffsetDateTime;

use crate::{
    application::repos::{RepoError, SettingsRepo},
    domain::entities::{PodcastsSettingsRecord, SiteRecord},
};

use super::{PostgresRepositories, map_sqlx_error};

#[derive(sqlx::FromRow)]
struct PodcastsSettingsRow {
    storage_directory: Option<String>,
    naming_scheme: String,
    updated_at: OffsetDateTime,
}

impl From<PodcastsSettingsRow> for PodcastsSettingsRecord {
    fn from(row: PodcastsSettingsRow) -> Self {
        Self {
            storage_directory: row.storage_directory,
            naming_scheme: row.naming_scheme,
            updated_at: row.updated_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct SiteRow {
    id: i32,
    domain: String,
    name: String,
}

impl From<SiteRow> for SiteRecord {
    fn from(row: SiteRow) -> Self {
        Self {
            id: row.id,
            domain: row.domain,
            name: row.name,
        }
    }
}

#[async_trait]
impl SettingsRepo for PostgresRepositories {
    async fn load_podcasts_settings(&self) -> Result<PodcastsSettingsRecord, RepoError> {
        let row = sqlx::query_as::<_, PodcastsSettingsRow>(
            r#"
            SELECT storage_directory, naming_scheme, updated_at
            FROM podcasts_settings
            WHERE id = 1
            "#,
        )
        .fetch_optional(self.pool())
        .await
        .map_err(map_sqlx_error)?;

        let row =
            row.ok_or_else(|| RepoError::from_persistence("podcasts settings row missing"))?;

        Ok(PodcastsSettingsRecord::from(row))
    }

    async fn upsert_podcasts_settings(
        &self,
        settings: PodcastsSettingsRecord,
    ) -> Result<(), RepoError> {
        sqlx::query(
            r#"
            INSERT INTO podcasts_settings (id, storage_directory, naming_scheme, updated_at)
            VALUES (1, $1, $2, $3)
            ON CONFLICT (id) DO UPDATE SET
                storage_directory = EXCLUDED.storage_directory,
                naming_scheme = EXCLUDED.naming_scheme,
                updated_at = EXCLUDED.updated_at
            "#,
        )
        .bind(settings.storage_directory.as_deref())
        .bind(&settings.naming_scheme)
        .bind(settings.updated_at)
        .execute(self.pool())
        .await
        .map_err(map_sqlx_error)?;

        Ok(())
    }

    async fn load_site(&self) -> Result<SiteRecord, RepoError> {
        let row = sqlx::query_as::<_, SiteRow>("SELECT id, domain, name FROM sites WHERE id = 1")
            .fetch_optional(self.pool())
            .await
            .map_err(map_sqlx_error)?;

        let row = row.ok_or_else(|| RepoError::from_persistence("site row missing"))?;

        Ok(SiteRecord::from(row))
    }

    async fn update_site_domain(&self, domain: &str) -> Result<SiteRecord, RepoError> {
        let row = sqlx::query_as::<_, SiteRow>(
            r#"
            UPDATE sites
            SET domain = $1
            WHERE id = 1
            RETURNING id, domain, name
            "#,
        )
        .bind(domain)
        .fetch_one(self.pool())
        .await
        .map_err(map_sqlx_error)?;

        Ok(SiteRecord::from(row))
    }
}
