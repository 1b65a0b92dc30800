use async_trait::async_trait;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::{
    application::repos::{ListenersRepo, RepoError},
    domain::entities::{ListenerRecord, PodcastRecord},
};

use super::{
    PostgresRepositories, map_sqlx_error,
    podcasts::{PODCAST_COLUMNS, PodcastRow},
};

#[derive(sqlx::FromRow)]
struct ListenerRow {
    id: Uuid,
    user_id: Uuid,
    username: String,
    playback_seek_forward_by: i32,
    playback_seek_backward_by: i32,
    created_at: OffsetDateTime,
}

impl From<ListenerRow> for ListenerRecord {
    fn from(row: ListenerRow) -> Self {
        Self {
            id: row.id,
            user_id: row.user_id,
            username: row.username,
            playback_seek_forward_by: row.playback_seek_forward_by,
            playback_seek_backward_by: row.playback_seek_backward_by,
            created_at: row.created_at,
        }
    }
}

#[async_trait]
impl ListenersRepo for PostgresRepositories {
    async fn find_listener(&self, id: Uuid) -> Result<Option<ListenerRecord>, RepoError> {
        let row = sqlx::query_as::<_, ListenerRow>(
            r#"
            SELECT id, user_id, username, playback_seek_forward_by,
                   playback_seek_backward_by, created_at
            FROM listeners
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool())
        .await
        .map_err(map_sqlx_error)?;

        Ok(row.map(ListenerRecord::from))
    }

    async fn list_interested(&self, listener_id: Uuid) -> Result<Vec<PodcastRecord>, RepoError> {
        let sql = format!(
            "SELECT {PODCAST_COLUMNS} FROM podcasts p \
             INNER JOIN listener_interested_podcasts lip ON lip.podcast_id = p.id \
             WHERE lip.listener_id = $1 \
             ORDER BY LOWER(p.title), p.slug"
        );
        let rows = sqlx::query_as::<_, PodcastRow>(&sql)
            .bind(listener_id)
            .fetch_all(self.pool())
            .await
            .map_err(map_sqlx_error)?;

        Ok(rows.into_iter().map(PodcastRecord::from).collect())
    }

    async fn list_subscribed_ids(&self, listener_id: Uuid) -> Result<Vec<Uuid>, RepoError> {
        sqlx::query_scalar::<_, Uuid>(
            "SELECT podcast_id FROM listener_subscribed_podcasts WHERE listener_id = $1",
        )
        .bind(listener_id)
        .fetch_all(self.pool())
        .await
        .map_err(map_sqlx_error)
    }

    async fn add_interest(
        &self,
        listener_id: Uuid,
        podcast_id: Uuid,
        subscribe: bool,
    ) -> Result<(), RepoError> {
        let mut tx = self.begin().await.map_err(map_sqlx_error)?;

        sqlx::query(
            r#"
            INSERT INTO listener_interested_podcasts (listener_id, podcast_id)
            VALUES ($1, $2)
            ON CONFLICT DO NOTHING
            "#,
        )
        .bind(listener_id)
        .bind(podcast_id)
        .execute(&mut *tx)
        .await
        .map_err(map_sqlx_error)?;

        if subscribe {
            sqlx::query(
                r#"
                INSERT INTO listener_subscribed_podcasts (listener_id, podcast_id)
                VALUES ($1, $2)
                ON CONFLICT DO NOTHING
                "#,
            )
            .bind(listener_id)
            .bind(podcast_id)
            .execute(&mut *tx)
            .await
            .map_err(map_sqlx_error)?;
        }

        tx.commit().await.map_err(map_sqlx_error)
    }

    async fn set_subscribed(
        &self,
        listener_id: Uuid,
        podcast_id: Uuid,
        subscribed: bool,
    ) -> Result<(), RepoError> {
        if subscribed {
            return self.add_interest(listener_id, podcast_id, true).await;
        }

        sqlx::query(
            "DELETE FROM listener_subscribed_podcasts WHERE listener_id = $1 AND podcast_id = $2",
        )
        .bind(listener_id)
        .bind(podcast_id)
        .execute(self.pool())
        .await
        .map_err(map_sqlx_error)?;

        Ok(())
    }

    async fn replace_subscriptions(
        &self,
        listener_id: Uuid,
        podcast_ids: &[Uuid],
    ) -> Result<(), RepoError> {
        let mut tx = self.begin().await.map_err(map_sqlx_error)?;

        sqlx::query("DELETE FROM listener_subscribed_podcasts WHERE listener_id = $1")
            .bind(listener_id)
            .execute(&mut *tx)
            .await
            .map_err(map_sqlx_error)?;

        if !podcast_ids.is_empty() {
            sqlx::query(
                r#"
                INSERT INTO listener_subscribed_podcasts (listener_id, podcast_id)
                SELECT $1, podcast_id FROM UNNEST($2::uuid[]) AS ids(podcast_id)
                ON CONFLICT DO NOTHING
                "#,
            )
            .bind(listener_id)
            .bind(podcast_ids)
            .execute(&mut *tx)
            .await
            .map_err(map_sqlx_error)?;
        }

        tx.commit().await.map_err(map_sqlx_error)
    }
}
