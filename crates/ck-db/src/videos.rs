//! Generated-video repository
//!
//! Table: generated_videos.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use ck_core::traits::Id;
use ck_models::GeneratedVideo;
use sqlx::{FromRow, PgPool};

use crate::repository::RepositoryResult;

#[derive(Debug, Clone, FromRow)]
pub struct VideoRow {
    pub id: Id,
    pub project_id: Id,
    pub user_id: Option<Id>,
    pub video_url: String,
    pub script: String,
    pub generation_status: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
}

impl VideoRow {
    pub fn into_domain(self) -> GeneratedVideo {
        GeneratedVideo {
            id: self.id,
            project_id: self.project_id,
            user_id: self.user_id,
            video_url: self.video_url,
            script: self.script,
            generation_status: self.generation_status.unwrap_or_else(|| "completed".into()),
            created_at: self.created_at.unwrap_or_else(Utc::now),
        }
    }
}

/// Store operations for generated-video records
#[async_trait]
pub trait VideoStore: Send + Sync {
    /// Persist a completed video and return the stored record
    async fn insert_video(
        &self,
        project_id: Id,
        user_id: Option<Id>,
        video_url: &str,
        script: &str,
    ) -> RepositoryResult<GeneratedVideo>;

    /// Videos for a project, newest first
    async fn videos_of(&self, project_id: Id) -> RepositoryResult<Vec<GeneratedVideo>>;

    /// Delete a video record
    async fn delete_video(&self, id: Id) -> RepositoryResult<()>;
}

/// Postgres-backed video store
pub struct PgVideoStore {
    pool: PgPool,
}

impl PgVideoStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl VideoStore for PgVideoStore {
    async fn insert_video(
        &self,
        project_id: Id,
        user_id: Option<Id>,
        video_url: &str,
        script: &str,
    ) -> RepositoryResult<GeneratedVideo> {
        let row = sqlx::query_as::<_, VideoRow>(
            r#"
            INSERT INTO generated_videos (project_id, user_id, video_url, script,
                                          generation_status, created_at)
            VALUES ($1, $2, $3, $4, 'completed', NOW())
            RETURNING id, project_id, user_id, video_url, script,
                      generation_status, created_at
            "#,
        )
        .bind(project_id)
        .bind(user_id)
        .bind(video_url)
        .bind(script)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into_domain())
    }

    async fn videos_of(&self, project_id: Id) -> RepositoryResult<Vec<GeneratedVideo>> {
        let rows = sqlx::query_as::<_, VideoRow>(
            r#"
            SELECT id, project_id, user_id, video_url, script,
                   generation_status, created_at
            FROM generated_videos
            WHERE project_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(project_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(VideoRow::into_domain).collect())
    }

    async fn delete_video(&self, id: Id) -> RepositoryResult<()> {
        sqlx::query("DELETE FROM generated_videos WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
