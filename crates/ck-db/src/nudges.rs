//! Nudge repository
//!
//! Table: ai_nudges. Persistence here is best effort: the endpoint logs a
//! failed insert and still answers the caller.

use async_trait::async_trait;
use ck_core::traits::Id;
use sqlx::PgPool;

use crate::repository::RepositoryResult;

/// Store operations for nudge records
#[async_trait]
pub trait NudgeStore: Send + Sync {
    /// Persist a delivered nudge; returns the stored row id
    async fn insert_nudge(
        &self,
        project_id: Id,
        user_id: Id,
        nudge_type: &str,
        message: &str,
        voice_url: &str,
    ) -> RepositoryResult<Id>;
}

/// Postgres-backed nudge store
pub struct PgNudgeStore {
    pool: PgPool,
}

impl PgNudgeStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl NudgeStore for PgNudgeStore {
    async fn insert_nudge(
        &self,
        project_id: Id,
        user_id: Id,
        nudge_type: &str,
        message: &str,
        voice_url: &str,
    ) -> RepositoryResult<Id> {
        let id = sqlx::query_scalar::<_, Id>(
            r#"
            INSERT INTO ai_nudges (project_id, user_id, nudge_type, message,
                                   voice_url, created_at)
            VALUES ($1, $2, $3, $4, $5, NOW())
            RETURNING id
            "#,
        )
        .bind(project_id)
        .bind(user_id)
        .bind(nudge_type)
        .bind(message)
        .bind(voice_url)
        .fetch_one(&self.pool)
        .await?;

        Ok(id)
    }
}
