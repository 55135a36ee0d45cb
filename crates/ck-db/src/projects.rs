//! Project repository
//!
//! Table: projects. `PgProjectStore` is the Postgres implementation of the
//! `ProjectStore` seam; hydration and fallback policy live in the service
//! layer, not here.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use ck_core::traits::Id;
use ck_models::{
    CreateProjectInput, MemberInput, Project, ProjectPatch, ProjectStatus, TaskInput, TaskPatch,
};
use sqlx::types::Json;
use sqlx::{FromRow, PgPool};

use crate::members::MemberRow;
use crate::repository::{ProjectStore, RepositoryError, RepositoryResult};
use crate::tasks::TaskRow;

/// Project row from database
#[derive(Debug, Clone, FromRow)]
pub struct ProjectRow {
    pub id: Id,
    pub title: String,
    pub description: Option<String>,
    pub created_by: Id,
    pub phases: Option<Json<Vec<String>>>,
    pub current_phase: Option<String>,
    pub deadline: Option<DateTime<Utc>>,
    pub status: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
}

impl ProjectRow {
    /// Assemble the hydrated domain entity from this row plus its loaded
    /// members and tasks, applying the read-time normalization defaults.
    pub fn into_domain(self, members: Vec<MemberRow>, tasks: Vec<TaskRow>) -> Project {
        let phases =
            Project::normalize_phases(self.phases.map(|Json(p)| p).unwrap_or_default());
        Project {
            id: self.id,
            title: self.title,
            description: self.description.unwrap_or_default(),
            created_by: self.created_by,
            members: members.into_iter().map(MemberRow::into_domain).collect(),
            tasks: tasks.into_iter().map(TaskRow::into_domain).collect(),
            current_phase: self
                .current_phase
                .unwrap_or_else(|| phases[0].clone()),
            phases,
            deadline: self.deadline.unwrap_or_else(Utc::now),
            status: self
                .status
                .as_deref()
                .map(ProjectStatus::parse)
                .unwrap_or_default(),
            created_at: self.created_at.unwrap_or_else(Utc::now),
        }
    }
}

const PROJECT_COLUMNS: &str =
    "id, title, description, created_by, phases, current_phase, deadline, status, created_at";

/// Postgres-backed project store
pub struct PgProjectStore {
    pool: PgPool,
}

impl PgProjectStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProjectStore for PgProjectStore {
    async fn projects_owned_by(&self, owner_id: Id) -> RepositoryResult<Vec<ProjectRow>> {
        let rows = sqlx::query_as::<_, ProjectRow>(&format!(
            "SELECT {PROJECT_COLUMNS} FROM projects WHERE created_by = $1 ORDER BY created_at"
        ))
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    async fn member_project_ids(&self, user_id: Id) -> RepositoryResult<Vec<Id>> {
        let ids = sqlx::query_scalar::<_, Id>(
            "SELECT project_id FROM project_members WHERE user_id = $1",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(ids)
    }

    async fn projects_by_ids(&self, ids: &[Id]) -> RepositoryResult<Vec<ProjectRow>> {
        let rows = sqlx::query_as::<_, ProjectRow>(&format!(
            "SELECT {PROJECT_COLUMNS} FROM projects WHERE id = ANY($1) ORDER BY created_at"
        ))
        .bind(ids)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    async fn find_project(&self, id: Id) -> RepositoryResult<Option<ProjectRow>> {
        let row = sqlx::query_as::<_, ProjectRow>(&format!(
            "SELECT {PROJECT_COLUMNS} FROM projects WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    async fn members_of(&self, project_id: Id) -> RepositoryResult<Vec<MemberRow>> {
        let rows = sqlx::query_as::<_, MemberRow>(
            r#"
            SELECT id, project_id, user_id, name, email, role, avatar,
                   contribution_percentage, tasks_completed, hours_logged
            FROM project_members
            WHERE project_id = $1
            "#,
        )
        .bind(project_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    async fn tasks_of(&self, project_id: Id) -> RepositoryResult<Vec<TaskRow>> {
        let rows = sqlx::query_as::<_, TaskRow>(
            r#"
            SELECT id, project_id, title, description, assigned_to, status,
                   tags, deadline, hours_logged, priority
            FROM project_tasks
            WHERE project_id = $1
            "#,
        )
        .bind(project_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    async fn insert_project(
        &self,
        owner_id: Id,
        input: &CreateProjectInput,
    ) -> RepositoryResult<ProjectRow> {
        let phases = Project::normalize_phases(input.phases.clone());
        let current_phase = input
            .current_phase
            .clone()
            .unwrap_or_else(|| phases[0].clone());

        let row = sqlx::query_as::<_, ProjectRow>(&format!(
            r#"
            INSERT INTO projects (title, description, created_by, phases,
                                  current_phase, deadline, status, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, NOW())
            RETURNING {PROJECT_COLUMNS}
            "#
        ))
        .bind(&input.title)
        .bind(&input.description)
        .bind(owner_id)
        .bind(Json(&phases))
        .bind(&current_phase)
        .bind(input.deadline)
        .bind(input.status.as_str())
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    async fn insert_members(
        &self,
        project_id: Id,
        members: &[MemberInput],
    ) -> RepositoryResult<()> {
        let mut tx = self.pool.begin().await?;
        for member in members {
            sqlx::query(
                r#"
                INSERT INTO project_members (project_id, user_id, name, email, role,
                                             avatar, contribution_percentage,
                                             tasks_completed, hours_logged)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
                "#,
            )
            .bind(project_id)
            .bind(member.user_id)
            .bind(&member.name)
            .bind(&member.email)
            .bind(&member.role)
            .bind(&member.avatar)
            .bind(member.contribution_percentage)
            .bind(member.tasks_completed)
            .bind(member.hours_logged)
            .execute(&mut *tx)
            .await?;
        }
        tx.commit().await?;

        Ok(())
    }

    async fn insert_task(&self, project_id: Id, input: &TaskInput) -> RepositoryResult<TaskRow> {
        let row = sqlx::query_as::<_, TaskRow>(
            r#"
            INSERT INTO project_tasks (project_id, title, description, assigned_to,
                                       status, tags, deadline, hours_logged, priority)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING id, project_id, title, description, assigned_to, status,
                      tags, deadline, hours_logged, priority
            "#,
        )
        .bind(project_id)
        .bind(&input.title)
        .bind(&input.description)
        .bind(&input.assigned_to)
        .bind(input.status.as_str())
        .bind(Json(&input.tags))
        .bind(input.deadline)
        .bind(input.hours_logged)
        .bind(input.priority.as_str())
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    async fn update_project(&self, id: Id, patch: &ProjectPatch) -> RepositoryResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE projects SET
                title = COALESCE($1, title),
                description = COALESCE($2, description),
                phases = COALESCE($3, phases),
                current_phase = COALESCE($4, current_phase),
                deadline = COALESCE($5, deadline),
                status = COALESCE($6, status)
            WHERE id = $7
            "#,
        )
        .bind(&patch.title)
        .bind(&patch.description)
        .bind(patch.phases.as_ref().map(Json))
        .bind(&patch.current_phase)
        .bind(patch.deadline)
        .bind(patch.status.map(|s| s.as_str()))
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound(format!(
                "Project with id {id} not found"
            )));
        }

        Ok(())
    }

    async fn update_task(&self, task_id: Id, patch: &TaskPatch) -> RepositoryResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE project_tasks SET
                title = COALESCE($1, title),
                description = COALESCE($2, description),
                assigned_to = COALESCE($3, assigned_to),
                status = COALESCE($4, status),
                tags = COALESCE($5, tags),
                deadline = COALESCE($6, deadline),
                hours_logged = COALESCE($7, hours_logged),
                priority = COALESCE($8, priority)
            WHERE id = $9
            "#,
        )
        .bind(&patch.title)
        .bind(&patch.description)
        .bind(&patch.assigned_to)
        .bind(patch.status.map(|s| s.as_str()))
        .bind(patch.tags.as_ref().map(Json))
        .bind(patch.deadline)
        .bind(patch.hours_logged)
        .bind(patch.priority.map(|p| p.as_str()))
        .bind(task_id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound(format!(
                "Task with id {task_id} not found"
            )));
        }

        Ok(())
    }

    async fn delete_project(&self, id: Id) -> RepositoryResult<()> {
        // Cascade: members, tasks, and videos go with the project.
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM project_tasks WHERE project_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM project_members WHERE project_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM generated_videos WHERE project_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        let result = sqlx::query("DELETE FROM projects WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound(format!(
                "Project with id {id} not found"
            )));
        }

        tx.commit().await?;
        Ok(())
    }
}
