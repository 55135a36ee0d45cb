//! Repository error type and the store trait the service layer consumes.
//!
//! `ProjectStore` is the seam between the aggregation/mutation logic and
//! the backing store; the Postgres implementation lives in this crate and
//! tests supply an in-memory double.

use async_trait::async_trait;
use ck_core::traits::Id;
use ck_models::{CreateProjectInput, MemberInput, ProjectPatch, TaskInput, TaskPatch};

use crate::members::MemberRow;
use crate::projects::ProjectRow;
use crate::tasks::TaskRow;

/// Error type for repository operations
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("Entity not found: {0}")]
    NotFound(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Conflict: {0}")]
    Conflict(String),
}

/// Result type for repository operations
pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Store operations for projects, memberships, and tasks.
///
/// The aggregation layer issues the owned/member/hydration queries through
/// this trait; the mutation layer issues writes through it.
#[async_trait]
pub trait ProjectStore: Send + Sync {
    /// Projects where the given identity is the creator
    async fn projects_owned_by(&self, owner_id: Id) -> RepositoryResult<Vec<ProjectRow>>;

    /// Membership index: project ids the identity appears in
    async fn member_project_ids(&self, user_id: Id) -> RepositoryResult<Vec<Id>>;

    /// Projects by id set. Callers must not invoke this with an empty set.
    async fn projects_by_ids(&self, ids: &[Id]) -> RepositoryResult<Vec<ProjectRow>>;

    /// Single project lookup
    async fn find_project(&self, id: Id) -> RepositoryResult<Option<ProjectRow>>;

    /// Members of a project
    async fn members_of(&self, project_id: Id) -> RepositoryResult<Vec<MemberRow>>;

    /// Tasks of a project
    async fn tasks_of(&self, project_id: Id) -> RepositoryResult<Vec<TaskRow>>;

    /// Insert a project row; server assigns id and creation timestamp
    async fn insert_project(
        &self,
        owner_id: Id,
        input: &CreateProjectInput,
    ) -> RepositoryResult<ProjectRow>;

    /// Bulk-insert membership rows for a freshly created project
    async fn insert_members(
        &self,
        project_id: Id,
        members: &[MemberInput],
    ) -> RepositoryResult<()>;

    /// Insert a task row
    async fn insert_task(&self, project_id: Id, input: &TaskInput) -> RepositoryResult<TaskRow>;

    /// Partial update of a project row
    async fn update_project(&self, id: Id, patch: &ProjectPatch) -> RepositoryResult<()>;

    /// Partial update of a task row
    async fn update_task(&self, task_id: Id, patch: &TaskPatch) -> RepositoryResult<()>;

    /// Delete a project and cascade to its members, tasks, and videos
    async fn delete_project(&self, id: Id) -> RepositoryResult<()>;
}
