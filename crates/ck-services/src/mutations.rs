//! Project and task mutations
//!
//! Writes go to the store first; the session workspace is then updated so
//! callers always observe the change. A failed create falls back to a locally
//! synthesized record, and a failed update is applied to the workspace copy
//! anyway. Durability is therefore best-effort by design of the caller-facing
//! contract: the in-session view never reports a write failure.

use std::sync::Arc;

use chrono::Utc;
use ck_core::traits::Id;
use ck_db::ProjectStore;
use ck_models::{
    CreateProjectInput, Project, ProjectMember, ProjectPatch, Task, TaskInput, TaskPatch,
};
use tracing::{error, warn};
use uuid::Uuid;

use crate::aggregation::ProjectLoader;
use crate::workspace::Workspace;

/// Write-through mutation layer over a session workspace
pub struct ProjectService<S: ?Sized> {
    store: Arc<S>,
    loader: ProjectLoader<S>,
}

impl<S: ProjectStore + ?Sized> ProjectService<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self {
            loader: ProjectLoader::new(Arc::clone(&store)),
            store,
        }
    }

    pub fn loader(&self) -> &ProjectLoader<S> {
        &self.loader
    }

    /// Populate the workspace from the store
    pub async fn refresh(&self, workspace: &mut Workspace) {
        workspace.projects = self.loader.load_projects(workspace.user_id()).await;
    }

    /// Create a project. On success the full aggregation is re-run so the
    /// workspace also picks up store-side changes; on failure a local record
    /// is synthesized so the session still sees the project it just created.
    pub async fn create_project(&self, workspace: &mut Workspace, input: CreateProjectInput) -> Id {
        let owner_id = workspace.user_id();

        match self.store.insert_project(owner_id, &input).await {
            Ok(row) => {
                let project_id = row.id;
                if !input.members.is_empty() {
                    if let Err(e) = self.store.insert_members(project_id, &input.members).await {
                        // Membership insert failure leaves a memberless
                        // project rather than rolling the create back.
                        warn!(%project_id, error = %e, "Error inserting project members");
                    }
                }
                self.refresh(workspace).await;
                project_id
            }
            Err(e) => {
                error!(error = %e, "Error creating project, keeping local copy");
                let project = local_project(Uuid::new_v4(), owner_id, &input);
                let id = project.id;
                workspace.projects.push(project);
                id
            }
        }
    }

    /// Add a task to a project. Same contract as project creation: a
    /// successful insert re-runs the full aggregation, a failed one appends
    /// a local record so the workspace always gains the task.
    pub async fn create_task(
        &self,
        workspace: &mut Workspace,
        project_id: Id,
        input: TaskInput,
    ) -> Option<Id> {
        workspace.project(project_id)?;

        match self.store.insert_task(project_id, &input).await {
            Ok(row) => {
                let id = row.id;
                self.refresh(workspace).await;
                Some(id)
            }
            Err(e) => {
                error!(%project_id, error = %e, "Error creating task, keeping local copy");
                let task = local_task(Uuid::new_v4(), project_id, &input);
                let id = task.id;
                if let Some(project) = workspace.project_mut(project_id) {
                    project.tasks.push(task);
                }
                Some(id)
            }
        }
    }

    /// Apply a partial update to a project. The workspace copy is patched
    /// whether or not the store write succeeded.
    pub async fn update_project(
        &self,
        workspace: &mut Workspace,
        project_id: Id,
        patch: ProjectPatch,
    ) -> bool {
        if workspace.project(project_id).is_none() {
            return false;
        }

        if let Err(e) = self.store.update_project(project_id, &patch).await {
            error!(%project_id, error = %e, "Error persisting project update");
        }
        if let Some(project) = workspace.project_mut(project_id) {
            patch.apply_to(project);
        }
        true
    }

    /// Apply a partial update to a task, same contract as `update_project`
    pub async fn update_task(
        &self,
        workspace: &mut Workspace,
        project_id: Id,
        task_id: Id,
        patch: TaskPatch,
    ) -> bool {
        if workspace.task(project_id, task_id).is_none() {
            return false;
        }

        if let Err(e) = self.store.update_task(task_id, &patch).await {
            error!(%task_id, error = %e, "Error persisting task update");
        }
        if let Some(project) = workspace.project_mut(project_id) {
            if let Some(task) = project.tasks.iter_mut().find(|t| t.id == task_id) {
                patch.apply_to(task);
            }
        }
        true
    }
}

/// Synthesize the project record a successful insert would have produced
fn local_project(id: Id, owner_id: Id, input: &CreateProjectInput) -> Project {
    let phases = Project::normalize_phases(input.phases.clone());
    let current_phase = input
        .current_phase
        .clone()
        .unwrap_or_else(|| phases[0].clone());
    let members = input
        .members
        .iter()
        .map(|m| {
            ProjectMember::normalized(
                Uuid::new_v4(),
                id,
                m.user_id,
                m.name.clone(),
                m.email.clone(),
                m.role.clone(),
                m.avatar.clone(),
                Some(m.contribution_percentage),
                Some(m.tasks_completed),
                Some(m.hours_logged),
            )
        })
        .collect();

    Project {
        id,
        title: input.title.clone(),
        description: input.description.clone(),
        created_by: owner_id,
        members,
        tasks: Vec::new(),
        phases,
        current_phase,
        deadline: input.deadline,
        status: input.status,
        created_at: Utc::now(),
    }
}

fn local_task(id: Id, project_id: Id, input: &TaskInput) -> Task {
    Task {
        id,
        project_id,
        title: input.title.clone(),
        description: input.description.clone(),
        assigned_to: input.assigned_to.clone(),
        status: input.status,
        tags: input.tags.clone(),
        deadline: input.deadline,
        hours_logged: input.hours_logged,
        priority: input.priority,
    }
}
