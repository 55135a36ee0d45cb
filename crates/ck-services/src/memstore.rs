//! In-memory `ProjectStore` double for service-layer tests.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use ck_core::traits::Id;
use ck_db::{MemberRow, ProjectRow, ProjectStore, RepositoryError, RepositoryResult, TaskRow};
use ck_models::{CreateProjectInput, MemberInput, Project, ProjectPatch, TaskInput, TaskPatch};
use sqlx::types::Json;
use uuid::Uuid;

#[derive(Default)]
pub struct InMemoryStore {
    pub projects: Mutex<Vec<ProjectRow>>,
    pub members: Mutex<Vec<MemberRow>>,
    pub tasks: Mutex<Vec<TaskRow>>,
    pub fail_owned_query: AtomicBool,
    pub fail_member_index: AtomicBool,
    pub fail_writes: AtomicBool,
}

fn simulated() -> RepositoryError {
    RepositoryError::Database(sqlx::Error::PoolClosed)
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_project(&self, owner_id: Id) -> Id {
        let id = Uuid::new_v4();
        self.projects.lock().unwrap().push(ProjectRow {
            id,
            title: format!("Project {id}"),
            description: None,
            created_by: owner_id,
            phases: None,
            current_phase: None,
            deadline: None,
            status: None,
            created_at: Some(Utc::now()),
        });
        id
    }

    pub fn add_member(&self, project_id: Id, user_id: Option<Id>) -> Id {
        let id = Uuid::new_v4();
        self.members.lock().unwrap().push(MemberRow {
            id,
            project_id,
            user_id,
            name: "Member".into(),
            email: "member@university.edu".into(),
            role: "Developer".into(),
            avatar: None,
            contribution_percentage: Some(50),
            tasks_completed: Some(1),
            hours_logged: Some(10),
        });
        id
    }

    pub fn add_task(&self, project_id: Id, status: &str) -> Id {
        let id = Uuid::new_v4();
        self.tasks.lock().unwrap().push(TaskRow {
            id,
            project_id,
            title: "Task".into(),
            description: None,
            assigned_to: None,
            status: Some(status.into()),
            tags: None,
            deadline: None,
            hours_logged: Some(2),
            priority: Some("medium".into()),
        });
        id
    }

    pub fn project_row(&self, id: Id) -> Option<ProjectRow> {
        self.projects
            .lock()
            .unwrap()
            .iter()
            .find(|p| p.id == id)
            .cloned()
    }

    pub fn task_row(&self, id: Id) -> Option<TaskRow> {
        self.tasks
            .lock()
            .unwrap()
            .iter()
            .find(|t| t.id == id)
            .cloned()
    }

    /// Domain view of a stored project, hydrated from the stored rows
    pub fn hydrated(&self, id: Id) -> Option<Project> {
        let row = self.project_row(id)?;
        let members = self
            .members
            .lock()
            .unwrap()
            .iter()
            .filter(|m| m.project_id == id)
            .cloned()
            .collect();
        let tasks = self
            .tasks
            .lock()
            .unwrap()
            .iter()
            .filter(|t| t.project_id == id)
            .cloned()
            .collect();
        Some(row.into_domain(members, tasks))
    }
}

#[async_trait]
impl ProjectStore for InMemoryStore {
    async fn projects_owned_by(&self, owner_id: Id) -> RepositoryResult<Vec<ProjectRow>> {
        if self.fail_owned_query.load(Ordering::SeqCst) {
            return Err(simulated());
        }
        Ok(self
            .projects
            .lock()
            .unwrap()
            .iter()
            .filter(|p| p.created_by == owner_id)
            .cloned()
            .collect())
    }

    async fn member_project_ids(&self, user_id: Id) -> RepositoryResult<Vec<Id>> {
        if self.fail_member_index.load(Ordering::SeqCst) {
            return Err(simulated());
        }
        Ok(self
            .members
            .lock()
            .unwrap()
            .iter()
            .filter(|m| m.user_id == Some(user_id))
            .map(|m| m.project_id)
            .collect())
    }

    async fn projects_by_ids(&self, ids: &[Id]) -> RepositoryResult<Vec<ProjectRow>> {
        assert!(!ids.is_empty(), "id-in-set query issued with an empty set");
        Ok(self
            .projects
            .lock()
            .unwrap()
            .iter()
            .filter(|p| ids.contains(&p.id))
            .cloned()
            .collect())
    }

    async fn find_project(&self, id: Id) -> RepositoryResult<Option<ProjectRow>> {
        if self.fail_owned_query.load(Ordering::SeqCst) {
            return Err(simulated());
        }
        Ok(self.project_row(id))
    }

    async fn members_of(&self, project_id: Id) -> RepositoryResult<Vec<MemberRow>> {
        Ok(self
            .members
            .lock()
            .unwrap()
            .iter()
            .filter(|m| m.project_id == project_id)
            .cloned()
            .collect())
    }

    async fn tasks_of(&self, project_id: Id) -> RepositoryResult<Vec<TaskRow>> {
        Ok(self
            .tasks
            .lock()
            .unwrap()
            .iter()
            .filter(|t| t.project_id == project_id)
            .cloned()
            .collect())
    }

    async fn insert_project(
        &self,
        owner_id: Id,
        input: &CreateProjectInput,
    ) -> RepositoryResult<ProjectRow> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(simulated());
        }
        let phases = Project::normalize_phases(input.phases.clone());
        let row = ProjectRow {
            id: Uuid::new_v4(),
            title: input.title.clone(),
            description: Some(input.description.clone()),
            created_by: owner_id,
            current_phase: Some(
                input
                    .current_phase
                    .clone()
                    .unwrap_or_else(|| phases[0].clone()),
            ),
            phases: Some(Json(phases)),
            deadline: Some(input.deadline),
            status: Some(input.status.as_str().into()),
            created_at: Some(Utc::now()),
        };
        self.projects.lock().unwrap().push(row.clone());
        Ok(row)
    }

    async fn insert_members(
        &self,
        project_id: Id,
        members: &[MemberInput],
    ) -> RepositoryResult<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(simulated());
        }
        let mut stored = self.members.lock().unwrap();
        for m in members {
            stored.push(MemberRow {
                id: Uuid::new_v4(),
                project_id,
                user_id: m.user_id,
                name: m.name.clone(),
                email: m.email.clone(),
                role: m.role.clone(),
                avatar: m.avatar.clone(),
                contribution_percentage: Some(m.contribution_percentage),
                tasks_completed: Some(m.tasks_completed),
                hours_logged: Some(m.hours_logged),
            });
        }
        Ok(())
    }

    async fn insert_task(&self, project_id: Id, input: &TaskInput) -> RepositoryResult<TaskRow> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(simulated());
        }
        let row = TaskRow {
            id: Uuid::new_v4(),
            project_id,
            title: input.title.clone(),
            description: Some(input.description.clone()),
            assigned_to: Some(input.assigned_to.clone()),
            status: Some(input.status.as_str().into()),
            tags: Some(Json(input.tags.clone())),
            deadline: Some(input.deadline),
            hours_logged: Some(input.hours_logged),
            priority: Some(input.priority.as_str().into()),
        };
        self.tasks.lock().unwrap().push(row.clone());
        Ok(row)
    }

    async fn update_project(&self, id: Id, patch: &ProjectPatch) -> RepositoryResult<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(simulated());
        }
        let mut projects = self.projects.lock().unwrap();
        let row = projects
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| RepositoryError::NotFound(format!("Project with id {id} not found")))?;
        if let Some(ref title) = patch.title {
            row.title = title.clone();
        }
        if let Some(ref description) = patch.description {
            row.description = Some(description.clone());
        }
        if let Some(ref phases) = patch.phases {
            row.phases = Some(Json(phases.clone()));
        }
        if let Some(ref phase) = patch.current_phase {
            row.current_phase = Some(phase.clone());
        }
        if let Some(deadline) = patch.deadline {
            row.deadline = Some(deadline);
        }
        if let Some(status) = patch.status {
            row.status = Some(status.as_str().into());
        }
        Ok(())
    }

    async fn update_task(&self, task_id: Id, patch: &TaskPatch) -> RepositoryResult<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(simulated());
        }
        let mut tasks = self.tasks.lock().unwrap();
        let row = tasks
            .iter_mut()
            .find(|t| t.id == task_id)
            .ok_or_else(|| {
                RepositoryError::NotFound(format!("Task with id {task_id} not found"))
            })?;
        if let Some(ref title) = patch.title {
            row.title = title.clone();
        }
        if let Some(ref description) = patch.description {
            row.description = Some(description.clone());
        }
        if let Some(ref assigned_to) = patch.assigned_to {
            row.assigned_to = Some(assigned_to.clone());
        }
        if let Some(status) = patch.status {
            row.status = Some(status.as_str().into());
        }
        if let Some(ref tags) = patch.tags {
            row.tags = Some(Json(tags.clone()));
        }
        if let Some(deadline) = patch.deadline {
            row.deadline = Some(deadline);
        }
        if let Some(hours) = patch.hours_logged {
            row.hours_logged = Some(hours);
        }
        if let Some(priority) = patch.priority {
            row.priority = Some(priority.as_str().into());
        }
        Ok(())
    }

    async fn delete_project(&self, id: Id) -> RepositoryResult<()> {
        self.tasks.lock().unwrap().retain(|t| t.project_id != id);
        self.members.lock().unwrap().retain(|m| m.project_id != id);
        self.projects.lock().unwrap().retain(|p| p.id != id);
        Ok(())
    }
}
