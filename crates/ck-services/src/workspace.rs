//! Session-scoped project workspace
//!
//! Each signed-in session owns one workspace holding its in-memory project
//! list. The workspace is created on sign-in, fed by the aggregation layer,
//! patched optimistically by the mutation layer, and dropped on sign-out.
//! Nothing here is shared across users.

use ck_core::traits::Id;
use ck_models::{Identity, Project, Task};

/// The per-session project state
#[derive(Debug)]
pub struct Workspace {
    /// The identity this workspace belongs to
    pub identity: Identity,
    /// In-memory project list, in aggregation order
    pub projects: Vec<Project>,
}

impl Workspace {
    /// Create an empty workspace at sign-in
    pub fn new(identity: Identity) -> Self {
        Self {
            identity,
            projects: Vec::new(),
        }
    }

    pub fn user_id(&self) -> Id {
        self.identity.id
    }

    pub fn project(&self, id: Id) -> Option<&Project> {
        self.projects.iter().find(|p| p.id == id)
    }

    pub fn project_mut(&mut self, id: Id) -> Option<&mut Project> {
        self.projects.iter_mut().find(|p| p.id == id)
    }

    pub fn task(&self, project_id: Id, task_id: Id) -> Option<&Task> {
        self.project(project_id)?.tasks.iter().find(|t| t.id == task_id)
    }
}
