//! Project model
//!
//! A project is always handed to callers hydrated: members and tasks are
//! loaded alongside it by the aggregation layer. Progress is derived from
//! the task list on every read and is never stored.

use chrono::{DateTime, Utc};
use ck_core::traits::{Entity, Id, Identifiable, Timestamped};
use serde::{Deserialize, Serialize};

use crate::member::{MemberInput, ProjectMember};
use crate::task::Task;

/// Fixed default workflow used when a project carries no phase list
pub const DEFAULT_PHASES: [&str; 5] =
    ["Planning", "Design", "Development", "Testing", "Deployment"];

/// Project status enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ProjectStatus {
    #[default]
    Active,
    Completed,
    Archived,
}

impl ProjectStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Completed => "completed",
            Self::Archived => "archived",
        }
    }

    pub fn parse(s: &str) -> Self {
        match s {
            "completed" => Self::Completed,
            "archived" => Self::Archived,
            _ => Self::Active,
        }
    }
}

/// Hydrated project entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: Id,
    pub title: String,
    pub description: String,
    /// Owner identity reference
    pub created_by: Id,
    pub members: Vec<ProjectMember>,
    pub tasks: Vec<Task>,
    /// Ordered workflow phase names
    pub phases: Vec<String>,
    /// Must be one of `phases`
    pub current_phase: String,
    pub deadline: DateTime<Utc>,
    pub status: ProjectStatus,
    pub created_at: DateTime<Utc>,
}

impl Project {
    pub fn completed_task_count(&self) -> usize {
        self.tasks.iter().filter(|t| t.is_completed()).count()
    }

    /// Displayed progress, recomputed on every read. An empty task list
    /// renders 0, never a division by zero.
    pub fn progress_percent(&self) -> u32 {
        progress_percent(self.completed_task_count(), self.tasks.len())
    }

    /// One-based index of the current phase, for "phase N of M" copy.
    /// A current phase missing from the list counts as the first.
    pub fn phase_number(&self) -> usize {
        self.phases
            .iter()
            .position(|p| p == &self.current_phase)
            .map(|i| i + 1)
            .unwrap_or(1)
    }

    pub fn total_hours_logged(&self) -> i32 {
        self.tasks.iter().map(|t| t.hours_logged).sum()
    }

    /// Phase list with the default workflow substituted for an empty one
    pub fn normalize_phases(phases: Vec<String>) -> Vec<String> {
        if phases.is_empty() {
            DEFAULT_PHASES.iter().map(|p| p.to_string()).collect()
        } else {
            phases
        }
    }
}

/// round(100 × completed / total); total = 0 yields 0
pub fn progress_percent(completed: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    ((completed as f64 / total as f64) * 100.0).round() as u32
}

impl Identifiable for Project {
    fn id(&self) -> Id {
        self.id
    }
}

impl Timestamped for Project {
    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

impl Entity for Project {
    const TABLE_NAME: &'static str = "projects";
    const TYPE_NAME: &'static str = "Project";
}

/// Input for creating a project
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProjectInput {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub phases: Vec<String>,
    #[serde(default)]
    pub current_phase: Option<String>,
    pub deadline: DateTime<Utc>,
    #[serde(default)]
    pub status: ProjectStatus,
    /// Initial member list, bulk-inserted after the project row
    #[serde(default)]
    pub members: Vec<MemberInput>,
}

/// Partial update for a project
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub phases: Option<Vec<String>>,
    pub current_phase: Option<String>,
    pub deadline: Option<DateTime<Utc>>,
    pub status: Option<ProjectStatus>,
}

impl ProjectPatch {
    /// Apply the patch to a project
    pub fn apply_to(&self, project: &mut Project) {
        if let Some(ref title) = self.title {
            project.title = title.clone();
        }
        if let Some(ref description) = self.description {
            project.description = description.clone();
        }
        if let Some(ref phases) = self.phases {
            project.phases = phases.clone();
        }
        if let Some(ref phase) = self.current_phase {
            project.current_phase = phase.clone();
        }
        if let Some(deadline) = self.deadline {
            project.deadline = deadline;
        }
        if let Some(status) = self.status {
            project.status = status;
        }
    }
}
