//! Task model

use chrono::{DateTime, Utc};
use ck_core::traits::{Id, Identifiable};
use serde::{Deserialize, Serialize};

/// Task status enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum TaskStatus {
    #[default]
    Todo,
    InProgress,
    Completed,
}

impl TaskStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Todo => "todo",
            Self::InProgress => "in-progress",
            Self::Completed => "completed",
        }
    }

    pub fn parse(s: &str) -> Self {
        match s {
            "in-progress" => Self::InProgress,
            "completed" => Self::Completed,
            _ => Self::Todo,
        }
    }
}

/// Task priority enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TaskPriority {
    Low,
    #[default]
    Medium,
    High,
}

impl TaskPriority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }

    pub fn parse(s: &str) -> Self {
        match s {
            "low" => Self::Low,
            "high" => Self::High,
            _ => Self::Medium,
        }
    }
}

/// Task entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: Id,
    pub project_id: Id,
    pub title: String,
    pub description: String,
    /// Member reference; empty when the assignee is unresolved
    pub assigned_to: String,
    pub status: TaskStatus,
    pub tags: Vec<String>,
    pub deadline: DateTime<Utc>,
    pub hours_logged: i32,
    pub priority: TaskPriority,
}

impl Task {
    pub fn is_completed(&self) -> bool {
        self.status == TaskStatus::Completed
    }
}

impl Identifiable for Task {
    fn id(&self) -> Id {
        self.id
    }
}

/// Input for creating a task
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskInput {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub assigned_to: String,
    #[serde(default)]
    pub status: TaskStatus,
    #[serde(default)]
    pub tags: Vec<String>,
    pub deadline: DateTime<Utc>,
    #[serde(default)]
    pub hours_logged: i32,
    #[serde(default)]
    pub priority: TaskPriority,
}

/// Partial update for a task. Applied identically against the store and
/// against in-memory state.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub assigned_to: Option<String>,
    pub status: Option<TaskStatus>,
    pub tags: Option<Vec<String>>,
    pub deadline: Option<DateTime<Utc>>,
    pub hours_logged: Option<i32>,
    pub priority: Option<TaskPriority>,
}

impl TaskPatch {
    /// Apply the patch to a task
    pub fn apply_to(&self, task: &mut Task) {
        if let Some(ref title) = self.title {
            task.title = title.clone();
        }
        if let Some(ref description) = self.description {
            task.description = description.clone();
        }
        if let Some(ref assigned_to) = self.assigned_to {
            task.assigned_to = assigned_to.clone();
        }
        if let Some(status) = self.status {
            task.status = status;
        }
        if let Some(ref tags) = self.tags {
            task.tags = tags.clone();
        }
        if let Some(deadline) = self.deadline {
            task.deadline = deadline;
        }
        if let Some(hours) = self.hours_logged {
            task.hours_logged = hours;
        }
        if let Some(priority) = self.priority {
            task.priority = priority;
        }
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.assigned_to.is_none()
            && self.status.is_none()
            && self.tags.is_none()
            && self.deadline.is_none()
            && self.hours_logged.is_none()
            && self.priority.is_none()
    }
}
