//! Task rows
//!
//! Table: project_tasks.

use chrono::{DateTime, Utc};
use ck_core::traits::Id;
use ck_models::{Task, TaskPriority, TaskStatus};
use sqlx::types::Json;
use sqlx::FromRow;

/// Task row from database
#[derive(Debug, Clone, FromRow)]
pub struct TaskRow {
    pub id: Id,
    pub project_id: Id,
    pub title: String,
    pub description: Option<String>,
    pub assigned_to: Option<String>,
    pub status: Option<String>,
    pub tags: Option<Json<Vec<String>>>,
    pub deadline: Option<DateTime<Utc>>,
    pub hours_logged: Option<i32>,
    pub priority: Option<String>,
}

impl TaskRow {
    /// Normalize into the domain entity. NULL text fields become empty,
    /// NULL tags an empty list, a NULL deadline "now".
    pub fn into_domain(self) -> Task {
        Task {
            id: self.id,
            project_id: self.project_id,
            title: self.title,
            description: self.description.unwrap_or_default(),
            assigned_to: self.assigned_to.unwrap_or_default(),
            status: self
                .status
                .as_deref()
                .map(TaskStatus::parse)
                .unwrap_or_default(),
            tags: self.tags.map(|Json(tags)| tags).unwrap_or_default(),
            deadline: self.deadline.unwrap_or_else(Utc::now),
            hours_logged: self.hours_logged.unwrap_or(0),
            priority: self
                .priority
                .as_deref()
                .map(TaskPriority::parse)
                .unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn test_null_columns_normalize() {
        let row = TaskRow {
            id: Uuid::new_v4(),
            project_id: Uuid::new_v4(),
            title: "Write test cases".into(),
            description: None,
            assigned_to: None,
            status: Some("in-progress".into()),
            tags: None,
            deadline: None,
            hours_logged: None,
            priority: None,
        };
        let task = row.into_domain();
        assert_eq!(task.description, "");
        assert_eq!(task.assigned_to, "");
        assert_eq!(task.status, TaskStatus::InProgress);
        assert!(task.tags.is_empty());
        assert_eq!(task.hours_logged, 0);
        assert_eq!(task.priority, TaskPriority::Medium);
    }
}
