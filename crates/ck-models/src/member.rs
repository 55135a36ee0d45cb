//! Project member model
//!
//! Contribution metrics are stored, externally assigned values. They are
//! never recomputed from the task list in this system.

use ck_core::traits::{Id, Identifiable};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::user::default_avatar;

/// A member of a project, with stored contribution metrics
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ProjectMember {
    pub id: Id,
    pub project_id: Id,
    /// Identity of the member, when the membership row is linked to one
    pub user_id: Option<Id>,
    pub name: String,
    pub email: String,
    /// Free-form role label ("Frontend Developer", "QA Tester", ...)
    pub role: String,
    pub avatar: String,
    #[validate(range(min = 0, max = 100))]
    pub contribution_percentage: i32,
    pub tasks_completed: i32,
    pub hours_logged: i32,
}

impl ProjectMember {
    /// Normalize a member loaded from the store: absent numeric fields become
    /// zero and a missing avatar falls back to the seeded default.
    pub fn normalized(
        id: Id,
        project_id: Id,
        user_id: Option<Id>,
        name: String,
        email: String,
        role: String,
        avatar: Option<String>,
        contribution_percentage: Option<i32>,
        tasks_completed: Option<i32>,
        hours_logged: Option<i32>,
    ) -> Self {
        let avatar = avatar.unwrap_or_else(|| default_avatar(&email));
        Self {
            id,
            project_id,
            user_id,
            name,
            email,
            role,
            avatar,
            contribution_percentage: contribution_percentage.unwrap_or(0),
            tasks_completed: tasks_completed.unwrap_or(0),
            hours_logged: hours_logged.unwrap_or(0),
        }
    }
}

impl Identifiable for ProjectMember {
    fn id(&self) -> Id {
        self.id
    }
}

/// Input for membership rows bulk-inserted at project creation
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberInput {
    pub user_id: Option<Id>,
    pub name: String,
    pub email: String,
    pub role: String,
    #[serde(default)]
    pub avatar: Option<String>,
    #[serde(default)]
    pub contribution_percentage: i32,
    #[serde(default)]
    pub tasks_completed: i32,
    #[serde(default)]
    pub hours_logged: i32,
}
