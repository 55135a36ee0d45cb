//! Membership rows
//!
//! Table: project_members. Contribution metrics are stored columns; the
//! read path only normalizes NULLs, it never recomputes them.

use ck_core::traits::Id;
use ck_models::ProjectMember;
use sqlx::FromRow;

/// Member row from database
#[derive(Debug, Clone, FromRow)]
pub struct MemberRow {
    pub id: Id,
    pub project_id: Id,
    pub user_id: Option<Id>,
    pub name: String,
    pub email: String,
    pub role: String,
    pub avatar: Option<String>,
    pub contribution_percentage: Option<i32>,
    pub tasks_completed: Option<i32>,
    pub hours_logged: Option<i32>,
}

impl MemberRow {
    /// Normalize into the domain entity: NULL metrics become 0, a missing
    /// avatar becomes the seeded default.
    pub fn into_domain(self) -> ProjectMember {
        ProjectMember::normalized(
            self.id,
            self.project_id,
            self.user_id,
            self.name,
            self.email,
            self.role,
            self.avatar,
            self.contribution_percentage,
            self.tasks_completed,
            self.hours_logged,
        )
    }
}
