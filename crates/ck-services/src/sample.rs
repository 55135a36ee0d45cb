//! Sample fallback dataset
//!
//! A fixed single-project dataset substituted wholesale when live project
//! retrieval fails. Never returned for an identity that simply has no
//! projects.

use chrono::{DateTime, TimeZone, Utc};
use ck_core::traits::Id;
use ck_models::{
    Project, ProjectMember, ProjectStatus, Task, TaskPriority, TaskStatus, DEFAULT_PHASES,
};
use uuid::Uuid;

fn midnight(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, 0, 0, 0)
        .single()
        .unwrap_or_else(Utc::now)
}

fn member(
    project_id: Id,
    name: &str,
    email: &str,
    role: &str,
    contribution: i32,
    tasks_completed: i32,
    hours: i32,
) -> ProjectMember {
    ProjectMember {
        id: Uuid::new_v4(),
        project_id,
        user_id: None,
        name: name.into(),
        email: email.into(),
        role: role.into(),
        avatar: format!(
            "https://api.dicebear.com/7.x/avataaars/svg?seed={}",
            name.split(' ').next().unwrap_or(name).to_lowercase()
        ),
        contribution_percentage: contribution,
        tasks_completed,
        hours_logged: hours,
    }
}

fn task(
    project_id: Id,
    title: &str,
    description: &str,
    status: TaskStatus,
    tags: &[&str],
    deadline: (i32, u32, u32),
    hours: i32,
    priority: TaskPriority,
) -> Task {
    Task {
        id: Uuid::new_v4(),
        project_id,
        title: title.into(),
        description: description.into(),
        assigned_to: String::new(),
        status,
        tags: tags.iter().map(|t| t.to_string()).collect(),
        deadline: midnight(deadline.0, deadline.1, deadline.2),
        hours_logged: hours,
        priority,
    }
}

/// The fixed sample dataset, owned by the given identity
pub fn sample_projects(owner_id: Id) -> Vec<Project> {
    let project_id = Uuid::new_v4();

    vec![Project {
        id: project_id,
        title: "E-commerce Mobile Application".into(),
        description: "Developing a full-stack mobile application for online shopping \
                      with React Native and Node.js"
            .into(),
        created_by: owner_id,
        members: vec![
            member(
                project_id,
                "Alice Johnson",
                "alice@university.edu",
                "Frontend Developer",
                35,
                8,
                42,
            ),
            member(
                project_id,
                "Bob Smith",
                "bob@university.edu",
                "Backend Developer",
                28,
                6,
                38,
            ),
            member(
                project_id,
                "Charlie Brown",
                "charlie@university.edu",
                "UI/UX Designer",
                25,
                5,
                35,
            ),
            member(
                project_id,
                "Diana Prince",
                "diana@university.edu",
                "QA Tester",
                12,
                2,
                15,
            ),
        ],
        tasks: vec![
            task(
                project_id,
                "Design user authentication flow",
                "Create wireframes and mockups for login/signup pages",
                TaskStatus::Completed,
                &["UI", "Design"],
                (2024, 12, 15),
                8,
                TaskPriority::High,
            ),
            task(
                project_id,
                "Implement user authentication API",
                "Create backend endpoints for user registration and login",
                TaskStatus::InProgress,
                &["Backend", "API"],
                (2024, 12, 20),
                12,
                TaskPriority::High,
            ),
            task(
                project_id,
                "Build product catalog interface",
                "Develop the main product browsing and search functionality",
                TaskStatus::InProgress,
                &["Frontend", "UI"],
                (2024, 12, 25),
                15,
                TaskPriority::Medium,
            ),
            task(
                project_id,
                "Write test cases for authentication",
                "Create comprehensive test suite for user authentication",
                TaskStatus::Todo,
                &["Testing", "QA"],
                (2024, 12, 30),
                0,
                TaskPriority::Medium,
            ),
        ],
        phases: DEFAULT_PHASES.iter().map(|p| p.to_string()).collect(),
        current_phase: "Development".into(),
        deadline: midnight(2025, 1, 15),
        status: ProjectStatus::Active,
        created_at: midnight(2024, 11, 1),
    }]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_dataset_shape() {
        let projects = sample_projects(Uuid::new_v4());
        assert_eq!(projects.len(), 1);

        let project = &projects[0];
        assert_eq!(project.members.len(), 4);
        assert_eq!(project.tasks.len(), 4);
        assert_eq!(project.completed_task_count(), 1);
        assert_eq!(project.progress_percent(), 25);
        assert_eq!(project.current_phase, "Development");
    }
}
