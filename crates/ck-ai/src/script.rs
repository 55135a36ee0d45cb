//! Narrated project summary script
//!
//! Builds the text an avatar reads over a generated summary video. Sections
//! are gated by the caller's options; everything is derived from the
//! hydrated project.

use chrono::Utc;
use ck_models::{Project, TaskStatus};

/// Section toggles for the generated script
#[derive(Debug, Clone, Copy)]
pub struct ScriptOptions {
    pub include_timeline: bool,
    pub include_feedback: bool,
    pub include_contributions: bool,
}

impl Default for ScriptOptions {
    fn default() -> Self {
        Self {
            include_timeline: true,
            include_feedback: true,
            include_contributions: true,
        }
    }
}

/// Build the narrated summary for a project
pub fn build_script(project: &Project, options: &ScriptOptions) -> String {
    let completed = project.completed_task_count();
    let total = project.tasks.len();
    let progress = project.progress_percent();
    let total_hours = project.total_hours_logged();
    let duration_days = days_since(project);

    let mut sections = Vec::new();

    sections.push(format!(
        "Hello! I'm here to present a comprehensive summary of the project \"{}\".",
        project.title
    ));
    sections.push(format!(
        "This collaborative project involved {} dedicated team members working together \
         over the past {duration_days} days.",
        project.members.len()
    ));
    sections.push("Let me walk you through the key highlights:".into());
    sections.push(format!("Project Overview:\n{}", project.description));
    sections.push(format!(
        "Current Status:\nWe're currently in the {} phase, with an overall progress of \
         {progress} percent complete. The team has successfully completed {completed} out \
         of {total} tasks, logging a total of {total_hours} hours of dedicated work.",
        project.current_phase
    ));

    if options.include_contributions && !project.members.is_empty() {
        let lines: Vec<String> = project
            .members
            .iter()
            .map(|m| {
                format!(
                    "{}, our {}, has contributed {} percent to the project, completing {} \
                     tasks and logging {} hours of work.",
                    m.name, m.role, m.contribution_percentage, m.tasks_completed, m.hours_logged
                )
            })
            .collect();
        sections.push(format!("Team Performance Analysis:\n{}", lines.join(" ")));
    }

    if options.include_timeline {
        sections.push(format!(
            "Key Achievements:\nThe team has successfully progressed through {} of {} \
             planned project phases. We've maintained strong collaboration and are on \
             track to meet our deadline.",
            project.phase_number(),
            project.phases.len()
        ));
    }

    if options.include_feedback {
        let outlook = if progress >= 70 {
            "The project shows excellent progress with strong team engagement and \
             consistent delivery of milestones."
        } else if progress >= 40 {
            "The project is making steady progress. There are opportunities to improve \
             team engagement and accelerate task completion to meet project objectives."
        } else {
            "The project requires immediate attention to improve team engagement and task \
             completion rates to meet project objectives."
        };
        sections.push(outlook.into());
    }

    let mut distribution = vec!["Task Distribution Analysis:".to_string()];
    let completed_titles = titles_with_status(project, TaskStatus::Completed);
    if completed_titles.is_empty() {
        distribution.push("No tasks have been completed yet.".into());
    } else {
        distribution.push(format!(
            "Completed tasks include: {}.",
            completed_titles.join(", ")
        ));
    }
    let in_progress = titles_with_status(project, TaskStatus::InProgress);
    if !in_progress.is_empty() {
        distribution.push(format!("Currently in progress: {}.", in_progress.join(", ")));
    }
    let upcoming = titles_with_status(project, TaskStatus::Todo);
    if !upcoming.is_empty() {
        distribution.push(format!("Upcoming tasks: {}.", upcoming.join(", ")));
    }
    sections.push(distribution.join("\n"));

    sections.push(format!(
        "Looking ahead, the team is {} to complete the remaining phases and deliver a \
         successful project outcome.",
        if progress >= 70 {
            "well-positioned"
        } else {
            "working diligently"
        }
    ));
    sections.push("Thank you for your attention to this project summary.".into());

    sections.join("\n\n")
}

fn titles_with_status(project: &Project, status: TaskStatus) -> Vec<&str> {
    project
        .tasks
        .iter()
        .filter(|t| t.status == status)
        .map(|t| t.title.as_str())
        .collect()
}

/// Whole days since creation, rounded up, never negative
fn days_since(project: &Project) -> i64 {
    let seconds = (Utc::now() - project.created_at).num_seconds().max(0);
    (seconds + 86_399) / 86_400
}
