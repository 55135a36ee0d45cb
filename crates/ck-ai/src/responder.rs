//! Keyword-rule assistant responder
//!
//! Replies are picked by an ordered rule list evaluated over the lowercased
//! transcript, first match wins. Rules that use project data fall back to
//! generic guidance when none is available.

use ck_models::Project;

type Matcher = fn(&str) -> bool;
type Builder = fn(Option<&Project>) -> String;

struct Rule {
    matches: Matcher,
    respond: Builder,
}

/// Ordered keyword-rule responder
pub struct Responder {
    rules: Vec<Rule>,
}

impl Default for Responder {
    fn default() -> Self {
        Self {
            rules: vec![
                Rule {
                    matches: |m| m.contains("progress") || m.contains("status"),
                    respond: progress_reply,
                },
                Rule {
                    matches: |m| {
                        m.contains("team") || m.contains("member") || m.contains("collaboration")
                    },
                    respond: team_reply,
                },
                Rule {
                    matches: |m| m.contains("task") || m.contains("assignment"),
                    respond: |_| {
                        "I can help you manage tasks effectively. Consider breaking down large \
                         tasks into smaller, manageable pieces, setting clear deadlines, and \
                         ensuring balanced workload distribution among team members."
                            .into()
                    },
                },
                Rule {
                    matches: |m| m.contains("help") || m.contains("how"),
                    respond: |_| {
                        "I'm here to help with project management, team coordination, and \
                         collaboration insights. You can ask me about project progress, team \
                         performance, task management, or any specific challenges you're \
                         facing with your group project."
                            .into()
                    },
                },
                Rule {
                    matches: |m| m.contains("voice") || m.contains("sound"),
                    respond: |_| {
                        "I can adjust my voice settings! You can change my voice type, \
                         speaking speed, and tone using the settings panel. I have several \
                         different voices available to choose from."
                            .into()
                    },
                },
            ],
        }
    }
}

impl Responder {
    /// Build the reply for a transcript, using project data when available
    pub fn respond(&self, transcript: &str, project: Option<&Project>) -> String {
        let message = transcript.to_lowercase();
        for rule in &self.rules {
            if (rule.matches)(&message) {
                return (rule.respond)(project);
            }
        }

        "I understand you're asking about your project. I can help with project management, \
         team coordination, progress tracking, and collaboration insights. Could you be more \
         specific about what you'd like to know?"
            .into()
    }
}

fn progress_reply(project: Option<&Project>) -> String {
    let Some(project) = project else {
        return "I can help you track project progress. Please share your project details \
                or navigate to a specific project for detailed insights."
            .into();
    };

    let completed = project.completed_task_count();
    let total = project.tasks.len();
    let progress = project.progress_percent();

    let assessment = if progress >= 70 {
        "Great progress! Keep up the excellent work."
    } else if progress >= 40 {
        "You're making steady progress. Consider reviewing task assignments to accelerate \
         completion."
    } else {
        "The project needs attention. I recommend reviewing team workload distribution and \
         setting clearer milestones."
    };

    format!(
        "Your project \"{}\" is currently {progress}% complete. You've finished {completed} \
         out of {total} tasks. The team is in the {} phase. {assessment}",
        project.title, project.current_phase
    )
}

fn team_reply(project: Option<&Project>) -> String {
    let generic = "I can help analyze team dynamics and collaboration patterns. Share your \
                   project details for specific insights about team performance.";

    let Some(project) = project else {
        return generic.into();
    };
    if project.members.is_empty() {
        return generic.into();
    }

    let team_size = project.members.len();
    let total: i32 = project
        .members
        .iter()
        .map(|m| m.contribution_percentage)
        .sum();
    let avg = (f64::from(total) / team_size as f64).round() as i32;

    let assessment = if avg >= 70 {
        "The team shows strong engagement across all members."
    } else if avg >= 50 {
        "Most team members are actively contributing. Consider reaching out to less active \
         members."
    } else {
        "There are significant contribution imbalances. I recommend redistributing tasks and \
         providing additional support to underperforming members."
    };

    format!(
        "Your team has {team_size} members with an average contribution of {avg}%. {assessment}"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use ck_models::{ProjectStatus, Task, TaskPriority, TaskStatus, DEFAULT_PHASES};
    use uuid::Uuid;

    fn project(completed: usize, total: usize) -> Project {
        let id = Uuid::new_v4();
        let tasks = (0..total)
            .map(|i| Task {
                id: Uuid::new_v4(),
                project_id: id,
                title: format!("Task {i}"),
                description: String::new(),
                assigned_to: String::new(),
                status: if i < completed {
                    TaskStatus::Completed
                } else {
                    TaskStatus::Todo
                },
                tags: vec![],
                deadline: Utc::now(),
                hours_logged: 0,
                priority: TaskPriority::Medium,
            })
            .collect();

        Project {
            id,
            title: "E-commerce Mobile Application".into(),
            description: String::new(),
            created_by: Uuid::new_v4(),
            members: vec![],
            tasks,
            phases: DEFAULT_PHASES.iter().map(|p| p.to_string()).collect(),
            current_phase: "Development".into(),
            deadline: Utc::now(),
            status: ProjectStatus::Active,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_low_progress_recommends_workload_review() {
        let responder = Responder::default();
        let project = project(3, 10);

        let reply = responder.respond("What is our progress?", Some(&project));

        assert!(reply.contains("30%"));
        assert!(reply.contains("3 out of 10 tasks"));
        assert!(reply.contains("workload distribution"));
    }

    #[test]
    fn test_high_progress_praises() {
        let responder = Responder::default();
        let project = project(8, 10);

        let reply = responder.respond("status update please", Some(&project));

        assert!(reply.contains("80%"));
        assert!(reply.contains("Great progress"));
    }

    #[test]
    fn test_progress_without_project_is_generic() {
        let responder = Responder::default();
        let reply = responder.respond("how is our progress", None);
        assert!(reply.contains("share your project details"));
    }

    #[test]
    fn test_rule_order_progress_before_help() {
        // "how is our progress" matches both rule 1 and rule 4; rule 1 wins.
        let responder = Responder::default();
        let reply = responder.respond("how is our progress", Some(&project(0, 0)));
        assert!(reply.contains("0% complete"));
    }

    #[test]
    fn test_task_rule() {
        let responder = Responder::default();
        let reply = responder.respond("Any advice on task assignment?", None);
        assert!(reply.contains("manage tasks effectively"));
    }

    #[test]
    fn test_voice_rule() {
        let responder = Responder::default();
        let reply = responder.respond("Use a different voice please", None);
        assert!(reply.contains("voice settings"));
    }

    #[test]
    fn test_default_rule_asks_for_specifics() {
        let responder = Responder::default();
        let reply = responder.respond("tell me about the weather", None);
        assert!(reply.contains("Could you be more specific"));
    }

    #[test]
    fn test_team_rule_averages_contribution() {
        use ck_models::ProjectMember;

        let responder = Responder::default();
        let mut project = project(0, 0);
        for pct in [80, 70] {
            project.members.push(ProjectMember {
                id: Uuid::new_v4(),
                project_id: project.id,
                user_id: None,
                name: "Member".into(),
                email: "member@university.edu".into(),
                role: "Developer".into(),
                avatar: String::new(),
                contribution_percentage: pct,
                tasks_completed: 0,
                hours_logged: 0,
            });
        }

        let reply = responder.respond("How is the team doing?", Some(&project));

        assert!(reply.contains("2 members"));
        assert!(reply.contains("75%"));
        assert!(reply.contains("strong engagement"));
    }
}
