//! Nudge message rendering
//!
//! A nudge is a short message sent to a team member, optionally rendered to
//! voice. A custom message always overrides the template.

use serde::{Deserialize, Serialize};

/// Kind of nudge to send
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NudgeKind {
    Reminder,
    Motivation,
    WorkloadBalance,
}

impl NudgeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Reminder => "reminder",
            Self::Motivation => "motivation",
            Self::WorkloadBalance => "workload_balance",
        }
    }
}

/// The message for a nudge; `custom` wins over the kind's template
pub fn nudge_message(kind: NudgeKind, custom: Option<&str>) -> String {
    if let Some(message) = custom {
        return message.to_string();
    }

    match kind {
        NudgeKind::Reminder => {
            "Hi there! Just a friendly reminder that you haven't logged any activity in the \
             past few days. Your team is counting on your contributions. Would you like to \
             update your progress or check out what tasks are available?"
        }
        NudgeKind::Motivation => {
            "You're doing great work on this project! Your contributions are valuable to \
             the team. Keep up the excellent collaboration and don't hesitate to reach out \
             if you need any support."
        }
        NudgeKind::WorkloadBalance => {
            "I noticed there might be an opportunity to better balance the workload in your \
             team. Consider discussing task redistribution with your teammates to ensure \
             everyone can contribute effectively."
        }
    }
    .to_string()
}
