//! Generated-video record
//!
//! Metadata row persisted after the avatar service finishes rendering a
//! project-summary video.

use chrono::{DateTime, Utc};
use ck_core::traits::{Id, Identifiable, Timestamped};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedVideo {
    pub id: Id,
    pub project_id: Id,
    /// Requesting identity, when the endpoint was called with one
    pub user_id: Option<Id>,
    pub video_url: String,
    /// The narrated script the video was rendered from
    pub script: String,
    pub generation_status: String,
    pub created_at: DateTime<Utc>,
}

impl Identifiable for GeneratedVideo {
    fn id(&self) -> Id {
        self.id
    }
}

impl Timestamped for GeneratedVideo {
    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
