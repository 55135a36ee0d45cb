//! AI nudge endpoint
//!
//! POST /functions/ai-nudge

use axum::{extract::State, Json};
use ck_ai::nudge::{nudge_message, NudgeKind};
use ck_ai::speech::VoiceSettings;
use ck_core::traits::Id;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, warn};
use uuid::Uuid;

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NudgeRequest {
    pub project_id: Option<Id>,
    pub user_id: Option<Id>,
    pub nudge_type: Option<NudgeKind>,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NudgeResponse {
    pub success: bool,
    pub message: String,
    pub voice_url: String,
    pub nudge_id: Option<Id>,
}

/// Render a nudge, voice it when speech is configured, and record it.
/// Persistence and voicing are best effort; only a missing project fails
/// the request.
pub async fn send_nudge(
    State(state): State<AppState>,
    Json(request): Json<NudgeRequest>,
) -> ApiResult<Json<NudgeResponse>> {
    let (Some(project_id), Some(user_id), Some(kind)) =
        (request.project_id, request.user_id, request.nudge_type)
    else {
        return Err(ApiError::bad_request("Missing required fields"));
    };

    state
        .projects
        .find_project(project_id)
        .await
        .map_err(|e| ApiError::internal_with_details(e.to_string()))?
        .ok_or_else(|| ApiError::not_found("Project not found"))?;

    let message = nudge_message(kind, request.message.as_deref());
    let voice_url = render_voice(&state, &message).await;

    let nudge_id = match state
        .nudges
        .insert_nudge(project_id, user_id, kind.as_str(), &message, &voice_url)
        .await
    {
        Ok(id) => Some(id),
        Err(e) => {
            error!(%project_id, error = %e, "Error recording nudge");
            None
        }
    };

    Ok(Json(NudgeResponse {
        success: true,
        message,
        voice_url,
        nudge_id,
    }))
}

/// Voice the message when speech is configured; an empty url means skipped.
async fn render_voice(state: &AppState, message: &str) -> String {
    if !state.speech_backend.is_configured() {
        debug!("Speech key not configured, skipping voice nudge");
        return String::new();
    }

    match state
        .speech_backend
        .synthesize(message, VoiceSettings::nudge())
        .await
    {
        // TODO: upload the audio to object storage; the url below stands in
        // until that lands.
        Ok(_audio) => format!("https://storage.collabkit.dev/nudges/{}.mp3", Uuid::new_v4()),
        Err(e) => {
            warn!(error = %e, "Voice nudge rendering failed");
            String::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handlers::testing::{state_with, TestState};
    use axum::http::StatusCode;

    fn request(project_id: Option<Id>, kind: Option<NudgeKind>) -> NudgeRequest {
        NudgeRequest {
            project_id,
            user_id: Some(Uuid::new_v4()),
            nudge_type: kind,
            message: None,
        }
    }

    #[tokio::test]
    async fn test_missing_fields_is_bad_request() {
        let TestState { state, .. } = state_with(|_| {});

        let err = send_nudge(State(state), Json(request(None, Some(NudgeKind::Reminder))))
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_unknown_project_is_not_found() {
        let TestState { state, .. } = state_with(|_| {});

        let err = send_nudge(
            State(state),
            Json(request(Some(Uuid::new_v4()), Some(NudgeKind::Reminder))),
        )
        .await
        .unwrap_err();
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_nudge_is_rendered_voiced_and_recorded() {
        let test = state_with(|t| t.speech.configured = true);
        let project_id = test.projects.seed_project();

        let response = send_nudge(
            State(test.state.clone()),
            Json(request(Some(project_id), Some(NudgeKind::Motivation))),
        )
        .await
        .unwrap();

        assert!(response.success);
        assert!(response.message.contains("doing great work"));
        assert!(response.voice_url.ends_with(".mp3"));
        assert!(response.nudge_id.is_some());
        assert_eq!(test.nudges.recorded(), 1);
    }

    #[tokio::test]
    async fn test_unconfigured_speech_yields_empty_voice_url() {
        let test = state_with(|_| {});
        let project_id = test.projects.seed_project();

        let response = send_nudge(
            State(test.state.clone()),
            Json(request(Some(project_id), Some(NudgeKind::Reminder))),
        )
        .await
        .unwrap();

        assert!(response.success);
        assert!(response.voice_url.is_empty());
    }

    #[tokio::test]
    async fn test_custom_message_overrides_template() {
        let test = state_with(|_| {});
        let project_id = test.projects.seed_project();

        let response = send_nudge(
            State(test.state.clone()),
            Json(NudgeRequest {
                project_id: Some(project_id),
                user_id: Some(Uuid::new_v4()),
                nudge_type: Some(NudgeKind::Reminder),
                message: Some("Standup in five minutes".into()),
            }),
        )
        .await
        .unwrap();

        assert_eq!(response.message, "Standup in five minutes");
    }

    #[tokio::test]
    async fn test_store_failure_still_succeeds() {
        let test = state_with(|t| t.nudges.fail = true);
        let project_id = test.projects.seed_project();

        let response = send_nudge(
            State(test.state.clone()),
            Json(request(Some(project_id), Some(NudgeKind::WorkloadBalance))),
        )
        .await
        .unwrap();

        assert!(response.success);
        assert!(response.nudge_id.is_none());
    }
}
