//! Application state and the outbound service seams
//!
//! Handlers see trait objects: the store traits from ck-db plus two backend
//! traits over the AI clients, so endpoint tests can run without network or
//! Postgres.

use std::sync::Arc;

use async_trait::async_trait;
use ck_ai::avatar::{AvatarClient, VideoRequest};
use ck_ai::poll::{poll_until_ready, VideoPollState};
use ck_ai::speech::{SpeechClient, SpeechRequest, VoiceSettings};
use ck_core::error::{CkError, CkResult};
use ck_db::{NudgeStore, ProjectStore, VideoStore};
use tokio_util::sync::CancellationToken;

/// Drives an avatar video from request to ready url
#[async_trait]
pub trait VideoBackend: Send + Sync {
    async fn generate(
        &self,
        request: &VideoRequest,
        cancel: &CancellationToken,
    ) -> CkResult<String>;
}

#[async_trait]
impl VideoBackend for AvatarClient {
    async fn generate(
        &self,
        request: &VideoRequest,
        cancel: &CancellationToken,
    ) -> CkResult<String> {
        let submission = self.create_video(request).await?;

        match poll_until_ready(self, &submission.video_id, cancel).await {
            VideoPollState::Completed { url } => Ok(url),
            VideoPollState::Failed => Err(CkError::Internal(
                "Video generation failed on the avatar service side".into(),
            )),
            VideoPollState::TimedOut => Err(CkError::Internal(
                "Video generation timed out - please try again later".into(),
            )),
            VideoPollState::Cancelled => {
                Err(CkError::Internal("Video generation cancelled".into()))
            }
            state => Err(CkError::Internal(format!(
                "Video generation ended in unexpected state {state:?}"
            ))),
        }
    }
}

/// Best-effort speech rendering seam
#[async_trait]
pub trait SpeechBackend: Send + Sync {
    /// Whether a credential is configured; unconfigured speech is skipped,
    /// not failed
    fn is_configured(&self) -> bool;

    async fn synthesize(&self, text: &str, settings: VoiceSettings) -> CkResult<Vec<u8>>;
}

#[async_trait]
impl SpeechBackend for SpeechClient {
    fn is_configured(&self) -> bool {
        self.has_api_key()
    }

    async fn synthesize(&self, text: &str, settings: VoiceSettings) -> CkResult<Vec<u8>> {
        let request = SpeechRequest::new(text).with_settings(settings);
        SpeechClient::synthesize(self, &request).await
    }
}

/// Application state
#[derive(Clone)]
pub struct AppState {
    pub projects: Arc<dyn ProjectStore>,
    pub nudges: Arc<dyn NudgeStore>,
    pub videos: Arc<dyn VideoStore>,
    pub video_backend: Arc<dyn VideoBackend>,
    pub speech_backend: Arc<dyn SpeechBackend>,
}
