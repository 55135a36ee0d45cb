//! Video generation status poll
//!
//! The avatar service generates videos asynchronously; this loop waits a
//! fixed interval between status checks and gives up after a bounded number
//! of attempts. Probe failures count as attempts so a flapping service
//! cannot extend the ceiling.

use async_trait::async_trait;
use ck_core::error::CkResult;
use tokio::time::{sleep, Duration};
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::avatar::{AvatarClient, VideoStatus};

/// Wait between status checks
pub const POLL_INTERVAL: Duration = Duration::from_secs(10);

/// Attempt ceiling; with the 10 s interval this is a 5-minute wait
pub const MAX_POLL_ATTEMPTS: u32 = 30;

/// State of a polled video generation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VideoPollState {
    /// Submitted, not yet polled
    Submitted,
    /// Waiting on the service, on the given attempt
    Polling { attempt: u32 },
    /// The service finished and handed back a download url
    Completed { url: String },
    /// The service reported generation failure
    Failed,
    /// The attempt ceiling was reached without a terminal status
    TimedOut,
    /// The caller cancelled between polls
    Cancelled,
}

impl VideoPollState {
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            Self::Completed { .. } | Self::Failed | Self::TimedOut | Self::Cancelled
        )
    }
}

/// Status lookup seam, implemented by the avatar client and by test probes
#[async_trait]
pub trait VideoStatusProbe: Send + Sync {
    async fn probe(&self, video_id: &str) -> CkResult<VideoStatus>;
}

#[async_trait]
impl VideoStatusProbe for AvatarClient {
    async fn probe(&self, video_id: &str) -> CkResult<VideoStatus> {
        self.video_status(video_id).await
    }
}

/// Drive the poll loop to a terminal state.
///
/// Each attempt sleeps the interval first, honoring cancellation during the
/// wait, then probes. "completed" with a download url terminates the loop;
/// "failed" terminates it; anything else, including probe errors, consumes
/// the attempt.
pub async fn poll_until_ready(
    probe: &dyn VideoStatusProbe,
    video_id: &str,
    cancel: &CancellationToken,
) -> VideoPollState {
    for attempt in 1..=MAX_POLL_ATTEMPTS {
        tokio::select! {
            _ = cancel.cancelled() => return VideoPollState::Cancelled,
            _ = sleep(POLL_INTERVAL) => {}
        }

        match probe.probe(video_id).await {
            Ok(status) => {
                debug!(video_id, attempt, status = %status.status, "Video status");
                if status.status == "completed" {
                    if let Some(url) = status.download_url {
                        return VideoPollState::Completed { url };
                    }
                } else if status.status == "failed" {
                    return VideoPollState::Failed;
                }
            }
            Err(e) => {
                warn!(video_id, attempt, error = %e, "Video status check failed");
            }
        }
    }

    VideoPollState::TimedOut
}
