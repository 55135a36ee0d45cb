//! Transcript port
//!
//! Recognized speech arrives as segments over a channel; interim segments
//! carry partial text and are superseded by the final one. Audio capture
//! itself happens outside this system.

use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;

/// Recognition parameters handed to the capturing side
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecognitionOptions {
    pub continuous: bool,
    pub interim_results: bool,
    pub language: String,
    pub max_alternatives: u32,
}

impl Default for RecognitionOptions {
    fn default() -> Self {
        Self {
            continuous: true,
            interim_results: true,
            language: "en-US".to_string(),
            max_alternatives: 1,
        }
    }
}

/// One recognized segment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranscriptSegment {
    pub transcript: String,
    /// Missing confidence decodes as zero
    #[serde(default)]
    pub confidence: f32,
    pub is_final: bool,
}

/// Sending half of a transcript channel
pub type TranscriptSender = mpsc::Sender<TranscriptSegment>;

/// Receiving half, consumed by the responder loop
pub struct TranscriptSource {
    rx: mpsc::Receiver<TranscriptSegment>,
}

/// Create a transcript channel pair
pub fn transcript_channel(buffer: usize) -> (TranscriptSender, TranscriptSource) {
    let (tx, rx) = mpsc::channel(buffer);
    (tx, TranscriptSource { rx })
}

impl TranscriptSource {
    /// Next segment, final or interim. `None` when the sender is gone.
    pub async fn next(&mut self) -> Option<TranscriptSegment> {
        self.rx.recv().await
    }

    /// Next final segment, discarding interim ones
    pub async fn next_final(&mut self) -> Option<TranscriptSegment> {
        while let Some(segment) = self.rx.recv().await {
            if segment.is_final {
                return Some(segment);
            }
        }
        None
    }
}
