//! Text-to-speech client
//!
//! ElevenLabs-shaped API. `synthesize` returns raw audio bytes; storage and
//! playback are the caller's concern.

use std::time::Duration;

use ck_core::config::SpeechConfig;
use ck_core::error::{CkError, CkResult};
use reqwest::Client;
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};

const SERVICE: &str = "ElevenLabs";

const DEFAULT_MODEL_ID: &str = "eleven_monolingual_v1";

/// Named voice ids
pub mod voices {
    pub const RACHEL: &str = "21m00Tcm4TlvDq8ikWAM";
    pub const DREW: &str = "29vD33N1CtxCmqQRPOHJ";
    pub const BELLA: &str = "EXAVITQu4vr4xnSDxMaL";
    pub const ANTONI: &str = "ErXwobaYiN019PkySvjV";
    pub const ELLI: &str = "MF3mGyEYCl7XYWbV9V6O";
    pub const JOSH: &str = "TxGEqnHWrfWFTfGW9XjX";
    pub const ARNOLD: &str = "VR6AewLTigWG4xSOukaG";
    pub const ADAM: &str = "pNInz6obpgDQGcFmaJgB";
    pub const SAM: &str = "yoZ06aMxZJJ28mfd3POQ";
}

/// Rendering parameters for a voice
#[derive(Debug, Clone, Serialize)]
pub struct VoiceSettings {
    pub stability: f32,
    pub similarity_boost: f32,
    pub style: f32,
    pub use_speaker_boost: bool,
}

impl Default for VoiceSettings {
    fn default() -> Self {
        Self {
            stability: 0.5,
            similarity_boost: 0.5,
            style: 0.0,
            use_speaker_boost: true,
        }
    }
}

impl VoiceSettings {
    /// Warmer, steadier delivery used for nudge voice messages
    pub fn nudge() -> Self {
        Self {
            stability: 0.7,
            similarity_boost: 0.8,
            style: 0.2,
            use_speaker_boost: true,
        }
    }
}

/// Synthesis request
#[derive(Debug, Clone)]
pub struct SpeechRequest {
    pub text: String,
    pub voice_id: Option<String>,
    pub model_id: Option<String>,
    pub settings: VoiceSettings,
}

impl SpeechRequest {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            voice_id: None,
            model_id: None,
            settings: VoiceSettings::default(),
        }
    }

    pub fn with_settings(mut self, settings: VoiceSettings) -> Self {
        self.settings = settings;
        self
    }
}

#[derive(Serialize)]
struct SynthesisBody<'a> {
    text: &'a str,
    model_id: &'a str,
    voice_settings: &'a VoiceSettings,
}

/// An available voice
#[derive(Debug, Clone, Deserialize)]
pub struct Voice {
    pub voice_id: String,
    pub name: String,
    #[serde(default)]
    pub category: Option<String>,
}

#[derive(Deserialize)]
struct VoicesResponse {
    voices: Vec<Voice>,
}

/// Configuration for the speech client
#[derive(Debug, Clone)]
pub struct SpeechClientConfig {
    pub base_url: String,
    api_key: Option<Secret<String>>,
    pub default_voice_id: String,
    pub timeout: Duration,
}

impl SpeechClientConfig {
    pub fn new(
        base_url: impl Into<String>,
        api_key: Option<String>,
        default_voice_id: impl Into<String>,
    ) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: api_key.map(Secret::new),
            default_voice_id: default_voice_id.into(),
            timeout: Duration::from_secs(30),
        }
    }

    /// Whether a credential is configured. Callers that render speech on a
    /// best-effort basis check this instead of catching the Config error.
    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    fn api_key(&self) -> CkResult<&str> {
        self.api_key
            .as_ref()
            .map(|k| k.expose_secret().as_str())
            .ok_or_else(|| CkError::missing_credential(SERVICE))
    }
}

impl From<&SpeechConfig> for SpeechClientConfig {
    fn from(config: &SpeechConfig) -> Self {
        Self::new(
            config.base_url.clone(),
            config.api_key.clone(),
            config.default_voice_id.clone(),
        )
    }
}

/// Text-to-speech client
pub struct SpeechClient {
    config: SpeechClientConfig,
    client: Client,
}

impl SpeechClient {
    pub fn new(config: SpeechClientConfig) -> CkResult<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| CkError::transport(SERVICE, e.to_string()))?;

        Ok(Self { config, client })
    }

    pub fn has_api_key(&self) -> bool {
        self.config.has_api_key()
    }

    /// Render text to audio (mpeg bytes)
    pub async fn synthesize(&self, request: &SpeechRequest) -> CkResult<Vec<u8>> {
        let key = self.config.api_key()?.to_string();
        let voice_id = request
            .voice_id
            .as_deref()
            .unwrap_or(&self.config.default_voice_id);
        let url = format!("{}/text-to-speech/{}", self.config.base_url, voice_id);

        let body = SynthesisBody {
            text: &request.text,
            model_id: request.model_id.as_deref().unwrap_or(DEFAULT_MODEL_ID),
            voice_settings: &request.settings,
        };

        let response = self
            .client
            .post(&url)
            .header("Accept", "audio/mpeg")
            .header("xi-api-key", key)
            .json(&body)
            .send()
            .await
            .map_err(|e| CkError::transport(SERVICE, e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(CkError::external(SERVICE, status, body));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| CkError::transport(SERVICE, e.to_string()))?;
        Ok(bytes.to_vec())
    }

    /// List the voices available to this account
    pub async fn voices(&self) -> CkResult<Vec<Voice>> {
        let key = self.config.api_key()?.to_string();
        let url = format!("{}/voices", self.config.base_url);

        let response = self
            .client
            .get(&url)
            .header("xi-api-key", key)
            .send()
            .await
            .map_err(|e| CkError::transport(SERVICE, e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(CkError::external(SERVICE, status, body));
        }

        let parsed = response
            .json::<VoicesResponse>()
            .await
            .map_err(|e| CkError::transport(SERVICE, e.to_string()))?;
        Ok(parsed.voices)
    }
}
