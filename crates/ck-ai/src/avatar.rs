//! Video-avatar service client
//!
//! Tavus-shaped API: one-shot video generation plus live conversations.
//! Video generation is asynchronous on the service side; `create_video`
//! returns an id to feed into the status poll.

use std::collections::HashMap;
use std::time::Duration;

use ck_core::config::AvatarConfig;
use ck_core::error::{CkError, CkResult};
use reqwest::Client;
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};

const SERVICE: &str = "Tavus";

/// Configuration for the avatar client
#[derive(Debug, Clone)]
pub struct AvatarClientConfig {
    pub base_url: String,
    api_key: Option<Secret<String>>,
    pub default_replica_id: String,
    pub timeout: Duration,
}

impl AvatarClientConfig {
    pub fn new(
        base_url: impl Into<String>,
        api_key: Option<String>,
        default_replica_id: impl Into<String>,
    ) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: api_key.map(Secret::new),
            default_replica_id: default_replica_id.into(),
            timeout: Duration::from_secs(30),
        }
    }

    fn api_key(&self) -> CkResult<&str> {
        self.api_key
            .as_ref()
            .map(|k| k.expose_secret().as_str())
            .ok_or_else(|| CkError::missing_credential(SERVICE))
    }
}

impl From<&AvatarConfig> for AvatarClientConfig {
    fn from(config: &AvatarConfig) -> Self {
        Self::new(
            config.base_url.clone(),
            config.api_key.clone(),
            config.default_replica_id.clone(),
        )
    }
}

/// One-shot video generation request
#[derive(Debug, Clone, Default)]
pub struct VideoRequest {
    pub script: String,
    pub replica_id: Option<String>,
    pub video_name: Option<String>,
    pub background: Option<String>,
    pub properties: HashMap<String, String>,
}

#[derive(Serialize)]
struct VideoBody<'a> {
    script: &'a str,
    replica_id: &'a str,
    video_name: &'a str,
    background: &'a str,
    callback_url: Option<&'a str>,
    properties: &'a HashMap<String, String>,
}

/// Response to a video generation request; the video is not ready yet
#[derive(Debug, Clone, Deserialize)]
pub struct VideoSubmission {
    pub video_id: String,
    #[serde(default)]
    pub status: String,
}

/// Current state of a generating video
#[derive(Debug, Clone, Deserialize)]
pub struct VideoStatus {
    pub video_id: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub download_url: Option<String>,
}

/// Live conversation request
#[derive(Debug, Clone, Default)]
pub struct ConversationRequest {
    pub replica_id: Option<String>,
    pub conversation_name: Option<String>,
    pub properties: HashMap<String, String>,
}

#[derive(Serialize)]
struct ConversationBody<'a> {
    replica_id: &'a str,
    conversation_name: &'a str,
    callback_url: Option<&'a str>,
    properties: &'a HashMap<String, String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Conversation {
    pub conversation_id: String,
    #[serde(default)]
    pub conversation_url: Option<String>,
}

/// Avatar service client
pub struct AvatarClient {
    config: AvatarClientConfig,
    client: Client,
}

impl AvatarClient {
    pub fn new(config: AvatarClientConfig) -> CkResult<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| CkError::transport(SERVICE, e.to_string()))?;

        Ok(Self { config, client })
    }

    /// Submit a script for video generation. Returns immediately with the id
    /// to poll; the video itself takes minutes.
    pub async fn create_video(&self, request: &VideoRequest) -> CkResult<VideoSubmission> {
        let body = VideoBody {
            script: &request.script,
            replica_id: request
                .replica_id
                .as_deref()
                .unwrap_or(&self.config.default_replica_id),
            video_name: request
                .video_name
                .as_deref()
                .unwrap_or("CollabKit AI Video"),
            background: request.background.as_deref().unwrap_or("office"),
            callback_url: None,
            properties: &request.properties,
        };

        self.post_json("videos", &body).await
    }

    /// Fetch the current generation status of a video
    pub async fn video_status(&self, video_id: &str) -> CkResult<VideoStatus> {
        let key = self.config.api_key()?.to_string();
        let url = format!("{}/videos/{}", self.config.base_url, video_id);

        let response = self
            .client
            .get(&url)
            .bearer_auth(key)
            .send()
            .await
            .map_err(|e| CkError::transport(SERVICE, e.to_string()))?;

        Self::decode(response).await
    }

    /// Open a live conversation with the avatar
    pub async fn create_conversation(
        &self,
        request: &ConversationRequest,
    ) -> CkResult<Conversation> {
        let body = ConversationBody {
            replica_id: request
                .replica_id
                .as_deref()
                .unwrap_or(&self.config.default_replica_id),
            conversation_name: request
                .conversation_name
                .as_deref()
                .unwrap_or("CollabKit AI Assistant"),
            callback_url: None,
            properties: &request.properties,
        };

        self.post_json("conversations", &body).await
    }

    /// End a live conversation
    pub async fn end_conversation(&self, conversation_id: &str) -> CkResult<()> {
        let key = self.config.api_key()?.to_string();
        let url = format!(
            "{}/conversations/{}/end",
            self.config.base_url, conversation_id
        );

        let response = self
            .client
            .post(&url)
            .bearer_auth(key)
            .send()
            .await
            .map_err(|e| CkError::transport(SERVICE, e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(CkError::external(SERVICE, status, body));
        }

        Ok(())
    }

    async fn post_json<B, T>(&self, path: &str, body: &B) -> CkResult<T>
    where
        B: Serialize,
        T: serde::de::DeserializeOwned,
    {
        let key = self.config.api_key()?.to_string();
        let url = format!("{}/{}", self.config.base_url, path);

        let response = self
            .client
            .post(&url)
            .bearer_auth(key)
            .json(body)
            .send()
            .await
            .map_err(|e| CkError::transport(SERVICE, e.to_string()))?;

        Self::decode(response).await
    }

    async fn decode<T: serde::de::DeserializeOwned>(response: reqwest::Response) -> CkResult<T> {
        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(CkError::external(SERVICE, status, body));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| CkError::transport(SERVICE, e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_api_key_fails_fast() {
        let config = AvatarClientConfig::new("https://tavusapi.com/v2", None, "r783537ef5");
        assert!(matches!(config.api_key(), Err(CkError::Config(_))));
    }

    #[tokio::test]
    async fn test_create_video_without_key_is_config_error() {
        let config = AvatarClientConfig::new("https://tavusapi.com/v2", None, "r783537ef5");
        let client = AvatarClient::new(config).unwrap();

        let err = client
            .create_video(&VideoRequest {
                script: "Hello".into(),
                ..Default::default()
            })
            .await
            .unwrap_err();
        assert_eq!(err.error_code(), "configuration_error");
    }
}
