//! Hosted identity service client
//!
//! Sign-up, sign-in, and sign-out against a GoTrue-style auth API. The role
//! is stored in user metadata at sign-up and read back on sign-in, falling
//! back to the role the caller supplied.

use ck_core::error::{CkError, CkResult};
use ck_core::traits::Id;
use ck_models::{Identity, UserRole};
use reqwest::Client;
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use std::time::Duration;

const SERVICE: &str = "Auth";

/// Configuration for the identity client
#[derive(Debug, Clone)]
pub struct AuthClientConfig {
    pub base_url: String,
    anon_key: Option<Secret<String>>,
    pub timeout: Duration,
}

impl AuthClientConfig {
    pub fn new(base_url: impl Into<String>, anon_key: Option<String>) -> Self {
        Self {
            base_url: base_url.into(),
            anon_key: anon_key.map(Secret::new),
            timeout: Duration::from_secs(30),
        }
    }

    fn anon_key(&self) -> CkResult<&str> {
        self.anon_key
            .as_ref()
            .map(|k| k.expose_secret().as_str())
            .ok_or_else(|| CkError::missing_credential(SERVICE))
    }
}

/// Identity service client
pub struct AuthClient {
    config: AuthClientConfig,
    client: Client,
}

#[derive(Serialize)]
struct Credentials<'a> {
    email: &'a str,
    password: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<SignupMetadata<'a>>,
}

#[derive(Serialize)]
struct SignupMetadata<'a> {
    name: &'a str,
    role: UserRole,
}

#[derive(Deserialize)]
struct AuthResponse {
    access_token: String,
    user: AuthUser,
}

#[derive(Deserialize)]
struct AuthUser {
    id: Id,
    email: String,
    #[serde(default)]
    user_metadata: UserMetadata,
}

#[derive(Deserialize, Default)]
struct UserMetadata {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    role: Option<UserRole>,
}

impl AuthClient {
    pub fn new(config: AuthClientConfig) -> CkResult<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| CkError::transport(SERVICE, e.to_string()))?;

        Ok(Self { config, client })
    }

    /// Register a new account. Role and display name go into user metadata.
    pub async fn sign_up(
        &self,
        email: &str,
        password: &str,
        name: &str,
        role: UserRole,
    ) -> CkResult<(Identity, String)> {
        let body = Credentials {
            email,
            password,
            data: Some(SignupMetadata { name, role }),
        };
        let response = self.post("auth/v1/signup", &body).await?;
        self.into_identity(response, name, role)
    }

    /// Sign in with email and password. The role claimed by the caller is
    /// only a fallback; metadata from the service wins.
    pub async fn sign_in(
        &self,
        email: &str,
        password: &str,
        role: UserRole,
    ) -> CkResult<(Identity, String)> {
        let body = Credentials {
            email,
            password,
            data: None,
        };
        let response = self
            .post("auth/v1/token?grant_type=password", &body)
            .await?;
        let fallback_name = email.split('@').next().unwrap_or(email).to_string();
        self.into_identity(response, &fallback_name, role)
    }

    /// Invalidate the access token at the identity service
    pub async fn sign_out(&self, access_token: &str) -> CkResult<()> {
        let key = self.config.anon_key()?.to_string();
        let url = format!("{}/auth/v1/logout", self.config.base_url);

        let response = self
            .client
            .post(&url)
            .header("apikey", key)
            .bearer_auth(access_token)
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

    async fn post(&self, path: &str, body: &Credentials<'_>) -> CkResult<AuthResponse> {
        let key = self.config.anon_key()?.to_string();
        let url = format!("{}/{}", self.config.base_url, path);

        let response = self
            .client
            .post(&url)
            .header("apikey", key)
            .json(body)
            .send()
            .await
            .map_err(|e| CkError::transport(SERVICE, e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(CkError::external(SERVICE, status, body));
        }

        response
            .json::<AuthResponse>()
            .await
            .map_err(|e| CkError::transport(SERVICE, e.to_string()))
    }

    fn into_identity(
        &self,
        response: AuthResponse,
        fallback_name: &str,
        fallback_role: UserRole,
    ) -> CkResult<(Identity, String)> {
        let name = response
            .user
            .user_metadata
            .name
            .unwrap_or_else(|| fallback_name.to_string());
        let role = response.user.user_metadata.role.unwrap_or(fallback_role);
        let identity = Identity::new(response.user.id, response.user.email, name, role);
        Ok((identity, response.access_token))
    }
}
