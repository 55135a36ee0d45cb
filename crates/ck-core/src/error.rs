//! Core error types for CollabKit RS
//!
//! One taxonomy for the whole workspace: configuration errors fail fast,
//! third-party HTTP failures carry status and body, store errors are
//! recoverable by the fallback policies in the service layer.

use thiserror::Error;

/// Core error type for all CollabKit operations
#[derive(Error, Debug)]
pub enum CkError {
    #[error("Not found: {entity} with {field}={value}")]
    NotFound {
        entity: &'static str,
        field: &'static str,
        value: String,
    },

    #[error("Unauthorized: {message}")]
    Unauthorized { message: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("{service} API error: {status} - {body}")]
    ExternalService {
        service: &'static str,
        status: u16,
        body: String,
    },

    #[error("{service} request failed: {message}")]
    Transport {
        service: &'static str,
        message: String,
    },

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl CkError {
    /// Missing API credential for a third-party service. Fail fast, no retry.
    pub fn missing_credential(service: &'static str) -> Self {
        CkError::Config(format!("{service} API key not configured"))
    }

    /// Non-2xx response from a third-party service.
    pub fn external(service: &'static str, status: u16, body: impl Into<String>) -> Self {
        CkError::ExternalService {
            service,
            status,
            body: body.into(),
        }
    }

    /// Transport-level failure talking to a third-party service.
    pub fn transport(service: &'static str, message: impl Into<String>) -> Self {
        CkError::Transport {
            service,
            message: message.into(),
        }
    }

    pub fn status_code(&self) -> u16 {
        match self {
            CkError::NotFound { .. } => 404,
            CkError::Unauthorized { .. } => 401,
            CkError::Config(_) => 500,
            CkError::ExternalService { .. } | CkError::Transport { .. } => 502,
            CkError::Database(_) | CkError::Internal(_) => 500,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            CkError::NotFound { .. } => "not_found",
            CkError::Unauthorized { .. } => "unauthorized",
            CkError::Config(_) => "configuration_error",
            CkError::ExternalService { .. } => "external_service_error",
            CkError::Transport { .. } => "transport_error",
            CkError::Database(_) => "database_error",
            CkError::Internal(_) => "internal_error",
        }
    }
}

/// Result alias used across the workspace
pub type CkResult<T> = Result<T, CkError>;
