//! API error handling
//!
//! JSON error bodies matching the function-endpoint wire contract:
//! `{"error": ..., "details": ...}`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use ck_core::error::CkError;
use serde::Serialize;

/// API error types
#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    NotFound(String),
    Internal {
        error: String,
        details: Option<String>,
    },
}

impl ApiError {
    pub fn bad_request(msg: impl Into<String>) -> Self {
        ApiError::BadRequest(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        ApiError::NotFound(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        ApiError::Internal {
            error: msg.into(),
            details: None,
        }
    }

    /// The catch-all shape: a generic error line plus the underlying cause
    pub fn internal_with_details(details: impl Into<String>) -> Self {
        ApiError::Internal {
            error: "Internal server error".into(),
            details: Some(details.into()),
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<CkError> for ApiError {
    fn from(err: CkError) -> Self {
        match err {
            CkError::NotFound { .. } => ApiError::not_found(err.to_string()),
            other => ApiError::internal_with_details(other.to_string()),
        }
    }
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = match self {
            ApiError::BadRequest(msg) | ApiError::NotFound(msg) => ErrorBody {
                error: msg,
                details: None,
            },
            ApiError::Internal { error, details } => ErrorBody { error, details },
        };

        (status, Json(body)).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
