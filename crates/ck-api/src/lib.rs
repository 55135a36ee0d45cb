//! # ck-api
//!
//! The serverless-style function endpoints:
//!
//! - `POST /functions/ai-nudge` renders and delivers a nudge message.
//! - `POST /functions/generate-video` builds a narrated summary script and
//!   drives avatar video generation to completion.

pub mod error;
pub mod handlers;
pub mod routes;
pub mod state;

pub use error::{ApiError, ApiResult};
pub use routes::router;
pub use state::AppState;
