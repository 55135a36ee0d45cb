//! API routes

use axum::{routing::post, Router};

use crate::handlers::{nudge, video};
use crate::state::AppState;

/// Create the function-endpoint router
pub fn router() -> Router<AppState> {
    Router::new().nest("/functions", functions_router())
}

fn functions_router() -> Router<AppState> {
    Router::new()
        .route("/ai-nudge", post(nudge::send_nudge))
        .route("/generate-video", post(video::generate_video))
}
