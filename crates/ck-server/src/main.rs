//! CollabKit RS Server
//!
//! HTTP server exposing the function endpoints and health checks.

use std::sync::Arc;

use axum::{routing::get, Router};
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use ck_ai::avatar::{AvatarClient, AvatarClientConfig};
use ck_ai::speech::{SpeechClient, SpeechClientConfig};
use ck_api::AppState;
use ck_core::config::AppConfig;
use ck_db::{Database, DatabaseConfig, PgNudgeStore, PgProjectStore, PgVideoStore};

mod health;

use health::{HealthChecker, HealthConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    dotenvy::dotenv().ok();
    let config = AppConfig::from_env();

    info!(
        version = env!("CARGO_PKG_VERSION"),
        host = %config.server.host,
        port = config.server.port,
        "Starting CollabKit RS"
    );

    // A failed initial connection is not fatal; the lazy pool reconnects on
    // demand and store errors flow through the service fallback paths.
    let db_config = DatabaseConfig::with_url(&config.database.url);
    let db = match Database::connect(&db_config).await {
        Ok(db) => {
            info!("Connected to database");
            db
        }
        Err(e) => {
            warn!("Failed to connect to database: {}. Connecting lazily.", e);
            Database::connect_lazy(&db_config)?
        }
    };
    let pool = db.pool().clone();

    let avatar = AvatarClient::new(AvatarClientConfig::from(&config.avatar))?;
    let speech = SpeechClient::new(SpeechClientConfig::from(&config.speech))?;

    let app_state = AppState {
        projects: Arc::new(PgProjectStore::new(pool.clone())),
        nudges: Arc::new(PgNudgeStore::new(pool.clone())),
        videos: Arc::new(PgVideoStore::new(pool.clone())),
        video_backend: Arc::new(avatar),
        speech_backend: Arc::new(speech),
    };

    let health_checker = Arc::new(HealthChecker::new(HealthConfig::default()).with_pool(pool));
    let app = build_router(app_state, health_checker);

    let addr = config.server_addr();
    info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

/// Initialize tracing/logging
fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,ck_server=debug,ck_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .init();
}

/// Build the application router
fn build_router(state: AppState, health: Arc<HealthChecker>) -> Router {
    let health_routes = Router::new()
        .route("/health", get(health::default_health_check))
        .route("/health/live", get(health::liveness))
        .route("/health/ready", get(health::readiness))
        .with_state(health);

    Router::new()
        .merge(health_routes)
        .merge(ck_api::router().with_state(state))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(
                    CorsLayer::new()
                        .allow_origin(Any)
                        .allow_methods(Any)
                        .allow_headers(Any),
                ),
        )
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                warn!("Failed to install signal handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            info!("Received SIGTERM, initiating graceful shutdown");
        }
    }
}
