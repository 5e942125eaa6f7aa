//! Xpensify API Server
//!
//! Main entry point for the Xpensify backend service.

use std::sync::Arc;

use chrono_tz::Tz;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use xpensify_api::{AppState, create_router};
use xpensify_db::connect_with_pool;
use xpensify_shared::{AppConfig, JwtService};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "xpensify=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = AppConfig::load()?;

    let timezone: Tz = config.reports.timezone.parse().map_err(|e| {
        anyhow::anyhow!("invalid reports.timezone '{}': {e}", config.reports.timezone)
    })?;
    info!(%timezone, "Calendar time zone configured");

    // Connect to database
    let db = connect_with_pool(
        &config.database.url,
        config.database.max_connections,
        config.database.min_connections,
    )
    .await?;
    info!("Connected to database");

    let state = AppState {
        db: Arc::new(db),
        jwt_service: Arc::new(JwtService::new(config.jwt.clone())),
        timezone,
    };

    let app = create_router(state);

    // Start server
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("Shutdown signal received");
    }
}
