//! MyMoney API server.
//!
//! Main entry point for the MyMoney backend service.

use anyhow::Context;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use mymoney_api::{AppState, create_router};
use mymoney_db::connect_with;
use mymoney_shared::{AppConfig, JwtConfig, JwtService};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "mymoney=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::load().context("failed to load configuration")?;

    let db = connect_with(&config.database)
        .await
        .context("failed to connect to database")?;
    info!(
        max_connections = config.database.max_connections,
        "Connected to database"
    );

    let jwt_config = JwtConfig {
        secret: config.jwt.secret.clone(),
        access_token_expires_minutes: i64::try_from(config.jwt.access_token_expiry_secs / 60)
            .context("jwt.access_token_expiry_secs is too large")?,
    };
    let state = AppState::from_database(&db, JwtService::new(jwt_config));

    let app = create_router(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

/// Resolves on Ctrl+C.
async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("Shutdown signal received");
    }
}
