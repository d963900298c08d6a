//! Kashta Settlement Backend Service
//!
//! Main entry point for the Kashta settlement backend. This service provides
//! the JSON REST API for event settlements (balances, transfer instructions,
//! settled flags) and the append-only settlement activity ledger.

use kashta_backend::api;
use kashta_backend::config::AppConfig;
use kashta_backend::database::{create_pool, run_migrations};
use kashta_backend::error::{AppError, AppResult};
use kashta_backend::AppState;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

#[tokio::main]
async fn main() -> AppResult<()> {
    // Load environment variables first
    dotenv::dotenv().ok();

    // Load configuration
    let config = AppConfig::from_env().map_err(|e| {
        eprintln!("Configuration error: {}", e);
        AppError::Config(e)
    })?;

    // Initialize tracing/logging with config
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!("kashta_backend={},sqlx=warn,tower_http=info", config.log_level).into()
            }),
        )
        .init();

    info!("Kashta settlement backend starting");
    info!("Environment: {}", config.environment);
    info!("Log level: {}", config.log_level);
    info!("HTTP port: {}", config.http_port);

    // =========================================================================
    // DATABASE SETUP
    // =========================================================================
    info!("Connecting to database...");

    let pool = create_pool(&config.database).await.map_err(|e| {
        error!("Failed to create database pool: {}", e);
        AppError::Database(e)
    })?;

    info!("Database connection pool created successfully");
    info!("Max connections: {}", config.database.max_connections);

    // Run migrations
    info!("Running database migrations...");
    run_migrations(&pool, None).await.map_err(|e| {
        error!("Database migration failed: {}", e);
        AppError::Database(e)
    })?;

    info!("Database migrations completed successfully");

    // =========================================================================
    // SERVICES AND HTTP SERVER
    // =========================================================================

    let app_state = Arc::new(AppState::new(pool));
    info!("✓ Application state initialized with repositories");

    let settlement_service = Arc::new(app_state.settlement_service());
    info!("✓ Settlement service initialized");

    let app = axum::Router::new()
        .nest("/api", api::api_router(settlement_service))
        .layer(TraceLayer::new_for_http());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.http_port)
        .parse()
        .map_err(|e| AppError::Config(format!("Invalid HTTP address: {}", e)))?;

    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| AppError::Message(format!("Failed to bind HTTP server: {}", e)))?;

    info!("✓ HTTP server listening on {}", addr);
    info!("Press Ctrl+C to shutdown gracefully");

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            tokio::signal::ctrl_c().await.ok();
            info!("Shutdown signal received, shutting down gracefully...");
        })
        .await
        .map_err(|e| AppError::Message(format!("HTTP server error: {}", e)))?;

    info!("Kashta settlement backend shutdown complete");
    Ok(())
}
