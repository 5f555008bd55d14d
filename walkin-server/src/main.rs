//! walkin-server - Walk-in queue service
//!
//! Serves the queue API over HTTP backed by a single SQLite file.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::signal;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use walkin_common::config::{load_config_file, ConfigOverrides, ServiceConfig};
use walkin_common::db::init_database;
use walkin_server::{build_router, AppState};

/// Command-line arguments for walkin-server
#[derive(Parser, Debug)]
#[command(name = "walkin-server")]
#[command(about = "Walk-in queue management service")]
#[command(version)]
struct Args {
    /// Address to bind
    #[arg(long, env = "WALKIN_HOST")]
    host: Option<String>,

    /// Port to listen on
    #[arg(short, long, env = "WALKIN_PORT")]
    port: Option<u16>,

    /// SQLite database file
    #[arg(short, long, env = "WALKIN_DATABASE")]
    database: Option<PathBuf>,

    /// Maximum pooled database connections
    #[arg(long, env = "WALKIN_MAX_CONNECTIONS")]
    max_connections: Option<u32>,

    /// TOML config file (must exist when given)
    #[arg(short, long, env = "WALKIN_CONFIG")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "walkin_server=debug,walkin_common=info,tower_http=debug".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Log build identification before anything that can be slow or fail
    info!(
        "Starting walkin-server v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );

    let args = Args::parse();

    let file_config =
        load_config_file(args.config.as_deref()).context("Failed to load config file")?;
    let config = ServiceConfig::resolve(
        ConfigOverrides {
            host: args.host,
            port: args.port,
            database: args.database,
            max_connections: args.max_connections,
        },
        file_config,
    );

    info!("Database path: {}", config.database_path.display());

    let pool = init_database(&config.database_path, config.max_connections)
        .await
        .context("Failed to initialize database")?;

    let app = build_router(AppState::new(pool.clone()));

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    info!("walkin-server listening on http://{}", addr);
    info!("Health check: http://{}/health", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    pool.close().await;
    info!("Server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down");
        },
        _ = terminate => {
            info!("Received terminate signal, shutting down");
        },
    }
}
