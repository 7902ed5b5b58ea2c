//! # Exercise Tracker API Server
//!
//! HTTP server for creating users, logging exercises and querying exercise
//! logs.
//!
//! ## Architecture
//!
//! The API server is built with Axum and provides:
//! - User creation and listing
//! - Exercise logging with date-range and limit filtering
//! - A static landing page and public assets
//! - In-memory or PostgreSQL storage, chosen at startup
//!
//! ## Usage
//!
//! ```bash
//! STORE_BACKEND=memory cargo run -p exercise-tracker-api
//! ```

use exercise_tracker_api::{
    app::{build_router, connect_store, AppState},
    config::Config,
};
use exercise_tracker_shared::db::pool::close_pool;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| {
                    "exercise_tracker_api=debug,exercise_tracker_shared=debug,tower_http=debug".into()
                }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        "Exercise Tracker API Server v{} starting...",
        env!("CARGO_PKG_VERSION")
    );

    let config = Config::from_env()?;
    tracing::info!(backend = %config.store.backend, "Configuration loaded");

    let (store, pool) = connect_store(&config).await?;
    let bind_address = config.bind_address();
    let app = build_router(AppState::new(store, config));

    let listener = tokio::net::TcpListener::bind(&bind_address).await?;
    tracing::info!("Server listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Shutdown signal received, exiting...");
    if let Some(pool) = pool {
        close_pool(pool).await;
    }

    Ok(())
}

/// Resolves on Ctrl-C, or SIGTERM on Unix
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl-C: {}", e);
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
                tracing::error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
