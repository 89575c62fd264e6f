//! Books API - A small HTTP service for managing a book catalogue
//!
//! Serves CRUD endpoints over books behind API-key authentication, with an
//! optional scheduled archival routine.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use books_api::api::{create_router, AppState};
use books_api::auth::ApiKeyAuth;
use books_api::secrets::{Clock, SecretProvider, SystemClock};
use books_api::store::BookStore;
use books_api::{spawn_archival_task, Config};

/// Main entry point for the books API server.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load configuration from environment variables
/// 3. Initialize the secret provider
/// 4. Resolve the connection string and open the book store
/// 5. Start the scheduled archival task, if enabled
/// 6. Start HTTP server on configured port
/// 7. Handle graceful shutdown on SIGINT/SIGTERM
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "books_api=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Books API");

    let config = Config::from_env();
    info!(
        "Configuration loaded: port={}, archive_threshold={}y, archival_interval={}s, db_connections={}",
        config.server_port,
        config.archive_threshold_years,
        config.archival_interval,
        config.max_db_connections
    );

    let clock: Arc<dyn Clock> = Arc::new(SystemClock);

    let secrets = SecretProvider::initialize(
        config.key_vault_name.as_deref(),
        config.api_key_secret_name.as_deref(),
        clock.clone(),
    )
    .context("failed to initialize secret provider")?;

    let connection_string = secrets
        .connection_string(config.sql_connection_string_secret_name.as_deref())
        .await
        .context("SqlConnectionString could not be retrieved")?;

    let store = BookStore::connect(&connection_string, config.max_db_connections, clock.clone())
        .await
        .context("failed to open book store")?;
    info!("Book store initialized");

    let archival_handle = (config.archival_interval > 0).then(|| {
        spawn_archival_task(
            store.clone(),
            config.archive_threshold_years,
            config.archival_interval,
        )
    });

    let auth = Arc::new(ApiKeyAuth::new(Arc::new(secrets)));
    let state = AppState::new(store, auth, clock)
        .with_archive_threshold(config.archive_threshold_years);
    let app = create_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(archival_handle))
        .await
        .context("server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
///
/// On shutdown signal, aborts the archival task and allows graceful shutdown.
async fn shutdown_signal(archival_handle: Option<tokio::task::JoinHandle<()>>) {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating shutdown...");
        }
        _ = terminate => {
            info!("Received SIGTERM, initiating shutdown...");
        }
    }

    if let Some(handle) = archival_handle {
        handle.abort();
        warn!("Archival task aborted");
    }
}
