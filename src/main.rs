//! Order Cache - order lookup service with a TTL-LRU cache in front of storage

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tokio::signal;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use order_cache::adapters::{channel, MemoryStorage};
use order_cache::api::{create_router, AppState};
use order_cache::cache::Cache;
use order_cache::config::Config;
use order_cache::ingest::{IngestLoop, IngestSettings};
use order_cache::service::OrderService;
use order_cache::spawn_cleanup_task;

/// Main entry point for the order cache server.
///
/// # Startup Sequence
/// 1. Load and validate configuration from environment variables
/// 2. Initialize tracing subscriber for logging
/// 3. Create storage, event stream and cache
/// 4. Start background TTL cleanup and order ingestion tasks
/// 5. Serve HTTP until SIGINT/SIGTERM
/// 6. Stop background tasks, flushing pending orders
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env();

    // RUST_LOG overrides LOG_LEVEL
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!("order_cache={},tower_http=info", config.log_level).into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    config.validate().context("invalid configuration")?;

    info!("Starting order cache server");
    info!(
        "Configuration loaded: capacity={}, ttl={}s, cleanup_interval={}s, batch_size={}, flush_timeout={}s, port={}",
        config.cache_capacity,
        config.cache_ttl,
        config.cleanup_interval,
        config.batch_size,
        config.flush_timeout,
        config.server_port
    );

    let storage = Arc::new(MemoryStorage::new());
    let (events, source) = channel(config.event_buffer);
    let cache = Cache::new(config.cache_capacity, config.cache_ttl());
    info!("Cache initialized");

    let shutdown = CancellationToken::new();

    let cleanup_handle = spawn_cleanup_task(
        cache.clone(),
        config.cleanup_interval(),
        shutdown.child_token(),
    );
    info!("Background cleanup task started");

    let ingest = IngestLoop::new(
        Arc::new(source),
        storage.clone(),
        IngestSettings::from_config(&config),
    );
    let ingest_handle = tokio::spawn(ingest.run(shutdown.child_token()));

    let state = AppState::new(OrderService::new(cache, storage), events);
    let app = create_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(shutdown.clone()))
        .await
        .context("server error")?;

    shutdown.cancel();

    match ingest_handle.await {
        Ok(summary) => info!(
            accepted = summary.accepted,
            skipped = summary.skipped,
            persisted = summary.persisted,
            failed_flushes = summary.failed_flushes,
            "Ingestion stopped"
        ),
        Err(err) => error!(error = %err, "ingestion task failed"),
    }

    if let Err(err) = cleanup_handle.await {
        error!(error = %err, "cleanup task failed");
    }

    info!("Server shutdown complete");
    Ok(())
}

/// Waits for Ctrl+C or SIGTERM, then cancels `shutdown`.
async fn shutdown_signal(shutdown: CancellationToken) {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            error!(error = %err, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(err) => {
                error!(error = %err, "failed to install SIGTERM handler");
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

    shutdown.cancel();
}
