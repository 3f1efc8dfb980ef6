//! Track Proxy - A caching reverse proxy for the Last.fm track metadata API
//!
//! Serves track search and similar-track recommendations, caching upstream
//! payloads in memory with a fixed TTL.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tokio::signal;
use tokio::sync::RwLock;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use trackproxy::api::{create_router, AppState};
use trackproxy::cache::CacheStore;
use trackproxy::config::Config;
use trackproxy::service::MetadataService;
use trackproxy::tasks::spawn_sweep_task;
use trackproxy::upstream::LastfmClient;

/// Main entry point for the Track Proxy server.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load configuration from environment variables (.env honored)
/// 3. Create cache store and upstream client
/// 4. Optionally start the background TTL sweep task
/// 5. Create Axum router with all endpoints
/// 6. Start HTTP server on the configured port
/// 7. Handle graceful shutdown on SIGINT/SIGTERM
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing subscriber with env filter
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "trackproxy=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Track Proxy");

    // Load .env if present, then configuration from environment variables
    dotenvy::dotenv().ok();
    let config = Config::from_env()?;
    info!(
        "Configuration loaded: ttl={}s, port={}, sweep_interval={}s, origins={}",
        config.cache_ttl,
        config.server_port,
        config.sweep_interval,
        if config.allowed_origins.is_empty() {
            "any".to_string()
        } else {
            config.allowed_origins.join(",")
        }
    );

    // Create the one cache instance and the upstream client
    let cache = Arc::new(RwLock::new(CacheStore::new(Duration::from_secs(
        config.cache_ttl,
    ))));
    let upstream = LastfmClient::new(config.upstream_url.clone(), config.api_key.clone())?;
    let service = MetadataService::new(cache.clone(), upstream);
    let state = AppState::new(service);
    info!("Cache store and upstream client initialized");

    // Start the optional background sweep task
    let sweep_handle = if config.sweep_interval > 0 {
        let handle = spawn_sweep_task(cache, config.sweep_interval);
        info!("Background sweep task started");
        Some(handle)
    } else {
        None
    };

    // Create router with all endpoints
    let app = create_router(state, &config.allowed_origins);

    // Bind to configured port
    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Server listening on http://{}", addr);

    // Start server with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(sweep_handle))
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
///
/// On shutdown signal, aborts the sweep task and allows graceful shutdown.
async fn shutdown_signal(sweep_handle: Option<tokio::task::JoinHandle<()>>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
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

    if let Some(handle) = sweep_handle {
        handle.abort();
        warn!("Sweep task aborted");
    }
}
