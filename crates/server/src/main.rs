use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::signal;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use ticketdesk_core::{
    create_ticket_store, load_config, load_config_from_env, validate_config, Config, TicketStore,
};
use ticketdesk_server::api::create_router;
use ticketdesk_server::state::AppState;

/// Config file used when `TICKETDESK_CONFIG` is not set
const DEFAULT_CONFIG_PATH: &str = "config.toml";

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        error!("Fatal error: {:#}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = resolve_config()?;

    // Validate configuration
    validate_config(&config).context("Configuration validation failed")?;

    info!("Configuration loaded successfully");
    info!("Storage backend: {:?}", config.storage.backend);
    info!("Ticket data path: {:?}", config.storage.path);

    // Open ticket store
    let ticket_store: Arc<dyn TicketStore> = Arc::from(
        create_ticket_store(&config.storage).context("Failed to open ticket store")?,
    );
    let ticket_count = ticket_store
        .list()
        .context("Failed to read tickets")?
        .len();
    info!("Ticket store initialized with {} tickets", ticket_count);

    if let Some(dir) = &config.server.static_dir {
        info!("Serving static files from {:?}", dir);
    }

    // Create app state and router
    let state = Arc::new(AppState::new(config.clone(), ticket_store));
    let app = create_router(state);

    // Start server
    let addr = SocketAddr::new(config.server.host, config.server.port);
    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    // Run server with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shut down");

    Ok(())
}

/// Load configuration from `TICKETDESK_CONFIG`, `config.toml`, or defaults.
///
/// An explicitly configured path must exist. The default path is optional.
fn resolve_config() -> Result<Config> {
    if let Ok(path) = std::env::var("TICKETDESK_CONFIG") {
        let config_path = PathBuf::from(path);
        info!("Loading configuration from {:?}", config_path);
        return load_config(&config_path)
            .with_context(|| format!("Failed to load config from {:?}", config_path));
    }

    let default_path = PathBuf::from(DEFAULT_CONFIG_PATH);
    if default_path.exists() {
        info!("Loading configuration from {:?}", default_path);
        load_config(&default_path)
            .with_context(|| format!("Failed to load config from {:?}", default_path))
    } else {
        info!("No {} found, using defaults and environment", DEFAULT_CONFIG_PATH);
        load_config_from_env().context("Failed to load config from environment")
    }
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
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
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
