//! BAT Server - Borrowing Administration Tool
//!
//! REST API server for a community library lending books and tools.

use std::net::SocketAddr;

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use bat_server::{
    api,
    config::{AppConfig, LoggingConfig},
    repository::{store::JsonStore, Repository},
    shutdown::shutdown_signal,
    AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let config = AppConfig::load().context("Failed to load configuration")?;

    init_tracing(&config.logging);

    tracing::info!("Starting BAT Server v{}", env!("CARGO_PKG_VERSION"));

    // Load catalogue and patrons
    let store = JsonStore::from_config(&config.data);
    let library = store.load().context("Failed to load library data")?;
    tracing::info!(
        items = library.items.len(),
        patrons = library.patrons.len(),
        "Library loaded"
    );

    let addr = SocketAddr::new(
        config.server.host.parse().context("Invalid host address")?,
        config.server.port,
    );

    let repository = Repository::new(library);
    let state = AppState::new(config, repository.clone());
    let app = api::create_router(state);

    tracing::info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    // Persist everything that changed during the session
    let library = repository.lock()?;
    store.save(&library).context("Failed to save library data")?;
    tracing::info!("Library saved, shutting down");

    Ok(())
}

fn init_tracing(logging: &LoggingConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("bat_server={},tower_http=debug", logging.level).into());

    let registry = tracing_subscriber::registry().with(filter);
    if logging.format == "json" {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}
