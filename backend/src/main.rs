use std::path::PathBuf;

use tower_http::services::ServeDir;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod catalog;
mod config;
mod domain;
mod rest;

use crate::catalog::CatalogStore;
use crate::config::ServerConfig;
use crate::domain::CatalogService;
use crate::rest::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging; RUST_LOG overrides the default level
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = ServerConfig::from_env()?;

    info!("Setting up catalog");
    let store = CatalogStore::init();
    let state = AppState::new(CatalogService::new(store));

    let app = rest::create_router(state, &config)?
        .fallback_service(ServeDir::new(PathBuf::from("../frontend/dist")));

    // Start the server
    let addr = config.socket_addr();
    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
