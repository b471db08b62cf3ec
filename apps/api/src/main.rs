mod config;
mod db;
mod diff;
mod errors;
mod history;
mod models;
mod routes;
mod state;

use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::{Config, StorageBackend};
use crate::db::create_pool;
use crate::history::storage::{KeyValueStorage, MemoryStorage, PgStorage, RedisStorage};
use crate::history::store::VersionStore;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting CV history API v{}", env!("CARGO_PKG_VERSION"));

    let storage = build_storage(&config).await?;
    let versions = VersionStore::new(storage, config.max_versions);
    info!(
        "Version store ready ({:?} backend, {} versions per document)",
        config.storage_backend, config.max_versions
    );

    let state = AppState {
        versions,
        config: config.clone(),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Connects the storage backend selected by `STORAGE_BACKEND`.
async fn build_storage(config: &Config) -> Result<Arc<dyn KeyValueStorage>> {
    let storage: Arc<dyn KeyValueStorage> = match config.storage_backend {
        StorageBackend::Memory => {
            info!("Using in-memory storage; history is lost on restart");
            Arc::new(MemoryStorage::new())
        }
        StorageBackend::Redis => {
            let url = config.redis_url.as_deref().context("REDIS_URL is not set")?;
            let client = redis::Client::open(url)?;
            Arc::new(RedisStorage::connect(&client).await?)
        }
        StorageBackend::Postgres => {
            let url = config
                .database_url
                .as_deref()
                .context("DATABASE_URL is not set")?;
            let pool = create_pool(url).await?;
            Arc::new(PgStorage::new(pool).await?)
        }
    };
    Ok(storage)
}
