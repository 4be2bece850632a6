//! Product Catalog Service
//!
//! A small HTTP service exposing CRUD operations over a product catalog
//! persisted as one JSON value in a remote key-value store, built with
//! Tokio and Axum.
//!
//! # Architecture Overview
//!
//! ```text
//!                    ┌──────────────────────────────────────────────┐
//!                    │               CATALOG SERVICE                 │
//!                    │                                               │
//!   Client Request   │  ┌─────────┐   ┌──────────┐   ┌───────────┐  │
//!   ─────────────────┼─▶│  http   │──▶│ dispatch │──▶│  access   │  │
//!                    │  │ server  │   │ (method) │   │   gate    │  │
//!                    │  └─────────┘   └────┬─────┘   └───────────┘  │
//!                    │                     │                        │
//!                    │                     ▼                        │
//!                    │  ┌─────────┐   ┌──────────┐   ┌───────────┐  │
//!   Client Response  │  │  JSON   │◀──│ catalog  │──▶│ kv store  │──┼──▶ remote store
//!   ◀────────────────┼──│ response│   │ accessor │   │  client   │  │    (seed file
//!                    │  └─────────┘   └──────────┘   └───────────┘  │     fallback)
//!                    │                                               │
//!                    │  Cross-cutting: config, logging, request IDs  │
//!                    └──────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use catalog_service::config::loader::{apply_env_overrides, load_config};
use catalog_service::config::validation::validate_config;
use catalog_service::config::CatalogConfig;
use catalog_service::http::HttpServer;
use catalog_service::store::kv::{KvStore, MemoryKvStore, RestKvStore, UnavailableKvStore};

#[derive(Parser)]
#[command(name = "catalog-service", about = "Product catalog HTTP service")]
struct Args {
    /// Path to a TOML configuration file.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing subscriber
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "catalog_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("catalog-service v{} starting", env!("CARGO_PKG_VERSION"));

    let args = Args::parse();
    let mut config = match &args.config {
        Some(path) => load_config(path)?,
        None => CatalogConfig::default(),
    };
    apply_env_overrides(&mut config);

    if let Err(errors) = validate_config(&config) {
        for error in &errors {
            tracing::error!(%error, "invalid configuration");
        }
        return Err("configuration validation failed".into());
    }

    tracing::info!(
        bind_address = %config.listener.bind_address,
        permissive = config.auth.permissive,
        seed_path = %config.seed.path,
        "Configuration loaded"
    );

    let kv = build_kv_store(&config);

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let server = HttpServer::new(&config, kv);
    server.run(listener).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}

/// Pick the store implementation. A bad remote configuration still
/// starts the service; requests then fail with a typed store error
/// instead of the process refusing to boot.
fn build_kv_store(config: &CatalogConfig) -> Arc<dyn KvStore> {
    if config.store.endpoint.is_empty() {
        tracing::warn!("no store endpoint configured, using in-memory store");
        return Arc::new(MemoryKvStore::new());
    }

    match RestKvStore::from_config(&config.store) {
        Ok(store) => {
            tracing::info!(endpoint = %config.store.endpoint, "using remote key-value store");
            Arc::new(store)
        }
        Err(e) => {
            tracing::error!(error = %e, "store client failed to initialize");
            Arc::new(UnavailableKvStore::new(e.to_string()))
        }
    }
}
