//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with the catalog and health handlers
//! - Wire up middleware (tracing, request ID, CORS)
//! - Bind server to listener and serve until shutdown

use std::path::PathBuf;
use std::sync::Arc;

use axum::http::{header, HeaderName, Method};
use axum::routing::{any, get};
use axum::Router;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

use crate::config::schema::{AuthConfig, CatalogConfig};
use crate::http::handler::{catalog_handler, health_check};
use crate::store::catalog::CatalogStore;
use crate::store::kv::KvStore;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<CatalogStore>,
    pub auth: AuthConfig,
    pub store_kind: &'static str,
}

/// HTTP server for the catalog service.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration and store.
    pub fn new(config: &CatalogConfig, kv: Arc<dyn KvStore>) -> Self {
        let store_kind = kv.kind();
        let store = Arc::new(CatalogStore::new(kv, PathBuf::from(&config.seed.path)));

        let state = AppState {
            store,
            auth: config.auth.clone(),
            store_kind,
        };

        Self {
            router: Self::build_router(state),
        }
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(state: AppState) -> Router {
        Router::new()
            .route("/products", any(catalog_handler))
            .route("/health", get(health_check))
            .with_state(state)
            .layer(cors_layer())
            .layer(TraceLayer::new_for_http())
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(self, listener: TcpListener) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Permissive CORS: any origin, the catalog methods, and the headers
/// browsers send for JSON plus the API key.
fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, HeaderName::from_static("x-api-key")])
}

/// Wait for shutdown signal (Ctrl+C).
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to install Ctrl+C handler");
        return;
    }
    tracing::info!("Shutdown signal received");
}
