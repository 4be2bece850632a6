//! Shared utilities for integration testing.

use std::io::Write;
use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;

use catalog_service::config::{AuthConfig, CatalogConfig};
use catalog_service::http::HttpServer;
use catalog_service::store::kv::MemoryKvStore;

/// A running service instance plus handles to poke at its state.
pub struct TestApp {
    pub addr: SocketAddr,
    pub kv: MemoryKvStore,
    pub client: reqwest::Client,
}

impl TestApp {
    pub fn url(&self, path_and_query: &str) -> String {
        format!("http://{}{}", self.addr, path_and_query)
    }
}

/// Start the service on an ephemeral port with an in-memory store.
pub async fn spawn_app(config: CatalogConfig) -> TestApp {
    spawn_app_with_kv(config, MemoryKvStore::new()).await
}

/// Same, but with a pre-populated store.
pub async fn spawn_app_with_kv(config: CatalogConfig, kv: MemoryKvStore) -> TestApp {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let server = HttpServer::new(&config, Arc::new(kv.clone()));
    tokio::spawn(async move {
        server.run(listener).await.unwrap();
    });

    TestApp {
        addr,
        kv,
        client: reqwest::Client::new(),
    }
}

/// Config with the gate wide open and the given seed file.
pub fn permissive_config(seed_path: &str) -> CatalogConfig {
    let mut config = CatalogConfig::default();
    config.seed.path = seed_path.to_string();
    config.auth = AuthConfig {
        permissive: true,
        api_key: String::new(),
    };
    config
}

/// Config with the gate enforced against the given key.
pub fn enforced_config(seed_path: &str, api_key: &str) -> CatalogConfig {
    let mut config = permissive_config(seed_path);
    config.auth = AuthConfig {
        permissive: false,
        api_key: api_key.to_string(),
    };
    config
}

/// Write a temp seed file; keep the handle alive for the test duration.
pub fn seed_file(content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

/// Two products used by most tests.
pub const SEED: &str = r#"[
    {"id": "1", "title": "Blue Shirt", "imageUrl": "https://img.example.com/1.jpg",
     "description": "A shirt", "productUrl": "https://shop.example.com/1"},
    {"id": "2", "title": "Red Hat", "imageUrl": "https://img.example.com/2.jpg",
     "description": "", "productUrl": "https://shop.example.com/2"}
]"#;
