//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the
//! catalog service. All types derive Serde traits for deserialization
//! from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the catalog service.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct CatalogConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// External key-value store endpoint and credential.
    pub store: StoreConfig,

    /// Access gate settings for mutating requests.
    pub auth: AuthConfig,

    /// Seed file used to initialize an empty catalog.
    pub seed: SeedConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
        }
    }
}

/// Key-value store connection settings.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct StoreConfig {
    /// REST endpoint of the store (e.g., "https://kv.example.com").
    /// Empty means no remote store; the service falls back to an
    /// in-process store.
    pub endpoint: String,

    /// Bearer token for the store. Overridable via CATALOG_STORE_TOKEN.
    pub token: String,
}

/// Access gate settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AuthConfig {
    /// Permissive mode skips the gate entirely (local development).
    pub permissive: bool,

    /// Shared secret compared against the caller-supplied key.
    /// Overridable via CATALOG_API_KEY.
    pub api_key: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            permissive: true,
            api_key: String::new(),
        }
    }
}

/// Seed file settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SeedConfig {
    /// Path to a JSON array of products.
    pub path: String,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            path: "data/products.json".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_permissive_local_setup() {
        let config = CatalogConfig::default();
        assert_eq!(config.listener.bind_address, "0.0.0.0:8080");
        assert!(config.auth.permissive);
        assert!(config.store.endpoint.is_empty());
        assert_eq!(config.seed.path, "data/products.json");
    }

    #[test]
    fn minimal_toml_parses_with_defaults() {
        let config: CatalogConfig = toml::from_str(
            r#"
            [auth]
            permissive = false
            api_key = "secret"
            "#,
        )
        .unwrap();
        assert!(!config.auth.permissive);
        assert_eq!(config.auth.api_key, "secret");
        assert_eq!(config.listener.bind_address, "0.0.0.0:8080");
    }
}
