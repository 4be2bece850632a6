//! Key-value store clients.
//!
//! The remote store speaks an Upstash-style REST protocol: values are
//! fetched with `GET {base}/get/{key}` and written with
//! `POST {base}/set/{key}`, authenticated by a bearer token. Stored
//! values are JSON documents encoded as strings in the `result` field.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;
use tokio::sync::Mutex;

use crate::config::schema::StoreConfig;

/// Errors from the underlying key-value client.
#[derive(Debug, Error)]
pub enum KvError {
    /// Client was never usable (missing endpoint/token, bad URL).
    #[error("store not available: {0}")]
    Unavailable(String),

    /// Request never reached the store or the connection dropped.
    #[error("store request failed: {0}")]
    Transport(String),

    /// Store answered with a non-success status.
    #[error("store returned status {0}")]
    Status(u16),

    /// Store answered but the payload could not be decoded.
    #[error("could not decode store response: {0}")]
    Decode(String),
}

/// Minimal get/set interface over one JSON value per key.
#[async_trait]
pub trait KvStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<Value>, KvError>;
    async fn set(&self, key: &str, value: &Value) -> Result<(), KvError>;

    /// Short label for logs and the health endpoint.
    fn kind(&self) -> &'static str;
}

/// REST client for the remote key-value store.
pub struct RestKvStore {
    client: reqwest::Client,
    base: String,
    token: String,
}

#[derive(Deserialize)]
struct KvResponse {
    #[serde(default)]
    result: Option<Value>,
}

impl RestKvStore {
    /// Build a client from config. Fails if the endpoint is missing,
    /// unparseable, or the token is empty.
    pub fn from_config(config: &StoreConfig) -> Result<Self, KvError> {
        if config.endpoint.is_empty() {
            return Err(KvError::Unavailable("store endpoint not configured".into()));
        }
        let parsed = url::Url::parse(&config.endpoint)
            .map_err(|e| KvError::Unavailable(format!("invalid store endpoint: {}", e)))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(KvError::Unavailable(format!(
                "store endpoint must be http(s), got {}",
                parsed.scheme()
            )));
        }
        if config.token.is_empty() {
            return Err(KvError::Unavailable("store token not configured".into()));
        }

        Ok(Self {
            client: reqwest::Client::new(),
            base: config.endpoint.trim_end_matches('/').to_string(),
            token: config.token.clone(),
        })
    }
}

#[async_trait]
impl KvStore for RestKvStore {
    async fn get(&self, key: &str) -> Result<Option<Value>, KvError> {
        let response = self
            .client
            .get(format!("{}/get/{}", self.base, key))
            .bearer_auth(&self.token)
            .send()
            .await
            .map_err(|e| KvError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(KvError::Status(status.as_u16()));
        }

        let body: KvResponse = response
            .json()
            .await
            .map_err(|e| KvError::Decode(e.to_string()))?;

        match body.result {
            None | Some(Value::Null) => Ok(None),
            // Stored documents come back JSON-encoded inside a string.
            Some(Value::String(raw)) => serde_json::from_str(&raw)
                .map(Some)
                .map_err(|e| KvError::Decode(e.to_string())),
            Some(other) => Ok(Some(other)),
        }
    }

    async fn set(&self, key: &str, value: &Value) -> Result<(), KvError> {
        let raw = serde_json::to_string(value).map_err(|e| KvError::Decode(e.to_string()))?;

        let response = self
            .client
            .post(format!("{}/set/{}", self.base, key))
            .bearer_auth(&self.token)
            .body(raw)
            .send()
            .await
            .map_err(|e| KvError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(KvError::Status(status.as_u16()));
        }
        Ok(())
    }

    fn kind(&self) -> &'static str {
        "rest"
    }
}

/// In-process store backed by a mutex-guarded map. Used in tests and
/// when no remote endpoint is configured.
#[derive(Clone, Default)]
pub struct MemoryKvStore {
    inner: Arc<Mutex<HashMap<String, Value>>>,
}

impl MemoryKvStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl KvStore for MemoryKvStore {
    async fn get(&self, key: &str) -> Result<Option<Value>, KvError> {
        let map = self.inner.lock().await;
        Ok(map.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &Value) -> Result<(), KvError> {
        let mut map = self.inner.lock().await;
        map.insert(key.to_string(), value.clone());
        Ok(())
    }

    fn kind(&self) -> &'static str {
        "memory"
    }
}

/// Placeholder used when client construction failed at startup. Every
/// operation reports the original initialization error.
pub struct UnavailableKvStore {
    reason: String,
}

impl UnavailableKvStore {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

#[async_trait]
impl KvStore for UnavailableKvStore {
    async fn get(&self, _key: &str) -> Result<Option<Value>, KvError> {
        Err(KvError::Unavailable(self.reason.clone()))
    }

    async fn set(&self, _key: &str, _value: &Value) -> Result<(), KvError> {
        Err(KvError::Unavailable(self.reason.clone()))
    }

    fn kind(&self) -> &'static str {
        "unavailable"
    }
}
