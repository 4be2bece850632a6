//! Access gate for mutating requests.
//!
//! GET is always permitted; POST and DELETE pass through here. The gate
//! accepts, in order: permissive mode, a Referer that contains the Host
//! (same-origin heuristic), or a caller-supplied key matching the
//! configured secret. The key may arrive in the `X-API-Key` header, the
//! `api_key` query parameter, or the `apiKey` body field.

use axum::http::{header, HeaderMap};
use serde_json::Value;

use crate::config::schema::AuthConfig;

/// Header carrying the shared secret.
pub const API_KEY_HEADER: &str = "x-api-key";

/// Decide whether a mutating request may proceed.
pub fn is_authorized(
    config: &AuthConfig,
    headers: &HeaderMap,
    query_key: Option<&str>,
    body: &Value,
) -> bool {
    if config.permissive {
        return true;
    }

    let referer = header_str(headers, header::REFERER.as_str());
    let host = header_str(headers, header::HOST.as_str());
    if let (Some(referer), Some(host)) = (referer, host) {
        if !host.is_empty() && referer.contains(host) {
            return true;
        }
    }

    if config.api_key.is_empty() {
        return false;
    }

    let supplied = header_str(headers, API_KEY_HEADER)
        .or(query_key)
        .or_else(|| body.get("apiKey").and_then(Value::as_str));

    supplied == Some(config.api_key.as_str())
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|v| v.to_str().ok())
}
