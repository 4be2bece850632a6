//! Request dispatcher for the catalog resource.
//!
//! One handler owns `/products` and dispatches purely on HTTP method:
//! OPTIONS (preflight, ungated), GET (list/filter, always permitted),
//! POST (create, gated), DELETE (bulk delete, gated). Anything else is
//! a 405. Each branch returns `Result<_, CatalogError>` so every
//! internal failure converts to a JSON error response at this boundary.

use std::collections::HashMap;

use axum::body::{to_bytes, Body};
use axum::extract::State;
use axum::http::{request::Parts, Method, Request, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use serde_json::Value;

use crate::catalog::model::{next_product_id, CreateProduct, DeleteRequest, DeleteSummary};
use crate::catalog::query;
use crate::error::CatalogError;
use crate::http::auth;
use crate::http::server::AppState;

const MAX_BODY_BYTES: usize = 1024 * 1024;

/// Entry point for every request on the catalog resource.
pub async fn catalog_handler(
    State(state): State<AppState>,
    request: Request<Body>,
) -> Result<Response, CatalogError> {
    let method = request.method().clone();

    if method == Method::OPTIONS {
        Ok(StatusCode::OK.into_response())
    } else if method == Method::GET {
        handle_list(&state, request.uri()).await
    } else if method == Method::POST {
        handle_create(&state, request).await
    } else if method == Method::DELETE {
        handle_delete(&state, request).await
    } else {
        Err(CatalogError::MethodNotAllowed)
    }
}

/// Liveness endpoint. No store round-trip so it stays cheap.
pub async fn health_check(State(state): State<AppState>) -> Json<Value> {
    Json(serde_json::json!({
        "status": "ok",
        "store": state.store_kind,
    }))
}

/// GET: `?id=` exact lookup, `?title=` substring search, else the full
/// catalog.
async fn handle_list(state: &AppState, uri: &Uri) -> Result<Response, CatalogError> {
    let params = query_params(uri);

    if let Some(id) = params.get("id") {
        return match query::find_by_id(&state.store, id).await? {
            Some(product) => Ok(Json(product).into_response()),
            None => Err(CatalogError::NotFound),
        };
    }

    if let Some(title) = params.get("title") {
        let hits = query::search_by_title(&state.store, title).await?;
        return Ok(Json(hits).into_response());
    }

    let products = state.store.read_catalog().await?;
    Ok(Json(products).into_response())
}

/// POST: append one product to the catalog.
async fn handle_create(
    state: &AppState,
    request: Request<Body>,
) -> Result<Response, CatalogError> {
    let (parts, body) = request.into_parts();
    let body = read_json_body(body).await?;
    authorize(state, &parts, &body)?;

    let payload: CreateProduct = serde_json::from_value(body)
        .map_err(|_| CatalogError::Validation("title and productUrl are required".into()))?;
    let product = payload.into_product(next_product_id())?;

    let mut products = state.store.read_catalog().await?;
    products.push(product.clone());
    state.store.write_catalog(&products).await?;

    tracing::info!(id = %product.id, title = %product.title, "product created");
    Ok((StatusCode::CREATED, Json(product)).into_response())
}

#[derive(Serialize)]
struct DeleteResponse {
    message: String,
    #[serde(flatten)]
    summary: DeleteSummary,
}

/// DELETE: remove every product whose id is listed in the body.
async fn handle_delete(
    state: &AppState,
    request: Request<Body>,
) -> Result<Response, CatalogError> {
    let (parts, body) = request.into_parts();
    let body = read_json_body(body).await?;
    authorize(state, &parts, &body)?;

    let invalid_ids = || CatalogError::Validation("ids must be a non-empty array of product ids".into());
    let payload: DeleteRequest = serde_json::from_value(body).map_err(|_| invalid_ids())?;
    let ids = payload
        .ids
        .filter(|ids| !ids.is_empty())
        .ok_or_else(invalid_ids)?;

    let summary = query::delete_by_ids(&state.store, &ids).await?;

    tracing::info!(
        deleted = summary.deleted_count,
        remaining = summary.remaining_count,
        "products deleted"
    );
    Ok(Json(DeleteResponse {
        message: format!("deleted {} product(s)", summary.deleted_count),
        summary,
    })
    .into_response())
}

fn authorize(state: &AppState, parts: &Parts, body: &Value) -> Result<(), CatalogError> {
    let params = query_params(&parts.uri);
    let query_key = params.get("api_key").map(String::as_str);

    if auth::is_authorized(&state.auth, &parts.headers, query_key, body) {
        Ok(())
    } else {
        tracing::warn!(path = %parts.uri.path(), "mutating request rejected by access gate");
        Err(CatalogError::Unauthorized)
    }
}

/// Buffer and parse the request body. An empty body maps to JSON null so
/// validation, not decoding, reports the missing fields.
async fn read_json_body(body: Body) -> Result<Value, CatalogError> {
    let bytes = to_bytes(body, MAX_BODY_BYTES)
        .await
        .map_err(|e| CatalogError::Validation(format!("could not read request body: {}", e)))?;

    if bytes.is_empty() {
        return Ok(Value::Null);
    }
    serde_json::from_slice(&bytes)
        .map_err(|_| CatalogError::Validation("request body must be valid JSON".into()))
}

fn query_params(uri: &Uri) -> HashMap<String, String> {
    url::form_urlencoded::parse(uri.query().unwrap_or("").as_bytes())
        .into_owned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_params_decode_url_encoding() {
        let uri: Uri = "/products?title=blue%20shirt&api_key=s%26cret".parse().unwrap();
        let params = query_params(&uri);
        assert_eq!(params.get("title").unwrap(), "blue shirt");
        assert_eq!(params.get("api_key").unwrap(), "s&cret");
    }

    #[tokio::test]
    async fn empty_body_reads_as_null() {
        let value = read_json_body(Body::empty()).await.unwrap();
        assert!(value.is_null());
    }

    #[tokio::test]
    async fn invalid_json_body_is_validation_error() {
        let err = read_json_body(Body::from("{ nope")).await.unwrap_err();
        assert!(matches!(err, CatalogError::Validation(_)));
    }
}
