//! Error definitions shared across the service.

use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

/// Errors that can occur while serving catalog requests.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Store client not configured or unreachable.
    #[error("product store unavailable: {0}")]
    StoreUnavailable(String),

    /// Writing the catalog back to the store failed.
    #[error("failed to save products: {0}")]
    StoreWriteFailed(String),

    /// Deletion failed while reading or rewriting the catalog.
    #[error("failed to delete products: {0}")]
    DeleteFailed(String),

    /// Missing or malformed fields on a mutating request.
    #[error("{0}")]
    Validation(String),

    /// The access gate rejected the request.
    #[error("unauthorized")]
    Unauthorized,

    /// No product with the requested id.
    #[error("product not found")]
    NotFound,

    /// Method outside the supported set.
    #[error("method not allowed")]
    MethodNotAllowed,
}

/// JSON error body returned for every failed request.
#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl CatalogError {
    fn status(&self) -> StatusCode {
        match self {
            CatalogError::StoreUnavailable(_)
            | CatalogError::StoreWriteFailed(_)
            | CatalogError::DeleteFailed(_) => StatusCode::INTERNAL_SERVER_ERROR,
            CatalogError::Validation(_) => StatusCode::BAD_REQUEST,
            CatalogError::Unauthorized => StatusCode::UNAUTHORIZED,
            CatalogError::NotFound => StatusCode::NOT_FOUND,
            CatalogError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
        }
    }
}

impl IntoResponse for CatalogError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }

        let body = Json(ErrorBody {
            error: self.to_string(),
        });

        if let CatalogError::MethodNotAllowed = self {
            return (status, [(header::ALLOW, "GET, POST, DELETE")], body).into_response();
        }

        (status, body).into_response()
    }
}
