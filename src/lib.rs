//! Product Catalog Service Library

pub mod catalog;
pub mod config;
pub mod error;
pub mod http;
pub mod store;

pub use config::schema::CatalogConfig;
pub use error::CatalogError;
pub use http::HttpServer;
