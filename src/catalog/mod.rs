//! Catalog domain types and query helpers.
//!
//! # Responsibilities
//! - Define the Product record and request payload schemas
//! - Derive id lookup, title search, and bulk deletion from the full
//!   catalog fetched through the store accessor

pub mod model;
pub mod query;

pub use model::{CreateProduct, DeleteRequest, DeleteSummary, Product};
