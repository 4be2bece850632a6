//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, CORS, request IDs)
//!     → handler.rs (dispatch on method)
//!     → auth.rs (gate for mutating requests)
//!     → catalog/store helpers
//!     → JSON response
//! ```

pub mod auth;
pub mod handler;
pub mod server;

pub use server::HttpServer;
