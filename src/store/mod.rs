//! Persistence subsystem.
//!
//! # Data Flow
//! ```text
//! handler
//!     → catalog.rs (whole-catalog read / write, seed-on-empty)
//!     → kv.rs (get/set of one JSON value per key)
//!     → external key-value store (REST) or in-process map
//! ```
//!
//! # Design Decisions
//! - The entire catalog lives under one key; every mutation is a
//!   read-modify-write of the full value with no locking or CAS.
//!   Concurrent writers can lose updates; callers accept this.
//! - The KV client is a trait so the REST store can be swapped for the
//!   in-memory store in tests without touching handlers.
//! - A store that failed to initialize still satisfies the trait and
//!   returns a typed unavailability error on every call.

pub mod catalog;
pub mod kv;

pub use catalog::{CatalogStore, PRODUCTS_KEY};
pub use kv::{KvError, KvStore, MemoryKvStore, RestKvStore, UnavailableKvStore};
