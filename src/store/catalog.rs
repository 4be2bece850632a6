//! Whole-catalog accessor over the key-value store.

use std::path::PathBuf;
use std::sync::Arc;

use crate::catalog::model::Product;
use crate::error::CatalogError;
use crate::store::kv::{KvError, KvStore};

/// Fixed key holding the entire catalog as one JSON array.
pub const PRODUCTS_KEY: &str = "products";

/// Reads and writes the catalog as a single value, seeding it from a
/// local JSON file the first time the store comes back empty.
pub struct CatalogStore {
    kv: Arc<dyn KvStore>,
    seed_path: PathBuf,
}

impl CatalogStore {
    pub fn new(kv: Arc<dyn KvStore>, seed_path: PathBuf) -> Self {
        Self { kv, seed_path }
    }

    /// Fetch the full catalog. An absent or empty value triggers the
    /// seed path; seed problems degrade to an empty catalog instead of
    /// failing the request.
    pub async fn read_catalog(&self) -> Result<Vec<Product>, CatalogError> {
        let value = self
            .kv
            .get(PRODUCTS_KEY)
            .await
            .map_err(store_unavailable)?;

        let products: Vec<Product> = match value {
            Some(v) => serde_json::from_value(v)
                .map_err(|e| CatalogError::StoreUnavailable(format!("stored catalog is malformed: {}", e)))?,
            None => Vec::new(),
        };

        if products.is_empty() {
            return Ok(self.seed().await);
        }
        Ok(products)
    }

    /// Overwrite the stored catalog with the given sequence.
    pub async fn write_catalog(&self, products: &[Product]) -> Result<(), CatalogError> {
        let value = serde_json::to_value(products)
            .map_err(|e| CatalogError::StoreWriteFailed(e.to_string()))?;
        self.kv
            .set(PRODUCTS_KEY, &value)
            .await
            .map_err(|e| CatalogError::StoreWriteFailed(e.to_string()))
    }

    /// Load the seed file and persist it. Any failure is logged and
    /// recovered locally; the caller always gets a catalog back.
    async fn seed(&self) -> Vec<Product> {
        let raw = match tokio::fs::read_to_string(&self.seed_path).await {
            Ok(raw) => raw,
            Err(e) => {
                tracing::warn!(
                    path = %self.seed_path.display(),
                    error = %e,
                    "seed file unreadable, starting with empty catalog"
                );
                return Vec::new();
            }
        };

        let products: Vec<Product> = match serde_json::from_str(&raw) {
            Ok(products) => products,
            Err(e) => {
                tracing::warn!(
                    path = %self.seed_path.display(),
                    error = %e,
                    "seed file malformed, starting with empty catalog"
                );
                return Vec::new();
            }
        };

        // The freshly parsed data is still valid if persisting it fails;
        // the next empty read will retry the write.
        if let Err(e) = self.write_catalog(&products).await {
            tracing::warn!(error = %e, "failed to persist seed data");
        } else {
            tracing::info!(count = products.len(), "seeded catalog from file");
        }

        products
    }
}

fn store_unavailable(err: KvError) -> CatalogError {
    CatalogError::StoreUnavailable(err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::kv::MemoryKvStore;
    use std::io::Write;

    fn seed_file(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    const SEED: &str = r#"[
        {"id": "1", "title": "Blue Shirt", "imageUrl": "https://img.example.com/1.jpg",
         "description": "A shirt", "productUrl": "https://shop.example.com/1"},
        {"id": "2", "title": "Red Hat", "imageUrl": "https://img.example.com/2.jpg",
         "description": "", "productUrl": "https://shop.example.com/2"}
    ]"#;

    #[tokio::test]
    async fn empty_store_seeds_from_file_once() {
        let kv = MemoryKvStore::new();
        let file = seed_file(SEED);
        let store = CatalogStore::new(Arc::new(kv.clone()), file.path().to_path_buf());

        let products = store.read_catalog().await.unwrap();
        assert_eq!(products.len(), 2);
        assert_eq!(products[0].title, "Blue Shirt");

        // Seed landed in the store, so a later read returns the same
        // data even without the file.
        drop(file);
        let again = store.read_catalog().await.unwrap();
        assert_eq!(again, products);
    }

    #[tokio::test]
    async fn missing_seed_file_degrades_to_empty() {
        let store = CatalogStore::new(
            Arc::new(MemoryKvStore::new()),
            PathBuf::from("/nonexistent/products.json"),
        );
        let products = store.read_catalog().await.unwrap();
        assert!(products.is_empty());
    }

    #[tokio::test]
    async fn malformed_seed_file_degrades_to_empty() {
        let file = seed_file("{ not json");
        let store = CatalogStore::new(Arc::new(MemoryKvStore::new()), file.path().to_path_buf());
        let products = store.read_catalog().await.unwrap();
        assert!(products.is_empty());
    }

    #[tokio::test]
    async fn write_then_read_preserves_order() {
        let file = seed_file(SEED);
        let store = CatalogStore::new(Arc::new(MemoryKvStore::new()), file.path().to_path_buf());

        let mut products = store.read_catalog().await.unwrap();
        products.reverse();
        store.write_catalog(&products).await.unwrap();

        let read_back = store.read_catalog().await.unwrap();
        assert_eq!(read_back, products);
    }

    #[tokio::test]
    async fn unavailable_store_surfaces_typed_error() {
        let store = CatalogStore::new(
            Arc::new(crate::store::kv::UnavailableKvStore::new("no endpoint")),
            PathBuf::from("data/products.json"),
        );
        let err = store.read_catalog().await.unwrap_err();
        assert!(matches!(err, CatalogError::StoreUnavailable(_)));
    }
}
