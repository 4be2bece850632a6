//! Query helpers over the full catalog.
//!
//! Each helper fetches the whole catalog through the store accessor and
//! works on it in memory; there is no secondary index.

use crate::catalog::model::{DeleteSummary, Product};
use crate::error::CatalogError;
use crate::store::catalog::CatalogStore;

/// First product with a matching id, if any. Absence is not an error.
pub async fn find_by_id(
    store: &CatalogStore,
    id: &str,
) -> Result<Option<Product>, CatalogError> {
    let products = store.read_catalog().await?;
    Ok(products.into_iter().find(|p| p.id == id))
}

/// Products whose title contains `term` case-insensitively. An empty
/// term returns the full catalog.
pub async fn search_by_title(
    store: &CatalogStore,
    term: &str,
) -> Result<Vec<Product>, CatalogError> {
    let products = store.read_catalog().await?;
    if term.is_empty() {
        return Ok(products);
    }

    let needle = term.to_lowercase();
    Ok(products
        .into_iter()
        .filter(|p| p.title.to_lowercase().contains(&needle))
        .collect())
}

/// Remove every product whose id appears in `ids`, preserving the
/// relative order of the rest. Wraps any store failure as DeleteFailed.
pub async fn delete_by_ids(
    store: &CatalogStore,
    ids: &[String],
) -> Result<DeleteSummary, CatalogError> {
    let products = store
        .read_catalog()
        .await
        .map_err(|e| CatalogError::DeleteFailed(e.to_string()))?;

    let (deleted, remaining): (Vec<Product>, Vec<Product>) = products
        .into_iter()
        .partition(|p| ids.contains(&p.id));

    store
        .write_catalog(&remaining)
        .await
        .map_err(|e| CatalogError::DeleteFailed(e.to_string()))?;

    Ok(DeleteSummary {
        deleted_count: deleted.len(),
        deleted_ids: deleted.into_iter().map(|p| p.id).collect(),
        remaining_count: remaining.len(),
    })
}
