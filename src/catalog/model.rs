//! Product record and request payload schemas.

use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

use crate::error::CatalogError;

/// Image shown for products created without one.
pub const PLACEHOLDER_IMAGE_URL: &str = "https://placehold.co/600x400?text=No+Image";

/// A single catalog entry. Serialized camelCase on the wire and in the
/// store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub title: String,
    #[serde(default = "default_image_url")]
    pub image_url: String,
    #[serde(default)]
    pub description: String,
    pub product_url: String,
}

fn default_image_url() -> String {
    PLACEHOLDER_IMAGE_URL.to_string()
}

/// Current Unix time in milliseconds, as a string. Coarse uniqueness
/// only; concurrent creates within the same millisecond collide.
pub fn next_product_id() -> String {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or_default()
        .to_string()
}

/// Body of a create request. All fields optional at the serde level so
/// missing ones surface as a validation error, not a decode error.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProduct {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub product_url: Option<String>,
}

impl CreateProduct {
    /// Validate required fields and build the product, applying the
    /// placeholder image and empty description defaults.
    pub fn into_product(self, id: String) -> Result<Product, CatalogError> {
        let title = self.title.unwrap_or_default();
        let product_url = self.product_url.unwrap_or_default();
        if title.trim().is_empty() || product_url.trim().is_empty() {
            return Err(CatalogError::Validation(
                "title and productUrl are required".into(),
            ));
        }

        Ok(Product {
            id,
            title,
            image_url: self
                .image_url
                .filter(|url| !url.is_empty())
                .unwrap_or_else(default_image_url),
            description: self.description.unwrap_or_default(),
            product_url,
        })
    }
}

/// Body of a delete request.
#[derive(Debug, Default, Deserialize)]
pub struct DeleteRequest {
    #[serde(default)]
    pub ids: Option<Vec<String>>,
}

/// Outcome of a bulk deletion.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteSummary {
    pub deleted_count: usize,
    pub deleted_ids: Vec<String>,
    pub remaining_count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_applies_defaults() {
        let payload = CreateProduct {
            title: Some("Blue Shirt".into()),
            product_url: Some("https://shop.example.com/1".into()),
            ..Default::default()
        };
        let product = payload.into_product("123".into()).unwrap();
        assert_eq!(product.id, "123");
        assert_eq!(product.image_url, PLACEHOLDER_IMAGE_URL);
        assert_eq!(product.description, "");
    }

    #[test]
    fn create_keeps_supplied_fields() {
        let payload = CreateProduct {
            title: Some("Red Hat".into()),
            image_url: Some("https://img.example.com/2.jpg".into()),
            description: Some("A hat".into()),
            product_url: Some("https://shop.example.com/2".into()),
        };
        let product = payload.into_product("456".into()).unwrap();
        assert_eq!(product.image_url, "https://img.example.com/2.jpg");
        assert_eq!(product.description, "A hat");
    }

    #[test]
    fn create_rejects_missing_required_fields() {
        let missing_title = CreateProduct {
            product_url: Some("https://shop.example.com/1".into()),
            ..Default::default()
        };
        assert!(matches!(
            missing_title.into_product("1".into()),
            Err(CatalogError::Validation(_))
        ));

        let missing_url = CreateProduct {
            title: Some("Blue Shirt".into()),
            ..Default::default()
        };
        assert!(missing_url.into_product("1".into()).is_err());
    }

    #[test]
    fn product_deserializes_with_defaults() {
        let product: Product = serde_json::from_str(
            r#"{"id": "1", "title": "Shirt", "productUrl": "https://shop.example.com/1"}"#,
        )
        .unwrap();
        assert_eq!(product.image_url, PLACEHOLDER_IMAGE_URL);
        assert_eq!(product.description, "");
    }

    #[test]
    fn product_serializes_camel_case() {
        let product = Product {
            id: "1".into(),
            title: "Shirt".into(),
            image_url: "https://img.example.com/1.jpg".into(),
            description: String::new(),
            product_url: "https://shop.example.com/1".into(),
        };
        let json = serde_json::to_value(&product).unwrap();
        assert!(json.get("imageUrl").is_some());
        assert!(json.get("productUrl").is_some());
    }

    #[test]
    fn ids_are_millisecond_timestamps() {
        let id = next_product_id();
        let millis: u128 = id.parse().unwrap();
        // Sometime after 2020.
        assert!(millis > 1_577_836_800_000);
    }
}
