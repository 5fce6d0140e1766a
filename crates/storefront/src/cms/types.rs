//! Types for the CMS delivery API.
//!
//! Fields arrive already resolved for the requested locale; the storefront
//! never sees the CMS's per-locale field maps.

use serde::Deserialize;

/// Envelope for entry listings.
#[derive(Debug, Deserialize)]
pub struct EntriesResponse<T> {
    /// Entries of the requested content type.
    pub items: Vec<T>,
}

/// A catalog category.
#[derive(Debug, Clone, Deserialize)]
pub struct Category {
    /// URL slug, stable across locales.
    pub slug: String,
    /// Localized display name.
    pub name: String,
    /// Sort position on the home page.
    #[serde(default)]
    pub position: i32,
}

/// A catalog product.
#[derive(Debug, Clone, Deserialize)]
pub struct Product {
    /// URL slug, stable across locales.
    pub slug: String,
    /// Localized product name.
    pub name: String,
    /// Localized description.
    #[serde(default)]
    pub description: String,
    /// Price in euro cents.
    pub price_cents: i64,
    /// Main product photo.
    #[serde(default)]
    pub image_url: Option<String>,
    /// Slug of the category this product belongs to.
    pub category: String,
    /// Shown on the home page.
    #[serde(default)]
    pub featured: bool,
    /// Orderable right now. Seasonal items toggle this off.
    #[serde(default = "default_available")]
    pub available: bool,
}

const fn default_available() -> bool {
    true
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_product_deserializes_with_defaults() {
        let json = r#"{
            "slug": "baguette-tradition",
            "name": "Baguette tradition",
            "price_cents": 130,
            "category": "pains"
        }"#;

        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.slug, "baguette-tradition");
        assert_eq!(product.price_cents, 130);
        assert!(product.available);
        assert!(!product.featured);
        assert!(product.image_url.is_none());
    }

    #[test]
    fn test_entries_envelope() {
        let json = r#"{"items": [{"slug": "pains", "name": "Pains", "position": 1}]}"#;
        let entries: EntriesResponse<Category> = serde_json::from_str(json).unwrap();
        assert_eq!(entries.items.len(), 1);
        assert_eq!(entries.items.first().unwrap().slug, "pains");
    }
}
