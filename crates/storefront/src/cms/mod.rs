//! Headless CMS delivery API client.
//!
//! The catalog (categories, products, localized fields) lives in the CMS;
//! the storefront only reads it. Responses are cached with `moka`
//! (5-minute TTL) keyed by locale, so a CMS hiccup does not take the shop
//! down with it mid-browse.

pub mod types;

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use secrecy::ExposeSecret;
use thiserror::Error;
use tracing::{debug, instrument};

use crate::config::CmsConfig;

pub use types::{Category, Product};

use types::EntriesResponse;

/// Cache TTL for catalog reads.
const CACHE_TTL_SECONDS: u64 = 300;

/// Errors that can occur when talking to the CMS.
#[derive(Debug, Error)]
pub enum CmsError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned an error response.
    #[error("CMS error: {status} - {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Response body, truncated.
        message: String,
    },
}

/// Cached catalog values.
#[derive(Clone)]
enum CacheValue {
    Categories(Arc<Vec<Category>>),
    Products(Arc<Vec<Product>>),
}

/// Client for the CMS delivery API.
#[derive(Clone)]
pub struct CmsClient {
    inner: Arc<CmsClientInner>,
}

struct CmsClientInner {
    client: reqwest::Client,
    base_url: String,
    space: String,
    delivery_token: String,
    default_locale: String,
    cache: Cache<String, CacheValue>,
}

impl CmsClient {
    /// Create a new CMS delivery client.
    #[must_use]
    pub fn new(config: &CmsConfig) -> Self {
        let cache = Cache::builder()
            .max_capacity(1000)
            .time_to_live(Duration::from_secs(CACHE_TTL_SECONDS))
            .build();

        Self {
            inner: Arc::new(CmsClientInner {
                client: reqwest::Client::new(),
                base_url: config.api_url.trim_end_matches('/').to_string(),
                space: config.space.clone(),
                delivery_token: config.delivery_token.expose_secret().to_string(),
                default_locale: config.default_locale.clone(),
                cache,
            }),
        }
    }

    /// The locale used when the visitor has not picked one.
    #[must_use]
    pub fn default_locale(&self) -> &str {
        &self.inner.default_locale
    }

    /// Fetch entries of one content type in one locale.
    async fn fetch_entries<T: serde::de::DeserializeOwned>(
        &self,
        content_type: &str,
        locale: &str,
    ) -> Result<Vec<T>, CmsError> {
        let url = format!(
            "{}/spaces/{}/entries",
            self.inner.base_url, self.inner.space
        );

        let response = self
            .inner
            .client
            .get(&url)
            .query(&[("content_type", content_type), ("locale", locale)])
            .bearer_auth(&self.inner.delivery_token)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_default()
                .chars()
                .take(500)
                .collect();
            return Err(CmsError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body: EntriesResponse<T> = response.json().await?;
        Ok(body.items)
    }

    /// All categories in one locale, sorted by position.
    ///
    /// # Errors
    ///
    /// Returns `CmsError` if the delivery API call fails.
    #[instrument(skip(self))]
    pub async fn categories(&self, locale: &str) -> Result<Arc<Vec<Category>>, CmsError> {
        let key = format!("categories:{locale}");
        if let Some(CacheValue::Categories(cached)) = self.inner.cache.get(&key).await {
            debug!("categories cache hit");
            return Ok(cached);
        }

        let mut categories: Vec<Category> = self.fetch_entries("category", locale).await?;
        categories.sort_by_key(|c| c.position);

        let categories = Arc::new(categories);
        self.inner
            .cache
            .insert(key, CacheValue::Categories(Arc::clone(&categories)))
            .await;
        Ok(categories)
    }

    /// All available products in one locale.
    ///
    /// # Errors
    ///
    /// Returns `CmsError` if the delivery API call fails.
    #[instrument(skip(self))]
    pub async fn products(&self, locale: &str) -> Result<Arc<Vec<Product>>, CmsError> {
        let key = format!("products:{locale}");
        if let Some(CacheValue::Products(cached)) = self.inner.cache.get(&key).await {
            debug!("products cache hit");
            return Ok(cached);
        }

        let mut products: Vec<Product> = self.fetch_entries("product", locale).await?;
        products.retain(|p| p.available);

        let products = Arc::new(products);
        self.inner
            .cache
            .insert(key, CacheValue::Products(Arc::clone(&products)))
            .await;
        Ok(products)
    }

    /// Products of one category.
    ///
    /// # Errors
    ///
    /// Returns `CmsError` if the delivery API call fails.
    pub async fn products_in_category(
        &self,
        locale: &str,
        category_slug: &str,
    ) -> Result<Vec<Product>, CmsError> {
        let products = self.products(locale).await?;
        Ok(products
            .iter()
            .filter(|p| p.category == category_slug)
            .cloned()
            .collect())
    }

    /// One product by slug.
    ///
    /// # Errors
    ///
    /// Returns `CmsError` if the delivery API call fails.
    pub async fn product(&self, locale: &str, slug: &str) -> Result<Option<Product>, CmsError> {
        let products = self.products(locale).await?;
        Ok(products.iter().find(|p| p.slug == slug).cloned())
    }

    /// Products flagged for the home page.
    ///
    /// # Errors
    ///
    /// Returns `CmsError` if the delivery API call fails.
    pub async fn featured_products(&self, locale: &str) -> Result<Vec<Product>, CmsError> {
        let products = self.products(locale).await?;
        Ok(products.iter().filter(|p| p.featured).cloned().collect())
    }
}
