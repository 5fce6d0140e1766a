//! HTTP route handlers for the storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                          - Health check
//!
//! # Catalog (read-only, from the CMS)
//! GET  /                                - Home: categories + featured products
//! GET  /catalog/{category}              - Products of one category
//! GET  /products/{slug}                 - Product detail
//!
//! # Cart (session-stored)
//! GET  /cart                            - Cart page
//! POST /cart/add                        - Add a product
//! POST /cart/update                     - Change a line quantity
//! POST /cart/remove                     - Remove a line
//!
//! # Checkout
//! GET  /checkout                        - Delivery date + contact form
//! POST /api/checkout/intent             - Create the payment intent (JSON)
//! POST /checkout/complete               - Verify payment, persist the order
//! GET  /checkout/confirmation/{number}  - Confirmation page
//! ```
//!
//! Catalog pages accept a `lang` query parameter; everything else uses the
//! CMS default locale.

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod home;

use axum::Router;

use crate::state::AppState;

/// Build the full storefront router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(home::router())
        .merge(catalog::router())
        .merge(cart::router())
        .merge(checkout::router())
}

/// Locale query parameter shared by catalog pages.
#[derive(Debug, serde::Deserialize)]
pub struct LocaleQuery {
    /// Requested catalog locale (e.g. `fr`, `en`).
    pub lang: Option<String>,
}

impl LocaleQuery {
    /// The locale to use, falling back to the CMS default.
    #[must_use]
    pub fn locale_or<'a>(&'a self, default: &'a str) -> &'a str {
        match self.lang.as_deref() {
            Some(lang) if !lang.is_empty() => lang,
            _ => default,
        }
    }
}
