//! Session-stored shopping cart.

use serde::{Deserialize, Serialize};

/// Maximum quantity of one product per order.
pub const MAX_QUANTITY_PER_LINE: u32 = 50;

/// One line of the cart.
///
/// Only the slug and quantity live in the session; names and prices are
/// re-read from the CMS on every render so a catalog price change never
/// fights with a stale cart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CartItem {
    /// CMS slug of the product.
    pub slug: String,
    /// Quantity ordered.
    pub quantity: u32,
}

/// The session cart.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Cart {
    /// Cart lines, in the order they were added.
    pub items: Vec<CartItem>,
}

impl Cart {
    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Add a quantity of a product, merging with an existing line.
    pub fn add(&mut self, slug: &str, quantity: u32) {
        let quantity = quantity.clamp(1, MAX_QUANTITY_PER_LINE);
        if let Some(line) = self.items.iter_mut().find(|line| line.slug == slug) {
            line.quantity = (line.quantity + quantity).min(MAX_QUANTITY_PER_LINE);
        } else {
            self.items.push(CartItem {
                slug: slug.to_string(),
                quantity,
            });
        }
    }

    /// Set the quantity of a line; zero removes it.
    pub fn set_quantity(&mut self, slug: &str, quantity: u32) {
        if quantity == 0 {
            self.remove(slug);
        } else if let Some(line) = self.items.iter_mut().find(|line| line.slug == slug) {
            line.quantity = quantity.min(MAX_QUANTITY_PER_LINE);
        }
    }

    /// Remove a line.
    pub fn remove(&mut self, slug: &str) {
        self.items.retain(|line| line.slug != slug);
    }

    /// Total number of articles.
    #[must_use]
    pub fn article_count(&self) -> u32 {
        self.items.iter().map(|line| line.quantity).sum()
    }
}

/// Session keys for storefront data.
pub mod session_keys {
    /// Key for the cart.
    pub const CART: &str = "cart";

    /// Key for the in-flight payment intent ID during checkout.
    pub const PAYMENT_INTENT: &str = "payment_intent";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_merges_lines() {
        let mut cart = Cart::default();
        cart.add("baguette", 2);
        cart.add("baguette", 3);
        assert_eq!(cart.items.len(), 1);
        assert_eq!(cart.article_count(), 5);
    }

    #[test]
    fn test_set_quantity_zero_removes() {
        let mut cart = Cart::default();
        cart.add("tarte-pommes", 1);
        cart.set_quantity("tarte-pommes", 0);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_quantity_is_clamped() {
        let mut cart = Cart::default();
        cart.add("croissant", 500);
        assert_eq!(cart.article_count(), MAX_QUANTITY_PER_LINE);
    }

    #[test]
    fn test_remove_keeps_other_lines() {
        let mut cart = Cart::default();
        cart.add("croissant", 2);
        cart.add("baguette", 1);
        cart.remove("croissant");
        assert_eq!(cart.items.len(), 1);
        assert_eq!(cart.items.first().map(|l| l.slug.as_str()), Some("baguette"));
    }
}
