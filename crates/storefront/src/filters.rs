//! Custom Askama template filters.

#![allow(clippy::unnecessary_wraps)]

use std::borrow::Borrow;

use fournil_core::Price;

/// Format euro cents as a price string.
///
/// Usage in templates: `{{ product.price_cents|price }}`
#[askama::filter_fn]
pub fn price(value: impl Borrow<i64>, _env: &dyn askama::Values) -> askama::Result<String> {
    Ok(Price::from_cents(*value.borrow()).to_string())
}
