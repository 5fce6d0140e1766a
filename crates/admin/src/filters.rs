//! Custom Askama template filters.

#![allow(clippy::unnecessary_wraps)]

use std::borrow::Borrow;
use std::fmt::Display;

use fournil_core::Price;

/// Format euro cents as a price string.
///
/// Usage in templates: `{{ order.total_cents|price }}`
#[askama::filter_fn]
pub fn price(value: impl Borrow<i64>, _env: &dyn askama::Values) -> askama::Result<String> {
    Ok(Price::from_cents(*value.borrow()).to_string())
}

/// Returns the current year.
///
/// Usage in templates: `{{ ""|current_year }}`
#[askama::filter_fn]
pub fn current_year(_value: impl Display, _env: &dyn askama::Values) -> askama::Result<i32> {
    use chrono::Datelike;
    Ok(chrono::Utc::now().year())
}
