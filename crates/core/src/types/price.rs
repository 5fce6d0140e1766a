//! Price type for catalog items and order totals.
//!
//! All storefront prices are EUR and stored as integer cents, which is also
//! what the payment provider expects. Accounting works in
//! `rust_decimal::Decimal` amounts instead; the two never mix.

use core::fmt;

use serde::{Deserialize, Serialize};

/// A price in euro cents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price(i64);

impl Price {
    /// Zero price.
    pub const ZERO: Self = Self(0);

    /// Create a price from euro cents.
    #[must_use]
    pub const fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    /// The amount in euro cents.
    #[must_use]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Multiply by a quantity (cart line totals).
    #[must_use]
    pub const fn times(&self, quantity: u32) -> Self {
        Self(self.0 * quantity as i64)
    }

    /// Saturating sum of two prices.
    #[must_use]
    pub const fn plus(&self, other: Self) -> Self {
        Self(self.0.saturating_add(other.0))
    }
}

impl fmt::Display for Price {
    /// French-style formatting: `12,50 €`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let euros = self.0 / 100;
        let cents = (self.0 % 100).unsigned_abs();
        write!(f, "{euros},{cents:02} €")
    }
}

impl std::iter::Sum for Price {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, |acc, p| acc.plus(p))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_french_format() {
        assert_eq!(Price::from_cents(1250).to_string(), "12,50 €");
        assert_eq!(Price::from_cents(500).to_string(), "5,00 €");
        assert_eq!(Price::from_cents(5).to_string(), "0,05 €");
    }

    #[test]
    fn test_times_and_sum() {
        let line = Price::from_cents(350).times(3);
        assert_eq!(line.cents(), 1050);

        let total: Price = [Price::from_cents(100), Price::from_cents(250)]
            .into_iter()
            .sum();
        assert_eq!(total.cents(), 350);
    }
}
