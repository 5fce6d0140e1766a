//! Human-readable order numbers.
//!
//! An order number is `DD-MM-NN`: two-digit delivery day, two-digit
//! delivery month, and a sequence number zero-padded to at least two
//! digits. The sequence counts orders within the delivery month across all
//! days, so "12-01-03" is the third January order even if earlier January
//! orders were for other days. Sequences past 99 keep their full width
//! ("05-01-112"); they are never truncated.

use core::fmt;

use serde::{Deserialize, Serialize};

use super::delivery_date::DeliveryDate;

/// Errors that can occur when parsing an [`OrderNumber`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum OrderNumberError {
    /// The input is not three dash-separated segments.
    #[error("order number must be in DD-MM-NN form")]
    Malformed,
    /// The day or month segment is not a two-digit number.
    #[error("invalid {segment} segment in order number")]
    InvalidSegment {
        /// Which segment failed ("day", "month" or "sequence").
        segment: &'static str,
    },
}

/// A human-readable order identifier: delivery day, delivery month, and
/// per-month sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct OrderNumber {
    day: u8,
    month: u8,
    sequence: u32,
}

impl OrderNumber {
    /// Build an order number from a delivery date and an allocated
    /// per-month sequence.
    #[must_use]
    pub const fn new(delivery: DeliveryDate, sequence: u32) -> Self {
        Self {
            day: delivery.day(),
            month: delivery.month(),
            sequence,
        }
    }

    /// Parse an order number from its `DD-MM-NN` string form.
    ///
    /// # Errors
    ///
    /// Returns [`OrderNumberError`] if the input does not have three
    /// dash-separated numeric segments. A non-numeric sequence segment is
    /// reported as an error, never a panic; callers decide what to fall
    /// back to.
    pub fn parse(s: &str) -> Result<Self, OrderNumberError> {
        let mut parts = s.split('-');
        let (Some(d), Some(m), Some(n), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(OrderNumberError::Malformed);
        };

        let day = parse_two_digit(d, "day")?;
        let month = parse_two_digit(m, "month")?;
        let sequence = if n.len() >= 2 && n.bytes().all(|b| b.is_ascii_digit()) {
            n.parse()
                .map_err(|_| OrderNumberError::InvalidSegment {
                    segment: "sequence",
                })?
        } else {
            return Err(OrderNumberError::InvalidSegment {
                segment: "sequence",
            });
        };

        Ok(Self {
            day,
            month,
            sequence,
        })
    }

    /// Delivery day segment (1-31).
    #[must_use]
    pub const fn day(&self) -> u8 {
        self.day
    }

    /// Delivery month segment (1-12).
    #[must_use]
    pub const fn month(&self) -> u8 {
        self.month
    }

    /// Per-month sequence segment.
    #[must_use]
    pub const fn sequence(&self) -> u32 {
        self.sequence
    }
}

fn parse_two_digit(s: &str, segment: &'static str) -> Result<u8, OrderNumberError> {
    if s.len() != 2 || !s.bytes().all(|b| b.is_ascii_digit()) {
        return Err(OrderNumberError::InvalidSegment { segment });
    }
    s.parse()
        .map_err(|_| OrderNumberError::InvalidSegment { segment })
}

/// Next per-month sequence given the current maximum for that month.
///
/// `None` means no order exists for the month yet, so numbering starts at 1.
#[must_use]
pub const fn next_sequence(current_max: Option<u32>) -> u32 {
    match current_max {
        Some(max) => max + 1,
        None => 1,
    }
}

impl fmt::Display for OrderNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}-{:02}-{:02}", self.day, self.month, self.sequence)
    }
}

impl std::str::FromStr for OrderNumber {
    type Err = OrderNumberError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for OrderNumber {
    type Error = OrderNumberError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

impl From<OrderNumber> for String {
    fn from(number: OrderNumber) -> Self {
        number.to_string()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn delivery(s: &str) -> DeliveryDate {
        DeliveryDate::parse(s).unwrap()
    }

    #[test]
    fn test_first_order_of_month() {
        let number = OrderNumber::new(delivery("2025-01-12"), next_sequence(None));
        assert_eq!(number.to_string(), "12-01-01");
    }

    #[test]
    fn test_sequence_spans_days_within_month() {
        // A later order for an earlier day still takes the next sequence.
        let number = OrderNumber::new(delivery("2025-01-05"), next_sequence(Some(1)));
        assert_eq!(number.to_string(), "05-01-02");
    }

    #[test]
    fn test_sequence_ignores_day_of_existing_max() {
        // Existing max "20-03-09" -> any March day gets sequence 10.
        let existing = OrderNumber::parse("20-03-09").unwrap();
        let number = OrderNumber::new(
            delivery("2025-03-02"),
            next_sequence(Some(existing.sequence())),
        );
        assert_eq!(number.to_string(), "02-03-10");
    }

    #[test]
    fn test_sequence_past_ninety_nine_widens() {
        let number = OrderNumber::new(delivery("2025-12-24"), next_sequence(Some(99)));
        assert_eq!(number.to_string(), "24-12-100");
        assert_eq!(number.sequence(), 100);
    }

    #[test]
    fn test_parse_roundtrip() {
        let number = OrderNumber::parse("05-01-02").unwrap();
        assert_eq!(number.day(), 5);
        assert_eq!(number.month(), 1);
        assert_eq!(number.sequence(), 2);
        assert_eq!(number.to_string(), "05-01-02");
    }

    #[test]
    fn test_parse_wide_sequence() {
        let number = OrderNumber::parse("24-12-112").unwrap();
        assert_eq!(number.sequence(), 112);
    }

    #[test]
    fn test_parse_malformed_does_not_panic() {
        // Legacy rows with garbage sequence segments surface as errors,
        // never as a crash.
        assert!(OrderNumber::parse("12-01-XX").is_err());
        assert!(OrderNumber::parse("12-01").is_err());
        assert!(OrderNumber::parse("").is_err());
        assert!(OrderNumber::parse("12-01-1").is_err());
        assert!(OrderNumber::parse("1-01-01").is_err());
    }

    #[test]
    fn test_next_sequence() {
        assert_eq!(next_sequence(None), 1);
        assert_eq!(next_sequence(Some(9)), 10);
        assert_eq!(next_sequence(Some(99)), 100);
    }
}
