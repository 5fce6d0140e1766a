//! Delivery date for an order.
//!
//! Delivery dates travel through the system as `YYYY-MM-DD` strings. They
//! are decomposed by splitting on `-`, never by going through a date-time
//! type: a delivery date stored as midnight UTC must not be able to shift
//! to the previous or next calendar day under a local-time conversion.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`DeliveryDate`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum DeliveryDateError {
    /// The input is not three dash-separated segments.
    #[error("delivery date must be in YYYY-MM-DD form")]
    Malformed,
    /// A segment is not a number or has the wrong width.
    #[error("invalid {segment} in delivery date")]
    InvalidSegment {
        /// Which segment failed ("year", "month" or "day").
        segment: &'static str,
    },
    /// The day does not exist in the given month.
    #[error("day {day} does not exist in month {month}")]
    DayOutOfRange {
        /// Month segment (1-12).
        month: u8,
        /// Day segment.
        day: u8,
    },
}

/// A calendar date on which an order is delivered.
///
/// No time component and no time zone; just the year, month and day the
/// client picked at checkout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DeliveryDate {
    year: u16,
    month: u8,
    day: u8,
}

impl DeliveryDate {
    /// Parse a delivery date from a `YYYY-MM-DD` string.
    ///
    /// The string is split on `-` and each segment is checked for width and
    /// range. The day must exist in the month (leap years included).
    ///
    /// # Errors
    ///
    /// Returns [`DeliveryDateError`] if the input is not a valid calendar
    /// date in `YYYY-MM-DD` form.
    pub fn parse(s: &str) -> Result<Self, DeliveryDateError> {
        let mut parts = s.split('-');
        let (Some(y), Some(m), Some(d), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(DeliveryDateError::Malformed);
        };

        let year = parse_segment(y, 4, "year")?;
        let month = parse_segment(m, 2, "month")?;
        let day = parse_segment(d, 2, "day")?;

        if !(1..=12).contains(&month) {
            return Err(DeliveryDateError::InvalidSegment { segment: "month" });
        }

        #[allow(clippy::cast_possible_truncation)]
        let month = month as u8;
        #[allow(clippy::cast_possible_truncation)]
        let day = day as u8;

        if day == 0 || day > days_in_month(year, month) {
            return Err(DeliveryDateError::DayOutOfRange { month, day });
        }

        Ok(Self { year, month, day })
    }

    /// Rebuild a delivery date from already-decomposed components, as
    /// stored in the order table.
    ///
    /// # Errors
    ///
    /// Returns [`DeliveryDateError`] if the components do not form a valid
    /// calendar date.
    pub const fn from_parts(year: u16, month: u8, day: u8) -> Result<Self, DeliveryDateError> {
        if month == 0 || month > 12 {
            return Err(DeliveryDateError::InvalidSegment { segment: "month" });
        }
        if day == 0 || day > days_in_month(year, month) {
            return Err(DeliveryDateError::DayOutOfRange { month, day });
        }
        Ok(Self { year, month, day })
    }

    /// Year component.
    #[must_use]
    pub const fn year(&self) -> u16 {
        self.year
    }

    /// Month component (1-12).
    #[must_use]
    pub const fn month(&self) -> u8 {
        self.month
    }

    /// Day component (1-31).
    #[must_use]
    pub const fn day(&self) -> u8 {
        self.day
    }
}

fn parse_segment(s: &str, width: usize, segment: &'static str) -> Result<u16, DeliveryDateError> {
    if s.len() != width || !s.bytes().all(|b| b.is_ascii_digit()) {
        return Err(DeliveryDateError::InvalidSegment { segment });
    }
    s.parse()
        .map_err(|_| DeliveryDateError::InvalidSegment { segment })
}

/// Number of days in a month, accounting for leap years.
const fn days_in_month(year: u16, month: u8) -> u8 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 => {
            if year % 4 == 0 && (year % 100 != 0 || year % 400 == 0) {
                29
            } else {
                28
            }
        }
        _ => 0,
    }
}

impl fmt::Display for DeliveryDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }
}

impl std::str::FromStr for DeliveryDate {
    type Err = DeliveryDateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for DeliveryDate {
    type Error = DeliveryDateError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

impl From<DeliveryDate> for String {
    fn from(date: DeliveryDate) -> Self {
        date.to_string()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid() {
        let date = DeliveryDate::parse("2025-01-12").unwrap();
        assert_eq!(date.year(), 2025);
        assert_eq!(date.month(), 1);
        assert_eq!(date.day(), 12);
    }

    #[test]
    fn test_parse_rejects_wrong_shape() {
        assert!(DeliveryDate::parse("2025-01").is_err());
        assert!(DeliveryDate::parse("2025-01-12-00").is_err());
        assert!(DeliveryDate::parse("12/01/2025").is_err());
        assert!(DeliveryDate::parse("").is_err());
    }

    #[test]
    fn test_parse_rejects_bad_widths() {
        assert!(DeliveryDate::parse("25-01-12").is_err());
        assert!(DeliveryDate::parse("2025-1-12").is_err());
        assert!(DeliveryDate::parse("2025-01-2").is_err());
    }

    #[test]
    fn test_parse_rejects_out_of_range() {
        assert!(matches!(
            DeliveryDate::parse("2025-13-01"),
            Err(DeliveryDateError::InvalidSegment { segment: "month" })
        ));
        assert!(matches!(
            DeliveryDate::parse("2025-04-31"),
            Err(DeliveryDateError::DayOutOfRange { month: 4, day: 31 })
        ));
        assert!(DeliveryDate::parse("2025-02-29").is_err());
        assert!(DeliveryDate::parse("2024-02-29").is_ok()); // leap year
        assert!(DeliveryDate::parse("2025-06-00").is_err());
    }

    #[test]
    fn test_display_roundtrip() {
        let date = DeliveryDate::parse("2025-03-05").unwrap();
        assert_eq!(date.to_string(), "2025-03-05");
    }

    #[test]
    fn test_serde_as_string() {
        let date: DeliveryDate = serde_json::from_str("\"2025-12-24\"").unwrap();
        assert_eq!(date.day(), 24);
        assert_eq!(serde_json::to_string(&date).unwrap(), "\"2025-12-24\"");
        assert!(serde_json::from_str::<DeliveryDate>("\"2025-02-30\"").is_err());
    }
}
