//! # Rental Pricing
//!
//! Computes what a rental costs from a daily rate and a date range.
//!
//! ## The Rule
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  days   = max(1, (end - start) + 1)      start and end both billed     │
//! │  amount = rate × days                                                   │
//! │                                                                         │
//! │  2024-01-01 → 2024-01-03 @ 50.00   =  3 days  = 150.00                 │
//! │  2024-01-01 → 2024-01-01 @ 20.00   =  1 day   =  20.00                 │
//! │  end omitted                       =  end is start                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The rental form calls [`QuoteInputs::from_fields`] on every keystroke. Half
//! typed input is a normal state there, so it yields `None` rather than an
//! error and the form simply shows no amount. A product too large for cents
//! is treated the same way.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::dates::{days_between, parse_date};
use crate::money::Money;

/// A computed price for a rental period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quote {
    /// Billed days (always at least 1).
    pub days: i64,
    /// Daily rate used.
    pub rate: Money,
    /// `rate × days`.
    pub amount: Money,
}

/// Number of billed days between two dates, inclusive of both ends.
///
/// An end before the start still bills one day.
#[inline]
pub fn billed_days(start: NaiveDate, end: NaiveDate) -> i64 {
    (days_between(start, end) + 1).max(1)
}

/// Prices a rental.
///
/// Returns `None` when `rate × days` overflows.
///
/// ## Example
/// ```rust
/// use chrono::NaiveDate;
/// use rentdesk_core::{money::Money, pricing::price};
///
/// let day = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
/// let quote = price(Money::from_cents(2000), day, None).unwrap();
/// assert_eq!(quote.days, 1);
/// assert_eq!(quote.amount.to_string(), "20.00");
/// ```
pub fn price(rate: Money, start: NaiveDate, end: Option<NaiveDate>) -> Option<Quote> {
    let days = billed_days(start, end.unwrap_or(start));
    Some(Quote {
        days,
        rate,
        amount: rate.multiply_days(days)?,
    })
}

impl fmt::Display for Quote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}   ( {} days @ {} )", self.amount, self.days, self.rate)
    }
}

// =============================================================================
// Quote Inputs
// =============================================================================

/// Parsed rental-form fields that are enough to look up a rate and price.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuoteInputs {
    pub vehicle_id: i64,
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl QuoteInputs {
    /// Reads the three raw form fields the live quote depends on.
    ///
    /// Returns `None` when the vehicle id is blank or not an integer, when the
    /// start date is blank, or when either date does not parse. A blank end
    /// falls back to the start text.
    pub fn from_fields(vehicle_id: &str, start: &str, end: &str) -> Option<QuoteInputs> {
        let vehicle_id = vehicle_id.trim().parse::<i64>().ok()?;

        let start_text = start.trim();
        let start = parse_date(start_text).ok()??;

        let end_text = if end.trim().is_empty() {
            start_text
        } else {
            end
        };
        let end = parse_date(end_text).ok()??;

        Some(QuoteInputs {
            vehicle_id,
            start,
            end,
        })
    }

    /// Prices these inputs with the rate the store returned for the vehicle.
    pub fn price_with(&self, rate: Money) -> Option<Quote> {
        price(rate, self.start, Some(self.end))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_three_day_rental() {
        let quote = price(Money::from_cents(5000), date(2024, 1, 1), Some(date(2024, 1, 3))).unwrap();
        assert_eq!(quote.days, 3);
        assert_eq!(quote.amount, Money::from_cents(15000));
    }

    #[test]
    fn test_same_day_bills_one_day() {
        let quote = price(Money::from_cents(2000), date(2024, 1, 1), Some(date(2024, 1, 1))).unwrap();
        assert_eq!(quote.days, 1);
        assert_eq!(quote.amount, Money::from_cents(2000));
    }

    #[test]
    fn test_missing_end_defaults_to_start() {
        let quote = price(Money::from_cents(2000), date(2024, 1, 1), None).unwrap();
        assert_eq!(quote.days, 1);
    }

    #[test]
    fn test_end_before_start_floors_at_one_day() {
        assert_eq!(billed_days(date(2024, 1, 10), date(2024, 1, 1)), 1);
    }

    #[test]
    fn test_amount_is_rate_times_inclusive_days() {
        let rate = Money::from_cents(1999);
        let start = date(2024, 2, 27);
        for span in 0..10 {
            let end = start + chrono::Duration::days(span);
            let quote = price(rate, start, Some(end)).unwrap();
            assert_eq!(quote.amount.cents(), 1999 * (span + 1));
        }
    }

    #[test]
    fn test_display() {
        let quote = price(Money::from_cents(5000), date(2024, 1, 1), Some(date(2024, 1, 3))).unwrap();
        assert_eq!(quote.to_string(), "150.00   ( 3 days @ 50.00 )");

        let quote = price(Money::from_cents(2000), date(2024, 1, 1), None).unwrap();
        assert_eq!(quote.to_string(), "20.00   ( 1 days @ 20.00 )");
    }

    #[test]
    fn test_inputs_from_complete_fields() {
        let inputs = QuoteInputs::from_fields(" 4 ", "01-01-2024", "2024/01/03").unwrap();
        assert_eq!(inputs.vehicle_id, 4);
        assert_eq!(inputs.start, date(2024, 1, 1));
        assert_eq!(inputs.end, date(2024, 1, 3));
        assert_eq!(inputs.price_with(Money::from_cents(5000)).unwrap().amount.cents(), 15000);
    }

    #[test]
    fn test_huge_rate_yields_no_quote() {
        let rate = Money::parse_decimal("50000000000000000").unwrap();
        let inputs = QuoteInputs::from_fields("1", "2024-01-01", "2024-01-02").unwrap();
        assert_eq!(inputs.price_with(rate), None);
        assert!(price(rate, date(2024, 1, 1), None).is_some());
    }

    #[test]
    fn test_inputs_blank_end_uses_start() {
        let inputs = QuoteInputs::from_fields("4", "2024-01-01", "  ").unwrap();
        assert_eq!(inputs.end, inputs.start);
    }

    #[test]
    fn test_insufficient_inputs_yield_none() {
        assert_eq!(QuoteInputs::from_fields("", "2024-01-01", ""), None);
        assert_eq!(QuoteInputs::from_fields("four", "2024-01-01", ""), None);
        assert_eq!(QuoteInputs::from_fields("4", "", "2024-01-03"), None);
        assert_eq!(QuoteInputs::from_fields("4", "2024-01-", ""), None);
        assert_eq!(QuoteInputs::from_fields("4", "2024-01-01", "soon"), None);
    }
}
