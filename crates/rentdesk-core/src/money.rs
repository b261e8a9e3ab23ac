//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In floating point:                                                     │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  A rate of 19.99/day over 3 days must bill exactly 59.97.              │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents                                            │
//! │    1999 cents × 3 = 5997 cents                                          │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Operators type rates as decimal text (`"50.00"`); [`Money::parse_decimal`]
//! converts them to cents at the edge and nothing else ever sees a float.
//!
//! ## Usage
//! ```rust
//! use rentdesk_core::money::Money;
//!
//! let rate = Money::parse_decimal("19.99").unwrap();
//! assert_eq!(rate.cents(), 1999);
//!
//! let total = rate.multiply_days(3).unwrap();
//! assert_eq!(total.to_string(), "59.97");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

use crate::error::ValidationError;

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value in the smallest currency unit (cents).
///
/// ## Design Decisions
/// - **i64 (signed)**: Leaves room for credits/adjustments
/// - **Single field tuple struct**: Zero-cost abstraction over i64
/// - **Derives**: Full serde support for JSON serialization
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents (the smallest currency unit).
    ///
    /// ## Example
    /// ```rust
    /// use rentdesk_core::money::Money;
    ///
    /// let rate = Money::from_cents(5000); // 50.00 per day
    /// assert_eq!(rate.cents(), 5000);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Parses operator-typed decimal text into Money.
    ///
    /// ## Accepted Input
    /// - `"50"`, `"50.5"`, `"50.55"`, `"-3.10"`
    /// - Surrounding whitespace is ignored
    ///
    /// ## Rejected Input
    /// - Empty text, more than two fraction digits, anything non-numeric
    ///
    /// ## Example
    /// ```rust
    /// use rentdesk_core::money::Money;
    ///
    /// assert_eq!(Money::parse_decimal("50.5").unwrap().cents(), 5050);
    /// assert!(Money::parse_decimal("50.555").is_err());
    /// ```
    pub fn parse_decimal(text: &str) -> Result<Money, ValidationError> {
        let invalid = |reason: &str| ValidationError::InvalidFormat {
            field: "amount".to_string(),
            reason: reason.to_string(),
        };

        let text = text.trim();
        if text.is_empty() {
            return Err(ValidationError::Required {
                field: "amount".to_string(),
            });
        }

        let (negative, digits) = match text.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, text.strip_prefix('+').unwrap_or(text)),
        };

        let (whole, fraction) = match digits.split_once('.') {
            Some((whole, fraction)) => (whole, fraction),
            None => (digits, ""),
        };

        if whole.is_empty() && fraction.is_empty() {
            return Err(invalid("expected a decimal number"));
        }
        if !whole.chars().all(|c| c.is_ascii_digit())
            || !fraction.chars().all(|c| c.is_ascii_digit())
        {
            return Err(invalid("expected a decimal number"));
        }
        if fraction.len() > 2 {
            return Err(invalid("at most two decimal places"));
        }

        let whole: i64 = if whole.is_empty() {
            0
        } else {
            whole.parse().map_err(|_| invalid("value is too large"))?
        };
        let minor: i64 = match fraction.len() {
            0 => 0,
            1 => fraction.parse::<i64>().map_err(|_| invalid("expected digits"))? * 10,
            _ => fraction.parse().map_err(|_| invalid("expected digits"))?,
        };

        let cents = whole
            .checked_mul(100)
            .and_then(|c| c.checked_add(minor))
            .ok_or_else(|| invalid("value is too large"))?;

        Ok(Money(if negative { -cents } else { cents }))
    }

    /// Returns the value in cents (smallest currency unit).
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the major unit portion.
    #[inline]
    pub const fn major(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit portion (always 0-99).
    #[inline]
    pub const fn minor(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Checks if the value is positive (greater than zero).
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Multiplies a daily rate by a number of billed days.
    ///
    /// Returns `None` when the product does not fit in cents.
    ///
    /// ## Example
    /// ```rust
    /// use rentdesk_core::money::Money;
    ///
    /// let rate = Money::from_cents(2000);
    /// assert_eq!(rate.multiply_days(7), Some(Money::from_cents(14000)));
    /// assert_eq!(Money::from_cents(i64::MAX).multiply_days(2), None);
    /// ```
    #[inline]
    pub const fn multiply_days(&self, days: i64) -> Option<Self> {
        match self.0.checked_mul(days) {
            Some(cents) => Some(Money(cents)),
            None => None,
        }
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Plain decimal rendering (`150.00`), matching what the rental tables show.
/// Currency symbols are added by the front-end configuration.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}{}.{:02}", sign, self.major().abs(), self.minor())
    }
}

impl Default for Money {
    fn default() -> Self {
        Money(0)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
