//! # Date Normalizer
//!
//! Turns the free-form dates operators type into ISO `YYYY-MM-DD`.
//!
//! ## Pattern Priority
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Input (trimmed) ──► try each pattern in order ──► first match wins     │
//! │                                                                         │
//! │   1. YYYY-MM-DD    2024-01-31                                           │
//! │   2. DD-MM-YYYY    31-01-2024                                           │
//! │   3. DD-MM-YY      31-01-24                                             │
//! │   4. YYYY/MM/DD    2024/01/31                                           │
//! │   5. DD/MM/YYYY    31/01/2024                                           │
//! │                                                                         │
//! │  "01-02-03": pattern 1 needs a 4-digit year, pattern 2 too,            │
//! │              pattern 3 matches ──► 2003-02-01                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The order is part of the contract: changing it changes how ambiguous
//! strings resolve.
//!
//! ## Field Widths
//! - Full year: exactly 4 digits
//! - Short year: exactly 2 digits, `00-68` → 20xx, `69-99` → 19xx
//! - Month and day: 1 or 2 digits
//!
//! A pattern that matches the shape but names an impossible date
//! (`31-02-2024`) is skipped and the next pattern is tried.

use chrono::NaiveDate;

use crate::error::FormatError;
use crate::ISO_DATE_FORMAT;

/// One component of a date pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Part {
    Year,
    ShortYear,
    Month,
    Day,
}

/// An accepted input pattern: three parts joined by one separator.
#[derive(Debug, Clone, Copy)]
struct Pattern {
    label: &'static str,
    separator: char,
    parts: [Part; 3],
}

/// Accepted patterns in priority order.
const PATTERNS: [Pattern; 5] = [
    Pattern {
        label: "YYYY-MM-DD",
        separator: '-',
        parts: [Part::Year, Part::Month, Part::Day],
    },
    Pattern {
        label: "DD-MM-YYYY",
        separator: '-',
        parts: [Part::Day, Part::Month, Part::Year],
    },
    Pattern {
        label: "DD-MM-YY",
        separator: '-',
        parts: [Part::Day, Part::Month, Part::ShortYear],
    },
    Pattern {
        label: "YYYY/MM/DD",
        separator: '/',
        parts: [Part::Year, Part::Month, Part::Day],
    },
    Pattern {
        label: "DD/MM/YYYY",
        separator: '/',
        parts: [Part::Day, Part::Month, Part::Year],
    },
];

/// Labels of the accepted patterns, in priority order.
pub fn accepted_patterns() -> impl Iterator<Item = &'static str> {
    PATTERNS.iter().map(|p| p.label)
}

impl Pattern {
    fn parse(&self, input: &str) -> Option<NaiveDate> {
        let mut pieces = input.split(self.separator);
        let mut year = None;
        let mut month = None;
        let mut day = None;

        for part in self.parts {
            let piece = pieces.next()?;
            let value = read_part(part, piece)?;
            match part {
                Part::Year => year = Some(value as i32),
                Part::ShortYear => year = Some(expand_short_year(value)),
                Part::Month => month = Some(value),
                Part::Day => day = Some(value),
            }
        }

        // Whole input must be consumed.
        if pieces.next().is_some() {
            return None;
        }

        NaiveDate::from_ymd_opt(year?, month?, day?)
    }
}

fn read_part(part: Part, piece: &str) -> Option<u32> {
    if piece.is_empty() || !piece.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let width_ok = match part {
        Part::Year => piece.len() == 4,
        Part::ShortYear => piece.len() == 2,
        Part::Month | Part::Day => piece.len() <= 2,
    };
    if !width_ok {
        return None;
    }
    piece.parse().ok()
}

fn expand_short_year(yy: u32) -> i32 {
    if yy < 69 {
        2000 + yy as i32
    } else {
        1900 + yy as i32
    }
}

/// Parses a free-form date.
///
/// ## Returns
/// * `Ok(None)` - input is empty or whitespace
/// * `Ok(Some(date))` - first pattern that matched
/// * `Err(FormatError)` - no pattern matched
///
/// ## Example
/// ```rust
/// use rentdesk_core::dates::parse_date;
///
/// let date = parse_date("31/01/2024").unwrap().unwrap();
/// assert_eq!(date.to_string(), "2024-01-31");
/// assert_eq!(parse_date("   ").unwrap(), None);
/// assert!(parse_date("next tuesday").is_err());
/// ```
pub fn parse_date(input: &str) -> Result<Option<NaiveDate>, FormatError> {
    let input = input.trim();
    if input.is_empty() {
        return Ok(None);
    }

    PATTERNS
        .iter()
        .find_map(|pattern| pattern.parse(input))
        .map(Some)
        .ok_or_else(|| FormatError::new(input))
}

/// Normalizes a free-form date to ISO `YYYY-MM-DD`.
///
/// Idempotent: an ISO input comes back unchanged.
///
/// ## Example
/// ```rust
/// use rentdesk_core::dates::normalize_date;
///
/// assert_eq!(normalize_date("01-02-03").unwrap().as_deref(), Some("2003-02-01"));
/// assert_eq!(normalize_date("2024-01-31").unwrap().as_deref(), Some("2024-01-31"));
/// ```
pub fn normalize_date(input: &str) -> Result<Option<String>, FormatError> {
    Ok(parse_date(input)?.map(|d| d.format(ISO_DATE_FORMAT).to_string()))
}

/// Whole days from `start` to `end` (negative when `end` is earlier).
#[inline]
pub fn days_between(start: NaiveDate, end: NaiveDate) -> i64 {
    (end - start).num_days()
}

// =============================================================================
// Unit Tests
// =============================================================================
