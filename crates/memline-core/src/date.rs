#![forbid(unsafe_code)]

//! Temporal index: calendar-day arithmetic over entry dates.
//!
//! Dates are plain calendar days. There is no time-of-day and no time zone;
//! `2020-03-01` is one day after `2020-02-29` everywhere.
//!
//! Entry dates arrive as strings. Anything that is not a `YYYY-MM-DD` date
//! (optionally followed by an ISO time part, which is ignored) parses to a
//! [`DateParseError`]. Callers treat such entries as undated: they are left
//! out of the date range but still laid out.

use std::fmt;

use chrono::{Days, NaiveDate};

/// Format used for date keys on entries.
pub const DATE_KEY_FORMAT: &str = "%Y-%m-%d";

/// Why a date string was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateParseErrorKind {
    /// The string was empty or whitespace.
    Empty,
    /// The string is not shaped like `YYYY-MM-DD`.
    Shape,
    /// Shaped correctly but not a real calendar day (e.g. `2021-02-30`).
    Calendar,
}

/// A date string that could not be turned into a calendar day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateParseError {
    input: String,
    kind: DateParseErrorKind,
}

impl DateParseError {
    fn new(input: &str, kind: DateParseErrorKind) -> Self {
        Self {
            input: input.to_string(),
            kind,
        }
    }

    /// The rejected input.
    #[must_use]
    pub fn input(&self) -> &str {
        &self.input
    }

    /// The rejection reason.
    #[must_use]
    pub fn kind(&self) -> DateParseErrorKind {
        self.kind
    }
}

impl fmt::Display for DateParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            DateParseErrorKind::Empty => write!(f, "empty date"),
            DateParseErrorKind::Shape => write!(f, "not a YYYY-MM-DD date: {:?}", self.input),
            DateParseErrorKind::Calendar => write!(f, "no such calendar day: {:?}", self.input),
        }
    }
}

impl std::error::Error for DateParseError {}

/// Returns true if `s` is exactly `YYYY-MM-DD` shaped (digits and dashes).
///
/// Only checks the shape; `2021-02-30` passes. Grouping uses this to decide
/// whether a date string is a usable day key.
#[must_use]
pub fn is_date_key(s: &str) -> bool {
    let b = s.as_bytes();
    b.len() == 10
        && b.iter().enumerate().all(|(i, c)| match i {
            4 | 7 => *c == b'-',
            _ => c.is_ascii_digit(),
        })
}

/// Parse an entry date string into a calendar day.
///
/// Accepts `YYYY-MM-DD`, optionally followed by `T...` (time ignored).
pub fn parse_date(s: &str) -> Result<NaiveDate, DateParseError> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return Err(DateParseError::new(s, DateParseErrorKind::Empty));
    }
    let key = match trimmed.get(..10) {
        Some(head) if trimmed.len() == 10 || trimmed[10..].starts_with('T') => head,
        _ => return Err(DateParseError::new(s, DateParseErrorKind::Shape)),
    };
    if !is_date_key(key) {
        return Err(DateParseError::new(s, DateParseErrorKind::Shape));
    }
    NaiveDate::parse_from_str(key, DATE_KEY_FORMAT)
        .map_err(|_| DateParseError::new(s, DateParseErrorKind::Calendar))
}

/// Calendar days from `epoch` to `date` (negative if `date` is earlier).
#[inline]
#[must_use]
pub fn day_offset(date: NaiveDate, epoch: NaiveDate) -> i64 {
    date.signed_duration_since(epoch).num_days()
}

/// Shift a date by `n` calendar days, saturating at the calendar bounds.
#[must_use]
pub fn add_days(date: NaiveDate, n: i64) -> NaiveDate {
    let days = Days::new(n.unsigned_abs());
    let shifted = if n >= 0 {
        date.checked_add_days(days)
    } else {
        date.checked_sub_days(days)
    };
    shifted.unwrap_or(if n >= 0 {
        NaiveDate::MAX
    } else {
        NaiveDate::MIN
    })
}

/// Human label for an entry date, e.g. `Feb 02, 1994`.
///
/// Empty for a missing date; unparseable strings are shown as-is.
#[must_use]
pub fn format_date_label(date: Option<&str>) -> String {
    match date.map(str::trim) {
        None | Some("") => String::new(),
        Some(raw) => match parse_date(raw) {
            Ok(d) => d.format("%b %d, %Y").to_string(),
            Err(_) => raw.to_string(),
        },
    }
}

/// Inclusive calendar range covered by the axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DateRange {
    /// First day (inclusive).
    pub start: NaiveDate,
    /// Last day (inclusive).
    pub end: NaiveDate,
}

impl DateRange {
    /// Create a range; the bounds are swapped if given out of order.
    #[must_use]
    pub fn new(a: NaiveDate, b: NaiveDate) -> Self {
        if a <= b {
            Self { start: a, end: b }
        } else {
            Self { start: b, end: a }
        }
    }

    /// Smallest range containing every date, or `None` for no dates.
    pub fn from_dates<I>(dates: I) -> Option<Self>
    where
        I: IntoIterator<Item = NaiveDate>,
    {
        dates.into_iter().fold(None, |acc, d| match acc {
            None => Some(Self { start: d, end: d }),
            Some(r) => Some(Self {
                start: r.start.min(d),
                end: r.end.max(d),
            }),
        })
    }

    /// Grow the range by `days` on both sides.
    #[must_use]
    pub fn padded(&self, days: i64) -> Self {
        Self::new(add_days(self.start, -days), add_days(self.end, days))
    }

    /// Length in days, never less than 1.
    #[must_use]
    pub fn span_days(&self) -> i64 {
        day_offset(self.end, self.start).max(1)
    }

    /// Whether `date` falls inside the range.
    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }
}
