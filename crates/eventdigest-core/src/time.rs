//! Instant parsing and the acceptance window.
//!
//! This module provides [`parse_instant`], which turns the loosely formatted
//! start strings found in calendar exports into UTC instants, and
//! [`AcceptanceWindow`], the `[now, now + days]` range an occurrence must
//! start in to be kept.

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

/// Naive date-time layouts accepted when the string carries no offset.
const NAIVE_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// Parses an instant from a calendar export string.
///
/// Accepted, in order:
/// - RFC 3339 (`2025-06-01T10:00:00Z`, `2025-06-01T06:00:00-04:00`)
/// - a date-time without offset, read as UTC (`2025-06-01T10:00:00`)
/// - a bare date, read as UTC midnight (`2025-06-01`)
/// - RFC 2822 (`Sun, 01 Jun 2025 10:00:00 +0000`)
///
/// Leading and trailing whitespace is ignored. Returns `None` for anything
/// else.
pub fn parse_instant(raw: &str) -> Option<DateTime<Utc>> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }

    for format in NAIVE_DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, format) {
            return Some(naive.and_utc());
        }
    }

    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0).map(|naive| naive.and_utc());
    }

    DateTime::parse_from_rfc2822(s)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

/// The range an occurrence's start must fall in.
///
/// Unlike a query window this is closed on both ends: `[start, end]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AcceptanceWindow {
    /// Earliest accepted start (inclusive), normally "now".
    pub start: DateTime<Utc>,
    /// The cutoff (inclusive).
    pub end: DateTime<Utc>,
}

impl AcceptanceWindow {
    /// Creates a window from explicit bounds.
    ///
    /// A window whose end precedes its start is valid and contains nothing.
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self { start, end }
    }

    /// Creates the window `[now, now + days]`.
    ///
    /// The cutoff saturates at the largest representable instant.
    pub fn days_ahead(now: DateTime<Utc>, days: i64) -> Self {
        let end = Duration::try_days(days)
            .and_then(|span| now.checked_add_signed(span))
            .unwrap_or(if days < 0 {
                DateTime::<Utc>::MIN_UTC
            } else {
                DateTime::<Utc>::MAX_UTC
            });
        Self { start: now, end }
    }

    /// Returns the length of the window.
    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    /// Checks if an instant falls within this window, bounds included.
    pub fn contains(&self, dt: DateTime<Utc>) -> bool {
        self.start <= dt && dt <= self.end
    }

    /// Returns true if `dt` is strictly before the window opens.
    pub fn is_before(&self, dt: DateTime<Utc>) -> bool {
        dt < self.start
    }

    /// Returns true if `dt` is strictly after the cutoff.
    pub fn is_after(&self, dt: DateTime<Utc>) -> bool {
        dt > self.end
    }
}
