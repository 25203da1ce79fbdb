//! Announcement formatting for digest events.
//!
//! This module renders each [`Event`] into a single display line:
//!
//! ```text
//! <when> - <summary>[ (<N> attendees)][ at <location>][ | <description>]
//! ```
//!
//! Rendering `<when>` is delegated to a [`DateFormatter`]; the default
//! [`ZonedDateFormatter`] produces an en-US short form such as
//! `Sun, Jun 1, 6:00 AM` in the event's own zone.
//!
//! # Example
//!
//! ```rust
//! use eventdigest_core::format::{AnnouncementFormatter, ZonedDateFormatter};
//! use eventdigest_core::Event;
//!
//! let formatter = AnnouncementFormatter::new(ZonedDateFormatter::default());
//! let event = Event::new(
//!     "Standup",
//!     "2025-06-01T14:00:00Z",
//!     "2025-06-01T14:15:00Z",
//!     "America/New_York",
//! );
//! assert_eq!(formatter.format_line(&event), "Sun, Jun 1, 10:00 AM - Standup");
//! ```

use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::event::Event;
use crate::time::parse_instant;

/// Zone used when an event carries none, or an unknown one.
pub const DEFAULT_TIME_ZONE: &str = "America/New_York";

/// en-US short weekday, month, day and 12-hour time.
const ANNOUNCEMENT_DATE_FORMAT: &str = "%a, %b %-d, %-I:%M %p";

/// The output format for the digest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    /// The full output record as JSON.
    #[default]
    Json,
    /// Only the announcement lines.
    Text,
}

/// Renders an event start for display.
///
/// Receives the start exactly as stored on the event and the event's zone
/// identifier. Implementations must not fail; unrenderable input should come
/// back in some readable form.
pub trait DateFormatter {
    fn format_start(&self, start_iso: &str, time_zone: &str) -> String;
}

impl<F: DateFormatter + ?Sized> DateFormatter for &F {
    fn format_start(&self, start_iso: &str, time_zone: &str) -> String {
        (**self).format_start(start_iso, time_zone)
    }
}

/// Formats starts in their IANA zone using the tz database from `chrono-tz`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ZonedDateFormatter {
    default_zone: Tz,
}

impl ZonedDateFormatter {
    /// Creates a formatter falling back to `default_zone` for unknown zones.
    pub fn new(default_zone: Tz) -> Self {
        Self { default_zone }
    }

    /// Creates a formatter from a zone name, or `None` if the name is unknown.
    pub fn from_zone_name(name: &str) -> Option<Self> {
        name.parse::<Tz>().ok().map(Self::new)
    }

    /// Returns the fallback zone.
    pub fn default_zone(&self) -> Tz {
        self.default_zone
    }

    fn resolve_zone(&self, time_zone: &str) -> Tz {
        match time_zone.trim() {
            "" => self.default_zone,
            name => name.parse::<Tz>().unwrap_or_else(|_| {
                tracing::debug!(zone = name, "unknown time zone, using default");
                self.default_zone
            }),
        }
    }
}

impl Default for ZonedDateFormatter {
    fn default() -> Self {
        Self::new(chrono_tz::America::New_York)
    }
}

impl DateFormatter for ZonedDateFormatter {
    fn format_start(&self, start_iso: &str, time_zone: &str) -> String {
        match parse_instant(start_iso) {
            Some(instant) => instant
                .with_timezone(&self.resolve_zone(time_zone))
                .format(ANNOUNCEMENT_DATE_FORMAT)
                .to_string(),
            None => start_iso.to_string(),
        }
    }
}

/// Builds announcement lines for events.
#[derive(Debug, Clone)]
pub struct AnnouncementFormatter<F> {
    dates: F,
}

impl<F: DateFormatter> AnnouncementFormatter<F> {
    /// Creates a new formatter using the given date formatter.
    pub fn new(dates: F) -> Self {
        Self { dates }
    }

    /// Formats one event as a single line.
    pub fn format_line(&self, event: &Event) -> String {
        let mut line = format!(
            "{} - {}",
            self.dates.format_start(&event.start_iso, &event.time_zone),
            event.summary
        );
        if event.attendee_count > 0 {
            line.push_str(&format!(" ({} attendees)", event.attendee_count));
        }
        if !event.location.is_empty() {
            line.push_str(" at ");
            line.push_str(&event.location);
        }
        if !event.description.is_empty() {
            line.push_str(" | ");
            line.push_str(&event.description);
        }
        line
    }

    /// Formats all events, one line each, joined with newlines.
    pub fn format_all(&self, events: &[Event]) -> String {
        events
            .iter()
            .map(|event| self.format_line(event))
            .collect::<Vec<_>>()
            .join("\n")
    }
}
