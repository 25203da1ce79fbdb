//! Event types for the digest.
//!
//! This module provides the two output-facing records:
//! - [`Event`]: one validated, normalized calendar occurrence
//! - [`Series`]: the aggregate of every occurrence sharing a series key

use serde::{Deserialize, Serialize};

use crate::time::parse_instant;

/// The only event status that survives validation.
pub const CONFIRMED_STATUS: &str = "confirmed";

/// A validated calendar occurrence.
///
/// Built once by the normalizer from a reconstructed row and never mutated
/// afterwards. `start_iso` and `end_iso` keep the original string form of the
/// input values; they are not reformatted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    /// Provider event identifier, may be empty.
    pub id: String,
    /// Identifier of the recurring series this occurrence belongs to, may be empty.
    pub recurring_event_id: String,
    /// The event title. Never empty.
    pub summary: String,
    pub description: String,
    pub location: String,
    /// Start as it appeared in the input.
    #[serde(rename = "startISO")]
    pub start_iso: String,
    /// End as it appeared in the input.
    #[serde(rename = "endISO")]
    pub end_iso: String,
    /// IANA zone identifier used when rendering the start.
    pub time_zone: String,
    pub attendee_count: u64,
    pub html_link: String,
    /// Lowercase status, always [`CONFIRMED_STATUS`].
    pub status: String,
}

impl Event {
    /// Creates an event with the required fields and empty optional text.
    pub fn new(
        summary: impl Into<String>,
        start_iso: impl Into<String>,
        end_iso: impl Into<String>,
        time_zone: impl Into<String>,
    ) -> Self {
        Self {
            id: String::new(),
            recurring_event_id: String::new(),
            summary: summary.into(),
            description: String::new(),
            location: String::new(),
            start_iso: start_iso.into(),
            end_iso: end_iso.into(),
            time_zone: time_zone.into(),
            attendee_count: 0,
            html_link: String::new(),
            status: CONFIRMED_STATUS.to_string(),
        }
    }

    /// The key used to detect duplicate occurrences.
    ///
    /// `id|start` when the event has an id, otherwise
    /// `recurring_event_id|start|summary`.
    pub fn identity_key(&self) -> String {
        if self.id.is_empty() {
            format!(
                "{}|{}|{}",
                self.recurring_event_id, self.start_iso, self.summary
            )
        } else {
            format!("{}|{}", self.id, self.start_iso)
        }
    }

    /// The key grouping this occurrence into a [`Series`].
    ///
    /// Falls back from the recurring id to the id, then to the summary.
    pub fn series_key(&self) -> &str {
        if !self.recurring_event_id.is_empty() {
            &self.recurring_event_id
        } else if !self.id.is_empty() {
            &self.id
        } else {
            &self.summary
        }
    }

    /// Parses `start_iso` as a UTC instant.
    pub fn start_instant(&self) -> Option<chrono::DateTime<chrono::Utc>> {
        parse_instant(&self.start_iso)
    }

    /// Builder method to set the id.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    /// Builder method to set the recurring event id.
    pub fn with_recurring_event_id(mut self, id: impl Into<String>) -> Self {
        self.recurring_event_id = id.into();
        self
    }

    /// Builder method to set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Builder method to set the location.
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = location.into();
        self
    }

    /// Builder method to set the attendee count.
    pub fn with_attendee_count(mut self, count: u64) -> Self {
        self.attendee_count = count;
        self
    }
}

/// Occurrences grouped under one series key.
///
/// Representative text is taken from the first occurrence seen for the key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Series {
    pub series_key: String,
    pub summary: String,
    pub description: String,
    pub location: String,
    pub occurrences: u64,
    pub total_attendees: u64,
    /// `start_iso` of each occurrence, in the order they were added.
    pub starts: Vec<String>,
}

impl Series {
    /// Opens an empty series whose representative fields come from `first`.
    pub fn open(first: &Event) -> Self {
        Self {
            series_key: first.series_key().to_string(),
            summary: first.summary.clone(),
            description: first.description.clone(),
            location: first.location.clone(),
            occurrences: 0,
            total_attendees: 0,
            starts: Vec::new(),
        }
    }

    /// Adds one occurrence to the running totals.
    pub fn record(&mut self, event: &Event) {
        self.occurrences += 1;
        self.total_attendees = self.total_attendees.saturating_add(event.attendee_count);
        self.starts.push(event.start_iso.clone());
    }
}
