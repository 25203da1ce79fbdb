//! Logical fields and their accepted aliases.
//!
//! Exports name the same column differently depending on which step
//! produced them (`summary`, `results_summary`, `title`, ...). The alias
//! table below is the single place that knows about those names; the
//! resolver just walks it.

use serde_json::Value;

use crate::record::{RawRecord, value_text};

/// A logical event field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Field {
    Id,
    Summary,
    Description,
    Location,
    Start,
    End,
    Status,
    HtmlLink,
    RecurringEventId,
    Attendees,
    TimeZone,
}

impl Field {
    /// Number of logical fields.
    pub const COUNT: usize = 11;

    /// Every field, in row order.
    pub const ALL: [Field; Self::COUNT] = [
        Self::Id,
        Self::Summary,
        Self::Description,
        Self::Location,
        Self::Start,
        Self::End,
        Self::Status,
        Self::HtmlLink,
        Self::RecurringEventId,
        Self::Attendees,
        Self::TimeZone,
    ];

    /// Position of this field in [`Field::ALL`].
    pub fn index(self) -> usize {
        self as usize
    }

    /// The canonical name, which is also the first alias.
    pub fn name(self) -> &'static str {
        self.aliases()[0]
    }

    /// The accepted input names, in priority order.
    pub fn aliases(self) -> &'static [&'static str] {
        FIELD_ALIASES[self.index()].1
    }
}

/// Accepted input names per logical field, highest priority first.
///
/// Entries are in [`Field::ALL`] order so a field's index finds its row.
pub const FIELD_ALIASES: [(Field, &[&str]); Field::COUNT] = [
    (Field::Id, &["id", "results_id", "event_id"]),
    (Field::Summary, &["summary", "results_summary", "title"]),
    (
        Field::Description,
        &["description", "results_description", "details"],
    ),
    (Field::Location, &["location", "results_location"]),
    (Field::Start, &["start", "event_begins", "start_datetime"]),
    (Field::End, &["end", "event_ends", "end_datetime"]),
    (Field::Status, &["status", "results_status"]),
    (Field::HtmlLink, &["html_link", "results_html_link", "link"]),
    (
        Field::RecurringEventId,
        &["recurring_event_id", "results_recurring_event_id"],
    ),
    (
        Field::Attendees,
        &[
            "attendee_emails_or_count",
            "results_attendee_emails",
            "attendee_count",
        ],
    ),
    (
        Field::TimeZone,
        &["start_time_zone", "results_start_time_zone", "time_zone"],
    ),
];

/// Returns the value of the first alias that is present and not blank.
///
/// A value counts as blank when its text form trims to nothing, so `null`,
/// `""`, `"  "`, `[]` and `[""]` are all skipped in favor of later aliases.
pub fn resolve<'a>(record: &'a RawRecord, aliases: &[&str]) -> Option<&'a Value> {
    aliases
        .iter()
        .filter_map(|alias| record.get(alias))
        .find(|value| !value_text(value).trim().is_empty())
}

/// Resolves a logical field through its alias list.
pub fn resolve_field(record: &RawRecord, field: Field) -> Option<&Value> {
    resolve(record, field.aliases())
}
