//! RawRow to Event validation and normalization.
//!
//! Every reconstructed row either becomes an [`Event`] or is dropped with a
//! [`SkipReason`]. Dropping is policy, not failure: nothing here returns an
//! error to the caller.
//!
//! The checks, in order:
//! 1. start and end must be present and non-empty
//! 2. status, once normalized, must be `confirmed` (blank counts as confirmed)
//! 3. start must parse as an instant
//! 4. start must fall inside the acceptance window
//! 5. summary, once normalized, must not be empty

use std::fmt;

use eventdigest_core::{
    AcceptanceWindow, CONFIRMED_STATUS, Event, normalize_text, parse_attendee_count,
    parse_instant,
};

use crate::fields::Field;
use crate::record::{is_truthy, optional_text, value_text};
use crate::rows::RawRow;

/// Why a row did not produce an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SkipReason {
    /// Start is absent or empty.
    MissingStart,
    /// End is absent or empty.
    MissingEnd,
    /// Status is something other than `confirmed`.
    NotConfirmed,
    /// Start is not a recognizable instant.
    UnparseableStart,
    /// Start is before the window opens.
    InThePast,
    /// Start is after the cutoff.
    BeyondCutoff,
    /// Summary is empty after normalization.
    EmptySummary,
}

impl SkipReason {
    /// Returns a stable name for logging.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MissingStart => "missing_start",
            Self::MissingEnd => "missing_end",
            Self::NotConfirmed => "not_confirmed",
            Self::UnparseableStart => "unparseable_start",
            Self::InThePast => "in_the_past",
            Self::BeyondCutoff => "beyond_cutoff",
            Self::EmptySummary => "empty_summary",
        }
    }
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What the normalizer needs to know beyond the row itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowRules {
    /// Range the start must fall in.
    pub window: AcceptanceWindow,
    /// Zone assigned to events that carry none.
    pub default_time_zone: String,
}

/// Validates one row and builds its event.
///
/// `start_iso`/`end_iso` keep the raw text form of the input; every other
/// text field is whitespace-collapsed and trimmed.
pub fn normalize_row(row: &RawRow, rules: &RowRules) -> Result<Event, SkipReason> {
    let start = row
        .get(Field::Start)
        .filter(|v| is_truthy(v))
        .ok_or(SkipReason::MissingStart)?;
    let end = row
        .get(Field::End)
        .filter(|v| is_truthy(v))
        .ok_or(SkipReason::MissingEnd)?;

    let status = match normalize_text(&optional_text(row.get(Field::Status))).to_lowercase() {
        s if s.is_empty() => CONFIRMED_STATUS.to_string(),
        s => s,
    };
    if status != CONFIRMED_STATUS {
        return Err(SkipReason::NotConfirmed);
    }

    let start_iso = value_text(start);
    let starts_at = parse_instant(&start_iso).ok_or(SkipReason::UnparseableStart)?;
    if rules.window.is_before(starts_at) {
        return Err(SkipReason::InThePast);
    }
    if rules.window.is_after(starts_at) {
        return Err(SkipReason::BeyondCutoff);
    }

    let text = |field: Field| normalize_text(&optional_text(row.get(field)));

    let summary = text(Field::Summary);
    if summary.is_empty() {
        return Err(SkipReason::EmptySummary);
    }

    let time_zone = match text(Field::TimeZone) {
        tz if tz.is_empty() => rules.default_time_zone.clone(),
        tz => tz,
    };

    Ok(Event {
        id: text(Field::Id),
        recurring_event_id: text(Field::RecurringEventId),
        summary,
        description: text(Field::Description),
        location: text(Field::Location),
        start_iso,
        end_iso: value_text(end),
        time_zone,
        attendee_count: parse_attendee_count(&optional_text(row.get(Field::Attendees))),
        html_link: text(Field::HtmlLink),
        status,
    })
}

/// Lazily normalizes rows in order, dropping the ones that fail validation.
///
/// Each dropped row is logged at trace level with its index and reason.
pub fn normalize_rows<'a>(
    rows: &'a [RawRow],
    rules: &'a RowRules,
) -> impl Iterator<Item = Event> + 'a {
    rows.iter()
        .enumerate()
        .filter_map(move |(index, row)| match normalize_row(row, rules) {
            Ok(event) => Some(event),
            Err(reason) => {
                tracing::trace!(row = index, %reason, "skipping row");
                None
            }
        })
}
