//! The digest pipeline entry point.
//!
//! [`run`] takes one [`RawRecord`] and an explicit [`PipelineConfig`] and
//! produces a [`Digest`]: resolve → coerce → rebuild rows → validate →
//! dedup → sort → aggregate → announce. The transform is pure: no clock
//! reads, no I/O, and the same record and config always give the same
//! digest.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use eventdigest_core::{
    AcceptanceWindow, AnnouncementFormatter, DEFAULT_TIME_ZONE, DateFormatter, Event, Series,
    ZonedDateFormatter, parse_instant,
};

use crate::dedup::dedup_events;
use crate::error::{IngestError, IngestResult};
use crate::normalize::{RowRules, normalize_rows};
use crate::record::{RawRecord, is_truthy, value_text};
use crate::rows::{FieldSequences, reconstruct_rows};
use crate::series::aggregate_series;

/// Default length of the acceptance window, in days.
pub const DEFAULT_DAYS_AHEAD: i64 = 120;

/// Record field overriding the window length.
pub const DAYS_AHEAD_FIELD: &str = "days_ahead";

/// Record field overriding "now".
pub const NOW_FIELD: &str = "now_iso";

/// Read-only settings for one pipeline run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineConfig {
    /// Start of the acceptance window.
    pub now: DateTime<Utc>,
    /// Length of the acceptance window, in days.
    pub days_ahead: i64,
    /// Zone given to events without one, and used for unknown zones.
    pub default_time_zone: String,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self::new(Utc::now())
    }
}

impl PipelineConfig {
    /// Creates a config anchored at `now` with default window and zone.
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            now,
            days_ahead: DEFAULT_DAYS_AHEAD,
            default_time_zone: DEFAULT_TIME_ZONE.to_string(),
        }
    }

    /// Builder method to set "now".
    #[must_use]
    pub fn with_now(mut self, now: DateTime<Utc>) -> Self {
        self.now = now;
        self
    }

    /// Builder method to set the window length.
    #[must_use]
    pub fn with_days_ahead(mut self, days: i64) -> Self {
        self.days_ahead = days;
        self
    }

    /// Builder method to set the default zone.
    #[must_use]
    pub fn with_default_time_zone(mut self, zone: impl Into<String>) -> Self {
        self.default_time_zone = zone.into();
        self
    }

    /// Applies the `days_ahead` and `now_iso` scalars carried by a record.
    ///
    /// Absent values leave the config untouched. A `days_ahead` that is zero
    /// or not a number falls back to [`DEFAULT_DAYS_AHEAD`]; a `now_iso`
    /// that does not parse is ignored with a warning.
    ///
    /// An unparseable `now_iso` keeps the configured `now` and the window
    /// still applies. Upstream exports treated that case as "no window at
    /// all"; this departure is deliberate.
    #[must_use]
    pub fn apply_record(mut self, record: &RawRecord) -> Self {
        if let Some(value) = record.get(DAYS_AHEAD_FIELD) {
            self.days_ahead = coerce_days_ahead(value).unwrap_or_else(|| {
                if is_truthy(value) {
                    tracing::warn!(value = %value, "ignoring non-numeric days_ahead");
                }
                DEFAULT_DAYS_AHEAD
            });
        }

        if let Some(value) = record.get(NOW_FIELD).filter(|v| is_truthy(v)) {
            match parse_instant(&value_text(value)) {
                Some(now) => self.now = now,
                None => tracing::warn!(value = %value, "ignoring unparseable now_iso"),
            }
        }

        self
    }

    /// Returns the acceptance window `[now, now + days_ahead]`.
    pub fn window(&self) -> AcceptanceWindow {
        AcceptanceWindow::days_ahead(self.now, self.days_ahead)
    }

    /// Returns the rules handed to the row normalizer.
    pub fn row_rules(&self) -> RowRules {
        RowRules {
            window: self.window(),
            default_time_zone: self.default_time_zone.clone(),
        }
    }

    /// Returns the stock date formatter for this config's default zone.
    ///
    /// Falls back to `America/New_York` when the configured zone is unknown.
    pub fn date_formatter(&self) -> ZonedDateFormatter {
        ZonedDateFormatter::from_zone_name(&self.default_time_zone).unwrap_or_else(|| {
            tracing::warn!(zone = %self.default_time_zone, "unknown default time zone");
            ZonedDateFormatter::default()
        })
    }
}

/// Reads a window length, treating zero and non-numbers as absent.
fn coerce_days_ahead(value: &Value) -> Option<i64> {
    let days = match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f.trunc() as i64)),
        Value::String(s) => {
            let s = s.trim();
            s.parse::<i64>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().filter(|f| f.is_finite()).map(|f| f.trunc() as i64))
        }
        _ => None,
    }?;
    (days != 0).then_some(days)
}

/// The result of one pipeline run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Digest {
    /// Surviving events, ascending by start.
    pub events: Vec<Event>,
    /// Series in first-seen order over the sorted events.
    pub series: Vec<Series>,
    /// One line per event, newline separated.
    pub announcements: String,
}

impl Digest {
    /// Number of surviving events.
    pub fn total_events(&self) -> usize {
        self.events.len()
    }

    /// Sum of attendee counts over all events.
    pub fn total_attendees(&self) -> u64 {
        self.events
            .iter()
            .fold(0u64, |sum, e| sum.saturating_add(e.attendee_count))
    }

    /// Number of distinct series.
    pub fn total_series(&self) -> usize {
        self.series.len()
    }

    /// Flattens the digest into the output record.
    pub fn to_output(&self) -> IngestResult<DigestOutput> {
        Ok(DigestOutput {
            total_events: self.total_events(),
            total_attendees: self.total_attendees(),
            total_series: self.total_series(),
            events_json: serde_json::to_string(&self.events)
                .map_err(|e| IngestError::serialization("events", e))?,
            series_json: serde_json::to_string(&self.series)
                .map_err(|e| IngestError::serialization("series", e))?,
            announcements_text: self.announcements.clone(),
        })
    }
}

/// The flat output record handed back to the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DigestOutput {
    pub total_events: usize,
    pub total_attendees: u64,
    pub total_series: usize,
    /// JSON array of events.
    pub events_json: String,
    /// JSON array of series.
    pub series_json: String,
    pub announcements_text: String,
}

/// Runs the whole pipeline over one record with `config` taken as given.
///
/// The record's `days_ahead` and `now_iso` scalars are not consulted here;
/// callers layering their own overrides apply them first with
/// [`PipelineConfig::apply_record`]. [`run_with_defaults`] does that step.
///
/// Never fails: rows that do not validate are skipped, and an input with no
/// usable rows gives an empty digest.
pub fn run<F: DateFormatter>(record: &RawRecord, config: &PipelineConfig, dates: F) -> Digest {
    let _span = tracing::info_span!("digest", now = %config.now, days_ahead = config.days_ahead)
        .entered();

    let rows = reconstruct_rows(&FieldSequences::from_record(record));
    tracing::debug!(rows = rows.len(), "reconstructed rows");

    let rules = config.row_rules();
    let mut deduped = dedup_events(normalize_rows(&rows, &rules));
    let mut events: Vec<Event> = deduped.by_ref().collect();
    tracing::debug!(
        accepted = events.len(),
        duplicates = deduped.dropped(),
        "validated events"
    );

    // Stable: equal starts keep their row order.
    events.sort_by_cached_key(Event::start_instant);

    let series = aggregate_series(&events);
    tracing::debug!(series = series.len(), "aggregated series");

    let announcements = AnnouncementFormatter::new(dates).format_all(&events);

    Digest {
        events,
        series,
        announcements,
    }
}

/// Runs the pipeline over a record, honoring its `days_ahead` and `now_iso`
/// scalars on top of `config`, with the config's own date formatter.
pub fn run_with_defaults(record: &RawRecord, config: &PipelineConfig) -> Digest {
    let config = config.clone().apply_record(record);
    run(record, &config, config.date_formatter())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap()
    }

    mod config {
        use super::*;

        #[test]
        fn defaults() {
            let config = PipelineConfig::new(now());
            assert_eq!(config.days_ahead, 120);
            assert_eq!(config.default_time_zone, "America/New_York");
            assert_eq!(config.window().start, now());
        }

        #[test]
        fn record_scalars_override() {
            let record = RawRecord::new()
                .with_field("days_ahead", "30")
                .with_field("now_iso", "2025-07-01T00:00:00Z");
            let config = PipelineConfig::new(now()).apply_record(&record);
            assert_eq!(config.days_ahead, 30);
            assert_eq!(config.now, Utc.with_ymd_and_hms(2025, 7, 1, 0, 0, 0).unwrap());
        }

        #[test]
        fn days_ahead_coercion() {
            let apply = |value: Value| {
                PipelineConfig::new(now())
                    .with_days_ahead(7)
                    .apply_record(&RawRecord::new().with_field("days_ahead", value))
                    .days_ahead
            };
            assert_eq!(apply(json!(45)), 45);
            assert_eq!(apply(json!(" 10 ")), 10);
            assert_eq!(apply(json!(2.9)), 2);
            assert_eq!(apply(json!(0)), 120);
            assert_eq!(apply(json!("")), 120);
            assert_eq!(apply(json!("soon")), 120);
            assert_eq!(apply(json!(null)), 120);
        }

        #[test]
        fn absent_scalars_leave_config_alone() {
            let config = PipelineConfig::new(now())
                .with_days_ahead(7)
                .apply_record(&RawRecord::new());
            assert_eq!(config.days_ahead, 7);
            assert_eq!(config.now, now());
        }

        #[test]
        fn unparseable_now_is_ignored() {
            let record = RawRecord::new().with_field("now_iso", "not a date");
            let config = PipelineConfig::new(now()).apply_record(&record);
            assert_eq!(config.now, now());
        }

        #[test]
        fn unknown_default_zone_falls_back() {
            let config = PipelineConfig::new(now()).with_default_time_zone("Nowhere/Land");
            assert_eq!(config.date_formatter(), ZonedDateFormatter::default());
        }
    }

    mod digest {
        use super::*;

        #[test]
        fn empty_record_gives_empty_digest() {
            let digest = run_with_defaults(&RawRecord::new(), &PipelineConfig::new(now()));
            assert_eq!(digest.total_events(), 0);
            assert_eq!(digest.total_attendees(), 0);
            assert_eq!(digest.total_series(), 0);
            assert_eq!(digest.announcements, "");

            let output = digest.to_output().unwrap();
            assert_eq!(output.events_json, "[]");
            assert_eq!(output.series_json, "[]");
        }

        #[test]
        fn sorts_by_start_instant_not_text() {
            // Offsets make text order differ from instant order.
            let record = RawRecord::new()
                .with_field("id", json!(["late", "early"]))
                .with_field("summary", "Late, Early")
                .with_field(
                    "start",
                    json!(["2025-06-02T09:00:00Z", "2025-06-02T10:00:00+05:00"]),
                )
                .with_field("end", json!(["2025-06-02T10:00:00Z", "2025-06-02T11:00:00+05:00"]));
            let digest = run_with_defaults(&record, &PipelineConfig::new(now()));

            let ids: Vec<&str> = digest.events.iter().map(|e| e.id.as_str()).collect();
            assert_eq!(ids, vec!["early", "late"]);
        }

        #[test]
        fn ties_keep_row_order() {
            let record = RawRecord::new()
                .with_field("summary", "B, A, C")
                .with_field(
                    "start",
                    json!(["2025-06-02T09:00:00Z", "2025-06-02T09:00:00Z", "2025-06-02T09:00:00Z"]),
                )
                .with_field("end", "2025-06-02T10:00:00Z, 2025-06-02T10:00:00Z, 2025-06-02T10:00:00Z");
            let digest = run_with_defaults(&record, &PipelineConfig::new(now()));

            let summaries: Vec<&str> = digest.events.iter().map(|e| e.summary.as_str()).collect();
            assert_eq!(summaries, vec!["B", "A", "C"]);
        }

        #[test]
        fn run_with_defaults_honors_record_scalars() {
            let record = RawRecord::new()
                .with_field("summary", "June, August")
                .with_field("start", json!(["2025-06-10T10:00:00Z", "2025-08-10T10:00:00Z"]))
                .with_field("end", json!(["2025-06-10T11:00:00Z", "2025-08-10T11:00:00Z"]))
                .with_field("days_ahead", 30)
                .with_field("now_iso", "2025-06-05T00:00:00Z");
            let digest = run_with_defaults(&record, &PipelineConfig::new(now()));

            let summaries: Vec<&str> = digest.events.iter().map(|e| e.summary.as_str()).collect();
            assert_eq!(summaries, vec!["June"]);
        }

        #[test]
        fn run_takes_config_as_given() {
            let record = RawRecord::new()
                .with_field("summary", "August")
                .with_field("start", "2025-08-10T10:00:00Z")
                .with_field("end", "2025-08-10T11:00:00Z")
                .with_field("days_ahead", 30);
            let config = PipelineConfig::new(now());
            let digest = run(&record, &config, config.date_formatter());
            assert_eq!(digest.total_events(), 1);
        }

        #[test]
        fn output_record_serializes_with_snake_case_keys() {
            let record = RawRecord::new()
                .with_field("summary", "Standup")
                .with_field("start", "2025-06-02T14:00:00Z")
                .with_field("end", "2025-06-02T14:15:00Z")
                .with_field("attendee_count", "4");
            let output = run_with_defaults(&record, &PipelineConfig::new(now()))
                .to_output()
                .unwrap();

            let json = serde_json::to_value(&output).unwrap();
            assert_eq!(json["total_events"], 1);
            assert_eq!(json["total_attendees"], 4);
            assert_eq!(json["total_series"], 1);
            assert_eq!(
                json["announcements_text"],
                "Mon, Jun 2, 10:00 AM - Standup (4 attendees)"
            );
        }
    }
}
