//! Core types: events, series, time window, text normalization, announcements

pub mod event;
pub mod format;
pub mod text;
pub mod time;
pub mod tracing;

pub use event::{CONFIRMED_STATUS, Event, Series};
pub use format::{
    AnnouncementFormatter, DEFAULT_TIME_ZONE, DateFormatter, OutputFormat, ZonedDateFormatter,
};
pub use text::{normalize_text, parse_attendee_count};
pub use time::{AcceptanceWindow, parse_instant};
pub use self::tracing::{TracingConfig, TracingError, TracingOutputFormat, init_tracing};
