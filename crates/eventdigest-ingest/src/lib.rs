//! Calendar export ingestion.
//!
//! This crate turns one loosely shaped export record into a digest:
//!
//! ```text
//!  RawRecord ──resolve/coerce──▶ FieldSequences ──reconstruct──▶ RawRow*
//!                                                                   │
//!                                                        normalize_row()
//!                                                                   ▼
//!  Digest ◀── announce ◀── aggregate_series ◀── sort ◀── dedup ◀── Event*
//! ```
//!
//! - [`RawRecord`] - the field-name → value mapping as received
//! - [`Field`] / [`FIELD_ALIASES`] - logical fields and the names they may arrive under
//! - [`reconstruct_rows`] - re-aligns per-field arrays into rows by position
//! - [`normalize_row`] - validates and normalizes one row
//! - [`run`] - the whole pipeline, configured by [`PipelineConfig`]
//!
//! # Example
//!
//! ```
//! use eventdigest_ingest::{PipelineConfig, RawRecord, run_with_defaults};
//!
//! // `now_iso` and `days_ahead` in the record set the acceptance window.
//! let record = RawRecord::from_json_str(r#"{
//!     "title": "Standup, Standup, Offsite",
//!     "start": "[\"2025-06-02T13:00:00Z\", \"2025-06-03T13:00:00Z\", \"2025-09-01T13:00:00Z\"]",
//!     "end": "[\"2025-06-02T13:15:00Z\", \"2025-06-03T13:15:00Z\", \"2025-09-01T17:00:00Z\"]",
//!     "recurring_event_id": "rec-standup, rec-standup",
//!     "now_iso": "2025-06-01T00:00:00Z",
//!     "days_ahead": 30
//! }"#)?;
//!
//! let digest = run_with_defaults(&record, &PipelineConfig::default());
//! assert_eq!(digest.total_events(), 2);
//! assert_eq!(digest.total_series(), 1);
//! # Ok::<(), eventdigest_ingest::IngestError>(())
//! ```

pub mod coerce;
pub mod dedup;
pub mod error;
pub mod fields;
pub mod normalize;
pub mod pipeline;
pub mod record;
pub mod rows;
pub mod series;

// Re-export main types at crate root
pub use coerce::coerce_sequence;
pub use dedup::{Deduplicate, dedup_events};
pub use error::{IngestError, IngestErrorCode, IngestResult};
pub use fields::{FIELD_ALIASES, Field, resolve, resolve_field};
pub use normalize::{RowRules, SkipReason, normalize_row, normalize_rows};
pub use pipeline::{
    DEFAULT_DAYS_AHEAD, Digest, DigestOutput, PipelineConfig, run, run_with_defaults,
};
pub use record::RawRecord;
pub use rows::{FieldSequences, RawRow, reconstruct_rows};
pub use series::aggregate_series;
