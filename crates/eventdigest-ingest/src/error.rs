//! Error types for the edges of the ingest pipeline.
//!
//! The pipeline itself never fails: malformed rows are skipped. Errors only
//! come from turning an input document into a [`RawRecord`](crate::RawRecord)
//! and from serializing the output record.

use std::fmt;
use thiserror::Error;

/// The category of an ingest error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IngestErrorCode {
    /// The input document is not valid JSON.
    InvalidJson,
    /// The input document is valid JSON but not an object.
    NotAnObject,
    /// Serializing the events or series failed.
    Serialization,
}

impl IngestErrorCode {
    /// Returns a stable name for this error code.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InvalidJson => "invalid_json",
            Self::NotAnObject => "not_an_object",
            Self::Serialization => "serialization",
        }
    }
}

impl fmt::Display for IngestErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An error raised while reading input or writing output.
#[derive(Debug, Error)]
pub struct IngestError {
    code: IngestErrorCode,
    message: String,
    #[source]
    source: Option<serde_json::Error>,
}

impl IngestError {
    /// Creates a new error with the given code and message.
    pub fn new(code: IngestErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            source: None,
        }
    }

    /// The document could not be parsed as JSON.
    pub fn invalid_json(source: serde_json::Error) -> Self {
        Self::new(IngestErrorCode::InvalidJson, "input is not valid JSON").with_source(source)
    }

    /// The document parsed, but to something other than an object.
    pub fn not_an_object(found: &str) -> Self {
        Self::new(
            IngestErrorCode::NotAnObject,
            format!("input must be a JSON object, found {found}"),
        )
    }

    /// Serializing `what` failed.
    pub fn serialization(what: &str, source: serde_json::Error) -> Self {
        Self::new(
            IngestErrorCode::Serialization,
            format!("failed to serialize {what}"),
        )
        .with_source(source)
    }

    /// Sets the source error.
    pub fn with_source(mut self, source: serde_json::Error) -> Self {
        self.source = Some(source);
        self
    }

    /// Returns the error code.
    pub fn code(&self) -> IngestErrorCode {
        self.code
    }

    /// Returns the error message.
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for IngestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code, self.message)?;
        if let Some(ref source) = self.source {
            write!(f, " ({source})")?;
        }
        Ok(())
    }
}

/// A specialized Result type for ingest operations.
pub type IngestResult<T> = Result<T, IngestError>;
