//! CLI error types.

use std::path::PathBuf;

use thiserror::Error;

use eventdigest_core::TracingError;
use eventdigest_ingest::IngestError;

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

/// Errors that can occur in the CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration file could not be read.
    #[error("failed to read config {}: {source}", path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Configuration file is not valid TOML for [`crate::config::DigestConfig`].
    #[error("failed to parse config: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// Configuration could not be serialized back to TOML.
    #[error("failed to serialize config: {0}")]
    ConfigSerialize(#[from] toml::ser::Error),

    /// Configuration values are inconsistent.
    #[error("configuration error: {0}")]
    Config(String),

    /// A command-line value was rejected.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Reading input or writing output failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The pipeline rejected its input.
    #[error(transparent)]
    Ingest(#[from] IngestError),

    /// The output record could not be rendered.
    #[error("failed to render output: {0}")]
    Render(#[from] serde_json::Error),

    /// Logging could not be set up.
    #[error(transparent)]
    Tracing(#[from] TracingError),
}
