//! Logging setup for eventdigest
//!
//! Logs always go to stderr so the digest on stdout stays pipeable.
//! `RUST_LOG` takes precedence over the configured level.
//!
//! ```ignore
//! use eventdigest_core::{init_tracing, TracingConfig};
//!
//! // --debug --json-logs
//! init_tracing(TracingConfig::from_flags(true, true))?;
//! ```

use thiserror::Error;
use tracing::Level;
use tracing_subscriber::{
    EnvFilter,
    fmt::{self, format::FmtSpan},
    prelude::*,
};

/// Target prefix shared by every eventdigest crate.
const TARGET_PREFIX: &str = "eventdigest";

/// Errors that can occur during tracing initialization
#[derive(Debug, Error)]
pub enum TracingError {
    /// A global subscriber is already installed
    #[error("failed to set global tracing subscriber: {0}")]
    SetGlobalSubscriber(#[from] tracing::subscriber::SetGlobalDefaultError),

    /// The filter directive does not parse
    #[error("failed to parse env filter: {0}")]
    EnvFilter(#[from] tracing_subscriber::filter::ParseError),
}

/// How log lines are rendered
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TracingOutputFormat {
    /// Single-line human-readable output
    #[default]
    Compact,
    /// One JSON object per line, for log collectors
    Json,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TracingConfig {
    /// Level applied to eventdigest targets when `RUST_LOG` is unset
    pub level: Level,
    pub format: TracingOutputFormat,
    /// Include file and line of each event
    pub source_location: bool,
    pub timestamps: bool,
    /// Log span open/close, which times each pipeline run
    pub span_events: bool,
    /// Explicit filter directive; wins over both `RUST_LOG` and `level`
    pub directives: Option<String>,
}

impl Default for TracingConfig {
    fn default() -> Self {
        Self {
            level: Level::WARN,
            format: TracingOutputFormat::Compact,
            source_location: false,
            timestamps: true,
            span_events: false,
            directives: None,
        }
    }
}

impl TracingConfig {
    /// Interactive debugging: debug level, source locations, no timestamps.
    #[must_use]
    pub fn cli_debug() -> Self {
        Self {
            level: Level::DEBUG,
            source_location: true,
            timestamps: false,
            ..Self::default()
        }
    }

    /// Unattended runs: info level JSON with span timings.
    #[must_use]
    pub fn batch() -> Self {
        Self {
            level: Level::INFO,
            format: TracingOutputFormat::Json,
            source_location: true,
            span_events: true,
            ..Self::default()
        }
    }

    /// Picks a preset from the `--debug` and `--json-logs` switches.
    #[must_use]
    pub fn from_flags(debug: bool, json: bool) -> Self {
        match (debug, json) {
            (false, false) => Self::default(),
            (true, false) => Self::cli_debug(),
            (false, true) => Self::batch(),
            (true, true) => Self {
                level: Level::DEBUG,
                ..Self::batch()
            },
        }
    }

    #[must_use]
    pub fn with_level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    #[must_use]
    pub fn with_directives(mut self, directives: impl Into<String>) -> Self {
        self.directives = Some(directives.into());
        self
    }

    fn env_filter(&self) -> Result<EnvFilter, TracingError> {
        match self.directives {
            Some(ref directives) => Ok(EnvFilter::try_new(directives)?),
            None => Ok(EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(format!("{TARGET_PREFIX}={}", self.level)))),
        }
    }

    fn fmt_span(&self) -> FmtSpan {
        if self.span_events {
            FmtSpan::NEW | FmtSpan::CLOSE
        } else {
            FmtSpan::NONE
        }
    }
}

/// Installs the global subscriber. Call once, before any logging.
///
/// # Errors
///
/// Fails if a subscriber is already installed or the directives are invalid.
pub fn init_tracing(config: TracingConfig) -> Result<(), TracingError> {
    let filter = config.env_filter()?;

    let layer = match config.format {
        TracingOutputFormat::Compact => {
            let layer = fmt::layer()
                .with_writer(std::io::stderr)
                .compact()
                .with_file(config.source_location)
                .with_line_number(config.source_location)
                .with_span_events(config.fmt_span());
            if config.timestamps {
                layer.boxed()
            } else {
                layer.without_time().boxed()
            }
        }
        TracingOutputFormat::Json => fmt::layer()
            .with_writer(std::io::stderr)
            .json()
            .with_file(config.source_location)
            .with_line_number(config.source_location)
            .with_span_events(config.fmt_span())
            .boxed(),
    };

    tracing::subscriber::set_global_default(tracing_subscriber::registry().with(filter).with(layer))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    mod presets {
        use super::*;

        #[test]
        fn default_is_quiet_compact() {
            let config = TracingConfig::default();
            assert_eq!(config.level, Level::WARN);
            assert_eq!(config.format, TracingOutputFormat::Compact);
            assert!(config.timestamps);
            assert!(!config.span_events);
        }

        #[test]
        fn batch_is_json_with_spans() {
            let config = TracingConfig::batch();
            assert_eq!(config.level, Level::INFO);
            assert_eq!(config.format, TracingOutputFormat::Json);
            assert!(config.span_events);
        }
    }

    #[test]
    fn from_flags_matrix() {
        assert_eq!(TracingConfig::from_flags(false, false), TracingConfig::default());
        assert_eq!(TracingConfig::from_flags(true, false), TracingConfig::cli_debug());
        assert_eq!(TracingConfig::from_flags(false, true), TracingConfig::batch());

        let both = TracingConfig::from_flags(true, true);
        assert_eq!(both.level, Level::DEBUG);
        assert_eq!(both.format, TracingOutputFormat::Json);
    }

    #[test]
    fn explicit_directives_are_validated() {
        let config = TracingConfig::default().with_directives("eventdigest=trace");
        assert!(config.env_filter().is_ok());

        let bad = TracingConfig::default().with_directives("eventdigest=loud");
        assert!(matches!(bad.env_filter(), Err(TracingError::EnvFilter(_))));
    }

    #[test]
    fn with_level_overrides_preset() {
        let config = TracingConfig::batch().with_level(Level::TRACE);
        assert_eq!(config.level, Level::TRACE);
    }
}
