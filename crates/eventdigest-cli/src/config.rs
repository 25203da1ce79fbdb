//! CLI configuration.
//!
//! All settings live in a single `config.toml` file at
//! `~/.config/eventdigest/config.toml` by default.
//!
//! ```toml
//! debug = false
//!
//! [pipeline]
//! days_ahead = 30
//! default_time_zone = "Europe/Paris"
//!
//! [output]
//! format = "text"
//! pretty = false
//! ```

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use eventdigest_core::{DEFAULT_TIME_ZONE, OutputFormat, ZonedDateFormatter};
use eventdigest_ingest::{DEFAULT_DAYS_AHEAD, PipelineConfig};

use crate::error::{CliError, CliResult};

/// Configuration for the eventdigest CLI.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DigestConfig {
    /// Debug mode.
    pub debug: bool,

    /// Pipeline defaults.
    pub pipeline: PipelineSettings,

    /// Output settings.
    pub output: OutputSettings,
}

/// Defaults handed to the pipeline when neither a flag nor the input
/// record sets them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineSettings {
    /// Length of the acceptance window in days.
    pub days_ahead: Option<i64>,

    /// Zone for events that carry none.
    pub default_time_zone: String,
}

impl Default for PipelineSettings {
    fn default() -> Self {
        Self {
            days_ahead: None,
            default_time_zone: DEFAULT_TIME_ZONE.to_string(),
        }
    }
}

/// Output settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputSettings {
    /// What to print: the JSON output record or the announcement text.
    pub format: OutputFormat,

    /// Pretty-print JSON output.
    pub pretty: bool,
}

impl DigestConfig {
    /// Loads configuration from the default path, or defaults if the file
    /// does not exist.
    pub fn load() -> CliResult<Self> {
        let path = Self::default_path();
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Loads configuration from a specific path.
    pub fn load_from(path: &Path) -> CliResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| CliError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(toml::from_str(&content)?)
    }

    /// Returns the default configuration file path.
    pub fn default_path() -> PathBuf {
        Self::default_config_dir().join("config.toml")
    }

    /// Returns the default configuration directory.
    pub fn default_config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("eventdigest")
    }

    /// Checks values that parse but cannot be used.
    pub fn validate(&self) -> CliResult<()> {
        if let Some(days) = self.pipeline.days_ahead {
            if days <= 0 {
                return Err(CliError::Config(format!(
                    "pipeline.days_ahead must be positive, got {days}"
                )));
            }
        }

        let zone = &self.pipeline.default_time_zone;
        if ZonedDateFormatter::from_zone_name(zone).is_none() {
            return Err(CliError::Config(format!(
                "pipeline.default_time_zone {zone:?} is not a known time zone"
            )));
        }

        Ok(())
    }

    /// Builds the pipeline config this file describes, anchored at `now`.
    ///
    /// Record scalars and command-line flags are layered on top by the
    /// caller.
    pub fn pipeline_config(&self, now: DateTime<Utc>) -> PipelineConfig {
        PipelineConfig::new(now)
            .with_days_ahead(self.pipeline.days_ahead.unwrap_or(DEFAULT_DAYS_AHEAD))
            .with_default_time_zone(self.pipeline.default_time_zone.clone())
    }
}
