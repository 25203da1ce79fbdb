//! The default action: read an export record and print its digest.

use std::io::{self, Read, Write};
use std::path::Path;

use chrono::{DateTime, Utc};

use eventdigest_core::{OutputFormat, ZonedDateFormatter, parse_instant};
use eventdigest_ingest::{Digest, PipelineConfig, RawRecord, run};

use crate::cli::Cli;
use crate::config::DigestConfig;
use crate::error::{CliError, CliResult};

/// Reads the export record text from `path`, or stdin when `None`.
pub fn read_input(path: Option<&Path>) -> CliResult<String> {
    match path {
        Some(path) => Ok(std::fs::read_to_string(path)?),
        None => {
            let mut input = String::new();
            io::stdin().lock().read_to_string(&mut input)?;
            Ok(input)
        }
    }
}

/// Layers the pipeline settings: flags over record scalars over the config
/// file over built-in defaults.
pub fn pipeline_config(
    cli: &Cli,
    config: &DigestConfig,
    record: &RawRecord,
    now: DateTime<Utc>,
) -> CliResult<PipelineConfig> {
    let mut pipeline = config.pipeline_config(now).apply_record(record);

    if let Some(ref raw) = cli.now {
        let now = parse_instant(raw).ok_or_else(|| {
            CliError::InvalidArgument(format!("--now {raw:?} is not a recognizable instant"))
        })?;
        pipeline = pipeline.with_now(now);
    }

    if let Some(days) = cli.days_ahead {
        if days <= 0 {
            return Err(CliError::InvalidArgument(format!(
                "--days-ahead must be positive, got {days}"
            )));
        }
        pipeline = pipeline.with_days_ahead(days);
    }

    if let Some(ref zone) = cli.time_zone {
        if ZonedDateFormatter::from_zone_name(zone).is_none() {
            return Err(CliError::InvalidArgument(format!(
                "--time-zone {zone:?} is not a known time zone"
            )));
        }
        pipeline = pipeline.with_default_time_zone(zone.clone());
    }

    Ok(pipeline)
}

/// Renders a digest in the requested format.
pub fn render(digest: &Digest, format: OutputFormat, pretty: bool) -> CliResult<String> {
    match format {
        OutputFormat::Text => Ok(digest.announcements.clone()),
        OutputFormat::Json => {
            let output = digest.to_output()?;
            let rendered = if pretty {
                serde_json::to_string_pretty(&output)?
            } else {
                serde_json::to_string(&output)?
            };
            Ok(rendered)
        }
    }
}

/// Runs the digest for the given command line and prints it to stdout.
pub fn execute(cli: &Cli, config: &DigestConfig) -> CliResult<()> {
    config.validate()?;
    let input = read_input(cli.input_path().map(|p| p.as_path()))?;
    let record = RawRecord::from_json_str(&input)?;
    let pipeline = pipeline_config(cli, config, &record, Utc::now())?;

    // Record scalars are already layered under the flags.
    let digest = run(&record, &pipeline, pipeline.date_formatter());
    tracing::info!(
        events = digest.total_events(),
        series = digest.total_series(),
        attendees = digest.total_attendees(),
        "digest ready"
    );

    let format = cli.output_format().unwrap_or(config.output.format);
    let pretty = cli.pretty || config.output.pretty;
    let rendered = render(&digest, format, pretty)?;

    if !rendered.is_empty() {
        let mut out = io::stdout().lock();
        writeln!(out, "{rendered}")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use clap::Parser;
    use eventdigest_ingest::run_with_defaults;
    use serde_json::json;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap()
    }

    fn cli(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("eventdigest").chain(args.iter().copied())).unwrap()
    }

    fn record(value: serde_json::Value) -> RawRecord {
        RawRecord::from_value(value).unwrap()
    }

    mod precedence {
        use super::*;

        #[test]
        fn config_file_over_defaults() {
            let mut config = DigestConfig::default();
            config.pipeline.days_ahead = Some(14);
            config.pipeline.default_time_zone = "Europe/Paris".to_string();

            let pipeline = pipeline_config(&cli(&[]), &config, &RawRecord::new(), now()).unwrap();
            assert_eq!(pipeline.now, now());
            assert_eq!(pipeline.days_ahead, 14);
            assert_eq!(pipeline.default_time_zone, "Europe/Paris");
        }

        #[test]
        fn record_over_config_file() {
            let mut config = DigestConfig::default();
            config.pipeline.days_ahead = Some(14);
            let record = record(json!({
                "days_ahead": 30,
                "now_iso": "2025-07-01T00:00:00Z"
            }));

            let pipeline = pipeline_config(&cli(&[]), &config, &record, now()).unwrap();
            assert_eq!(pipeline.days_ahead, 30);
            assert_eq!(pipeline.now, Utc.with_ymd_and_hms(2025, 7, 1, 0, 0, 0).unwrap());
        }

        #[test]
        fn flags_over_record() {
            let record = record(json!({
                "days_ahead": 30,
                "now_iso": "2025-07-01T00:00:00Z"
            }));
            let cli = cli(&[
                "--days-ahead",
                "7",
                "--now",
                "2025-08-01T00:00:00Z",
                "--time-zone",
                "Asia/Tokyo",
            ]);

            let pipeline = pipeline_config(&cli, &DigestConfig::default(), &record, now()).unwrap();
            assert_eq!(pipeline.days_ahead, 7);
            assert_eq!(pipeline.now, Utc.with_ymd_and_hms(2025, 8, 1, 0, 0, 0).unwrap());
            assert_eq!(pipeline.default_time_zone, "Asia/Tokyo");
        }
    }

    #[test]
    fn flag_window_survives_the_run() {
        let record = record(json!({
            "summary": ["June", "August"],
            "start": ["2025-06-10T10:00:00Z", "2025-08-10T10:00:00Z"],
            "end": ["2025-06-10T11:00:00Z", "2025-08-10T11:00:00Z"],
            "days_ahead": 30
        }));
        let cli = cli(&["--days-ahead", "120"]);
        let pipeline = pipeline_config(&cli, &DigestConfig::default(), &record, now()).unwrap();

        let digest = run(&record, &pipeline, pipeline.date_formatter());
        assert_eq!(digest.total_events(), 2);
    }

    mod invalid_flags {
        use super::*;

        fn err(args: &[&str]) -> CliError {
            pipeline_config(&cli(args), &DigestConfig::default(), &RawRecord::new(), now())
                .unwrap_err()
        }

        #[test]
        fn unparseable_now() {
            assert!(matches!(err(&["--now", "soon"]), CliError::InvalidArgument(_)));
        }

        #[test]
        fn non_positive_days() {
            assert!(matches!(
                err(&["--days-ahead", "0"]),
                CliError::InvalidArgument(_)
            ));
        }

        #[test]
        fn unknown_zone() {
            let message = err(&["--time-zone", "Nowhere/City"]).to_string();
            assert!(message.contains("Nowhere/City"));
        }
    }

    mod rendering {
        use super::*;

        fn digest() -> Digest {
            let record = record(json!({
                "summary": ["Standup", "Retro"],
                "start": ["2025-06-02T13:00:00Z", "2025-06-03T18:00:00Z"],
                "end": ["2025-06-02T13:15:00Z", "2025-06-03T19:00:00Z"],
                "attendee_count": ["4", "a@x.com"]
            }));
            run_with_defaults(&record, &PipelineConfig::new(now()))
        }

        #[test]
        fn text_is_the_announcements() {
            let text = render(&digest(), OutputFormat::Text, false).unwrap();
            insta::assert_snapshot!(text, @r"
            Mon, Jun 2, 9:00 AM - Standup (4 attendees)
            Tue, Jun 3, 2:00 PM - Retro (1 attendees)
            ");
        }

        #[test]
        fn json_is_the_output_record() {
            let rendered = render(&digest(), OutputFormat::Json, false).unwrap();
            assert!(!rendered.contains('\n'));

            let value: serde_json::Value = serde_json::from_str(&rendered).unwrap();
            assert_eq!(value["total_events"], 2);
            assert_eq!(value["total_attendees"], 5);
            assert_eq!(value["total_series"], 2);
            assert!(value["events_json"].as_str().unwrap().starts_with('['));
        }

        #[test]
        fn pretty_json_spans_lines() {
            let rendered = render(&digest(), OutputFormat::Json, true).unwrap();
            assert!(rendered.lines().count() > 1);
        }
    }

    #[test]
    fn read_input_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("export.json");
        std::fs::write(&path, r#"{"summary": "x"}"#).unwrap();

        let input = read_input(Some(path.as_path())).unwrap();
        assert!(RawRecord::from_json_str(&input).is_ok());
    }

    #[test]
    fn read_input_missing_file_errors() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.json");
        let err = read_input(Some(missing.as_path())).unwrap_err();
        assert!(matches!(err, CliError::Io(_)));
    }
}
