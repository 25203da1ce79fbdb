//! Command-line interface definition.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use eventdigest_core::OutputFormat;

/// eventdigest - Turn a calendar export into an upcoming-events digest
#[derive(Debug, Parser)]
#[command(name = "eventdigest")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(long, short, env = "EVENTDIGEST_CONFIG")]
    pub config: Option<PathBuf>,

    /// Enable debug output
    #[arg(long, short = 'v')]
    pub debug: bool,

    /// Emit logs as JSON lines on stderr
    #[arg(long)]
    pub json_logs: bool,

    // --- Input ---
    /// Export record to read (JSON object); `-` or absent reads stdin
    #[arg(long, short)]
    pub input: Option<PathBuf>,

    // --- Pipeline overrides ---
    /// Reference instant the acceptance window opens at
    #[arg(long, value_name = "ISO")]
    pub now: Option<String>,

    /// Length of the acceptance window in days
    #[arg(long, value_name = "N")]
    pub days_ahead: Option<i64>,

    /// Zone for events that carry none
    #[arg(long, value_name = "TZ")]
    pub time_zone: Option<String>,

    // --- Output format flags ---
    /// Print the output record as JSON
    #[arg(long, group = "output_format")]
    pub json: bool,

    /// Print only the announcement text
    #[arg(long, group = "output_format")]
    pub text: bool,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Cli {
    /// Returns the output format chosen on the command line, if any.
    pub fn output_format(&self) -> Option<OutputFormat> {
        if self.text {
            Some(OutputFormat::Text)
        } else if self.json {
            Some(OutputFormat::Json)
        } else {
            None
        }
    }

    /// Returns the input path, or `None` for stdin.
    pub fn input_path(&self) -> Option<&PathBuf> {
        self.input.as_ref().filter(|p| p.as_os_str() != "-")
    }
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Configuration commands
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// List the input field names recognized for each event attribute
    Aliases,
}

/// Configuration actions.
#[derive(Debug, Subcommand)]
pub enum ConfigAction {
    /// Dump current configuration
    Dump,

    /// Validate configuration
    Validate,

    /// Show configuration file path
    Path,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("eventdigest").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn defaults() {
        let cli = parse(&[]);
        assert!(cli.command.is_none());
        assert_eq!(cli.output_format(), None);
        assert!(cli.input_path().is_none());
        assert!(!cli.pretty);
    }

    #[test]
    fn pipeline_overrides() {
        let cli = parse(&[
            "--input",
            "export.json",
            "--now",
            "2025-06-01T00:00:00Z",
            "--days-ahead",
            "30",
            "--time-zone",
            "Europe/Paris",
        ]);
        assert_eq!(cli.input_path(), Some(&PathBuf::from("export.json")));
        assert_eq!(cli.now.as_deref(), Some("2025-06-01T00:00:00Z"));
        assert_eq!(cli.days_ahead, Some(30));
        assert_eq!(cli.time_zone.as_deref(), Some("Europe/Paris"));
    }

    #[test]
    fn dash_means_stdin() {
        assert!(parse(&["--input", "-"]).input_path().is_none());
    }

    #[test]
    fn output_flags_are_exclusive() {
        assert_eq!(parse(&["--text"]).output_format(), Some(OutputFormat::Text));
        assert_eq!(parse(&["--json"]).output_format(), Some(OutputFormat::Json));

        let both = Cli::try_parse_from(["eventdigest", "--text", "--json"]);
        assert!(both.is_err());
    }

    #[test]
    fn subcommands() {
        assert!(matches!(
            parse(&["config", "path"]).command,
            Some(Command::Config {
                action: ConfigAction::Path
            })
        ));
        assert!(matches!(parse(&["aliases"]).command, Some(Command::Aliases)));
    }
}
