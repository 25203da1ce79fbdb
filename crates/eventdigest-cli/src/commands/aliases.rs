//! Alias table listing.

use std::io::Write;

use eventdigest_ingest::FIELD_ALIASES;

use crate::error::CliResult;

/// Renders the alias table, one attribute per line, aliases in priority
/// order.
pub fn render() -> String {
    let width = FIELD_ALIASES
        .iter()
        .map(|(field, _)| field.name().len())
        .max()
        .unwrap_or(0);

    FIELD_ALIASES
        .iter()
        .map(|(field, aliases)| format!("{:<width$}  {}", field.name(), aliases.join(", ")))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Print the alias table to stdout.
pub fn list() -> CliResult<()> {
    let mut out = std::io::stdout().lock();
    writeln!(out, "{}", render())?;
    Ok(())
}
