//! Configuration commands.

use crate::config::DigestConfig;
use crate::error::CliResult;

/// Dump the current configuration to stdout.
pub fn dump(config: &DigestConfig) -> CliResult<()> {
    let toml_str = toml::to_string_pretty(config)?;
    println!("# config.toml ({})", DigestConfig::default_path().display());
    println!("{}", toml_str);

    Ok(())
}

/// Validate the configuration.
pub fn validate(config: &DigestConfig) -> CliResult<()> {
    config.validate()?;
    println!("Configuration is valid.");
    Ok(())
}

/// Show the configuration file path.
pub fn path() -> CliResult<()> {
    let config_path = DigestConfig::default_path();
    println!("config: {}", config_path.display());
    Ok(())
}
