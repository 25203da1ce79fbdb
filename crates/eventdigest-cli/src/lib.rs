//! CLI, config file handling, output rendering
//!
//! This crate provides the `eventdigest` command-line interface.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;

pub use cli::Cli;
pub use config::DigestConfig;
pub use error::{CliError, CliResult};
