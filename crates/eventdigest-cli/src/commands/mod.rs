//! Subcommand and default-action implementations.

pub mod aliases;
pub mod config;
pub mod digest;
