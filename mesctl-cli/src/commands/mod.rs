//! CLI subcommand implementations

pub mod config;
pub mod orders;
pub mod serve;
