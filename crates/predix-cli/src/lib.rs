//! Predix CLI library.
//!
//! This library provides the core functionality for the `predix` command-line
//! interface: configuration management, reading and writing expression trees
//! as JSON, command execution and output formatting.

pub mod cli;
pub mod commands;
pub mod config;
pub mod convert;
pub mod error;
pub mod output;

pub use cli::{Cli, Command};
pub use config::Config;
pub use error::{CliError, Result};
pub use output::Formatter;
