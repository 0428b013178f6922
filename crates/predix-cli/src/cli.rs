//! CLI command definitions and argument parsing.

use clap::{Parser, Subcommand};
use predix_compose::Connective;

/// Predix CLI - Compose, inspect and evaluate predicate expression trees.
#[derive(Debug, Parser)]
#[command(name = "predix")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path
    #[arg(short, long, global = true, env = "PREDIX_CONFIG")]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CliFormat {
    /// Rendered expressions (default)
    Text,
    /// JSON format
    Json,
    /// Quiet format (bare results)
    Quiet,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Compose two or more predicates, left to right
    Compose(ComposeArgs),

    /// Print the member name a selector reads
    Member(MemberArgs),

    /// Evaluate a predicate against argument values
    Eval(EvalArgs),

    /// Manage the configuration file
    Config(ConfigArgs),
}

/// Arguments for the compose command.
#[derive(Debug, Parser)]
pub struct ComposeArgs {
    /// JSON files, each holding one lambda (or `null`)
    #[arg(required = true, num_args = 2..)]
    pub files: Vec<String>,

    /// Connective joining the bodies
    #[arg(short = 'j', long, value_enum)]
    pub connective: Option<ConnectiveArg>,
}

/// Arguments for the member command.
#[derive(Debug, Parser)]
pub struct MemberArgs {
    /// JSON file holding the selector lambda (or `null`)
    pub file: String,
}

/// Arguments for the eval command.
#[derive(Debug, Parser)]
pub struct EvalArgs {
    /// JSON file holding the lambda
    pub predicate: String,

    /// JSON array of argument values, e.g. '[{"age": 30}]'
    pub args: String,
}

/// Arguments for configuration management.
#[derive(Debug, Parser)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

/// Configuration actions.
#[derive(Debug, Subcommand)]
pub enum ConfigAction {
    /// Print the effective configuration
    Show,

    /// Print the configuration file path
    Path,

    /// Write a default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

/// Connective argument.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum ConnectiveArg {
    /// Both sides evaluated
    And,
    /// Right side skipped when the left is false
    AndAlso,
    /// Both sides evaluated
    Or,
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Text => crate::config::OutputFormat::Text,
            CliFormat::Json => crate::config::OutputFormat::Json,
            CliFormat::Quiet => crate::config::OutputFormat::Quiet,
        }
    }
}

impl From<ConnectiveArg> for Connective {
    fn from(arg: ConnectiveArg) -> Self {
        match arg {
            ConnectiveArg::And => Connective::And,
            ConnectiveArg::AndAlso => Connective::AndAlso,
            ConnectiveArg::Or => Connective::Or,
        }
    }
}
