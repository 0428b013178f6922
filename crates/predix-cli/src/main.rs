//! Predix CLI - Command-line interface for predicate composition.

use clap::Parser;
use predix_cli::commands;
use predix_cli::config::OutputFormat;
use predix_cli::{Cli, Command, Config, Formatter};
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();
    let color = !cli.no_color;

    if let Err(e) = run(cli) {
        let formatter = Formatter::new(OutputFormat::Text, color);
        eprintln!("{}", formatter.error(&e.to_string()));
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> predix_cli::Result<()> {
    let path = Config::resolve_path(cli.config.as_deref())?;
    let config = Config::load_from(&path)?;

    // Initialize tracing (log to stderr); RUST_LOG wins over the config
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.settings.log_level));
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .init();

    // Determine output format
    let format = cli
        .format
        .map(Into::into)
        .unwrap_or(config.settings.format);

    // Determine color setting
    let color_enabled = !cli.no_color && config.settings.color;

    let formatter = Formatter::new(format, color_enabled);

    match cli.command {
        Command::Compose(args) => {
            commands::execute_compose(args, config.settings.connective, &formatter)?;
        }
        Command::Member(args) => {
            commands::execute_member(args, &formatter)?;
        }
        Command::Eval(args) => {
            commands::execute_eval(args, &config.eval, &formatter)?;
        }
        Command::Config(args) => {
            commands::execute_config(args, &config, &path, &formatter)?;
        }
    }

    Ok(())
}
