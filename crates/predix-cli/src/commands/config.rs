//! Config command implementation.

use crate::cli::{ConfigAction, ConfigArgs};
use crate::config::{Config, OutputFormat};
use crate::error::{CliError, Result};
use crate::output::Formatter;
use std::path::Path;

/// Execute the config command.
pub fn execute_config(
    args: ConfigArgs,
    config: &Config,
    path: &Path,
    formatter: &Formatter,
) -> Result<()> {
    match args.action {
        ConfigAction::Show => {
            let output = match formatter.format() {
                OutputFormat::Json => serde_json::to_string_pretty(config)?,
                _ => config.to_toml()?,
            };
            println!("{}", output);
        }
        ConfigAction::Path => {
            println!("{}", path.display());
        }
        ConfigAction::Init { force } => {
            init_config(path, force)?;
            println!("{}", formatter.success(&format!("Wrote {}", path.display())));
        }
    }
    Ok(())
}

/// Write a default configuration to `path`.
pub fn init_config(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        return Err(CliError::Config(format!(
            "{} already exists (use --force to overwrite)",
            path.display()
        )));
    }
    Config::default().save_to(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_init_refuses_to_overwrite() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");

        init_config(&path, false).unwrap();
        assert!(path.exists());
        assert!(matches!(init_config(&path, false), Err(CliError::Config(_))));
        init_config(&path, true).unwrap();
    }
}
