//! Configuration management for the CLI.

use crate::error::{CliError, Result};
use predix_compose::Connective;
use predix_eval::EvalConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// CLI configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Global settings
    #[serde(default)]
    pub settings: Settings,

    /// Evaluation limits
    #[serde(default)]
    pub eval: EvalConfig,
}

/// Global CLI settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Default output format
    #[serde(default = "default_format")]
    pub format: OutputFormat,

    /// Enable colored output
    #[serde(default = "default_true")]
    pub color: bool,

    /// Connective used by `compose` when none is given
    #[serde(default = "default_connective")]
    pub connective: Connective,

    /// Log filter used when `RUST_LOG` is unset
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

/// Output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Rendered expressions
    Text,
    /// JSON documents
    Json,
    /// Bare results only
    Quiet,
}

impl Config {
    /// Default configuration file path (`~/.predix/config.toml`).
    pub fn default_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| CliError::Config("Could not find home directory".into()))?;
        Ok(home.join(".predix").join("config.toml"))
    }

    /// Explicit path if given, otherwise the default path.
    pub fn resolve_path(explicit: Option<&str>) -> Result<PathBuf> {
        match explicit {
            Some(path) => Ok(PathBuf::from(path)),
            None => Self::default_path(),
        }
    }

    /// Load configuration from `path`, or defaults if the file does not exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to `path`.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Create parent directory if it doesn't exist
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        fs::write(path, self.to_toml()?)?;
        Ok(())
    }

    /// Serialize to a TOML document.
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| CliError::Config(format!("Failed to serialize config: {}", e)))
    }

    /// Check values that parse but cannot be used.
    pub fn validate(&self) -> Result<()> {
        self.eval.validate().map_err(CliError::Config)?;
        if self.settings.log_level.trim().is_empty() {
            return Err(CliError::Config("log_level must not be empty".to_string()));
        }
        Ok(())
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            format: OutputFormat::Text,
            color: true,
            connective: Connective::And,
            log_level: default_log_level(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_format() -> OutputFormat {
    OutputFormat::Text
}

fn default_connective() -> Connective {
    Connective::And
}

fn default_log_level() -> String {
    "warn".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.settings.format, OutputFormat::Text);
        assert!(config.settings.color);
        assert_eq!(config.settings.connective, Connective::And);
        assert_eq!(config.eval.max_depth, 256);
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let dir = TempDir::new().unwrap();
        let config = Config::load_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config.settings.log_level, "warn");
    }

    #[test]
    fn test_save_and_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.settings.format = OutputFormat::Json;
        config.settings.connective = Connective::AndAlso;
        config.eval = EvalConfig::strict();
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.settings.format, OutputFormat::Json);
        assert_eq!(loaded.settings.connective, Connective::AndAlso);
        assert_eq!(loaded.eval, EvalConfig::strict());
    }

    #[test]
    fn test_partial_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[settings]\nconnective = \"or\"\n\n[eval]\ntrace_calls = true\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.settings.connective, Connective::Or);
        assert!(config.settings.color);
        assert!(config.eval.trace_calls);
        assert_eq!(config.eval.max_depth, 256);
    }

    #[test]
    fn test_invalid_eval_section_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[eval]\nmax_depth = 0\n").unwrap();

        assert!(matches!(Config::load_from(&path), Err(CliError::Config(_))));
    }

    #[test]
    fn test_malformed_file_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[settings\nformat = ").unwrap();

        assert!(matches!(Config::load_from(&path), Err(CliError::Toml(_))));
    }
}
