//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::convert;
use crate::error::Result;
use colored::*;
use predix_expr::{Lambda, Value};

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Selected output format.
    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Format a lambda: its rendering, or the serialized tree for JSON.
    pub fn format_lambda(&self, lambda: &Lambda) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(lambda)?),
            OutputFormat::Text => Ok(self.colorize(&lambda.to_string(), "cyan")),
            OutputFormat::Quiet => Ok(lambda.to_string()),
        }
    }

    /// Format an extracted member name.
    pub fn format_member(&self, name: &str) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(
                &serde_json::json!({ "member": name }),
            )?),
            OutputFormat::Text => Ok(self.colorize(name, "cyan")),
            OutputFormat::Quiet => Ok(name.to_string()),
        }
    }

    /// Format an evaluation result.
    pub fn format_value(&self, value: &Value) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(
                &serde_json::json!({ "result": convert::to_json(value) }),
            )?),
            OutputFormat::Text => Ok(match value {
                Value::Bool(true) => self.colorize("true", "green"),
                Value::Bool(false) => self.colorize("false", "red"),
                other => other.to_string(),
            }),
            OutputFormat::Quiet => Ok(value.to_string()),
        }
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an error message.
    pub fn error(&self, message: &str) -> String {
        self.colorize(&format!("✗ {}", message), "red")
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "cyan" => text.cyan().to_string(),
            _ => text.to_string(),
        }
    }
}
