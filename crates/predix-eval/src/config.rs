//! Configuration for predicate evaluation

use serde::{Deserialize, Serialize};

/// Evaluation limits and diagnostics
///
/// # Examples
///
/// ```
/// use predix_eval::EvalConfig;
///
/// let config = EvalConfig::default();
/// assert_eq!(config.max_depth, 256);
///
/// let config = EvalConfig::strict();
/// assert_eq!(config.max_depth, 64);
///
/// let config = EvalConfig::lenient();
/// assert_eq!(config.max_depth, 4096);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvalConfig {
    /// Deepest node nesting the evaluator will descend into
    /// Default: 256
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,

    /// Emit a trace event for every registered function invocation
    /// Default: false
    #[serde(default)]
    pub trace_calls: bool,
}

fn default_max_depth() -> usize {
    256
}

impl Default for EvalConfig {
    fn default() -> Self {
        Self {
            max_depth: default_max_depth(),
            trace_calls: false,
        }
    }
}

impl EvalConfig {
    /// Shallow depth limit for untrusted trees
    pub fn strict() -> Self {
        Self {
            max_depth: 64,
            trace_calls: false,
        }
    }

    /// Deep depth limit for large generated trees
    pub fn lenient() -> Self {
        Self {
            max_depth: 4096,
            trace_calls: false,
        }
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), String> {
        if self.max_depth == 0 {
            return Err("max_depth must be greater than 0".to_string());
        }
        Ok(())
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str).map_err(|e| format!("Failed to parse TOML: {}", e))
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize to TOML: {}", e))
    }
}
