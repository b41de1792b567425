//! Effective checker configuration

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::defaults::{builtin_layer, DEFAULT_CONFIG_FILE};
use super::merge::merge_layers;

/// Upper bound for `timeout_seconds`
const MAX_TIMEOUT_SECONDS: u64 = 600;

/// Effective configuration for one run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CheckerConfig {
    /// CSV catalog with `NAME` and `MAIN_LINK` columns
    pub input_path: PathBuf,

    /// Per-request timeout; a probe makes at most two requests
    pub timeout_seconds: u64,

    /// Failure ratio at or above which the run fails, in (0, 1]
    pub fail_threshold: f64,

    /// Sent as `User-Agent` on every request
    pub user_agent: String,

    /// Badge descriptor output, overwritten on every run
    pub badge_path: PathBuf,

    pub badge_label: String,

    /// Must contain `{passing}` and `{total}`
    pub badge_message_template: String,

    /// Optional machine-readable run summary
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary_path: Option<PathBuf>,
}

impl Default for CheckerConfig {
    fn default() -> Self {
        Self {
            input_path: PathBuf::from(super::DEFAULT_INPUT_PATH),
            timeout_seconds: super::DEFAULT_TIMEOUT_SECONDS,
            fail_threshold: super::DEFAULT_FAIL_THRESHOLD,
            user_agent: super::DEFAULT_USER_AGENT.to_string(),
            badge_path: PathBuf::from(super::DEFAULT_BADGE_PATH),
            badge_label: super::DEFAULT_BADGE_LABEL.to_string(),
            badge_message_template: super::DEFAULT_BADGE_MESSAGE_TEMPLATE.to_string(),
            summary_path: None,
        }
    }
}

impl CheckerConfig {
    /// Resolve the configuration from defaults, an optional config file and CLI overrides.
    ///
    /// With `config_path = None` the default `linkcheck.toml` is used if it exists.
    /// A path given explicitly must exist.
    pub fn load(config_path: Option<&Path>, overrides: Value) -> Result<Self, ConfigError> {
        let mut layers = vec![builtin_layer()];

        match config_path {
            Some(path) => {
                if !path.exists() {
                    return Err(ConfigError::NotFound(path.to_path_buf()));
                }
                layers.push(Self::load_toml_file(path)?);
            }
            None => {
                let default_path = Path::new(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    layers.push(Self::load_toml_file(default_path)?);
                }
            }
        }

        layers.push(overrides);

        let merged = merge_layers(layers);
        let config: CheckerConfig = serde_json::from_value(merged)
            .map_err(|e| ConfigError::Parse(format!("invalid configuration: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Parse a TOML config file into a JSON layer
    fn load_toml_file(path: &Path) -> Result<Value, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(format!("{}: {}", path.display(), e)))?;

        let toml_value: toml::Value = toml::from_str(&contents)
            .map_err(|e| ConfigError::Parse(format!("{}: {}", path.display(), e)))?;

        serde_json::to_value(toml_value)
            .map_err(|e| ConfigError::Parse(format!("{}: {}", path.display(), e)))
    }

    /// Check value ranges
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.timeout_seconds == 0 || self.timeout_seconds > MAX_TIMEOUT_SECONDS {
            return Err(ConfigError::Validation(format!(
                "timeout_seconds must be in (0, {}]",
                MAX_TIMEOUT_SECONDS
            )));
        }

        if !(self.fail_threshold > 0.0 && self.fail_threshold <= 1.0) {
            return Err(ConfigError::Validation(
                "fail_threshold must be in (0, 1]".to_string(),
            ));
        }

        if self.user_agent.trim().is_empty() {
            return Err(ConfigError::Validation(
                "user_agent must not be empty".to_string(),
            ));
        }

        if self.input_path.as_os_str().is_empty() {
            return Err(ConfigError::Validation(
                "input_path must not be empty".to_string(),
            ));
        }

        if self.badge_path.as_os_str().is_empty() {
            return Err(ConfigError::Validation(
                "badge_path must not be empty".to_string(),
            ));
        }

        for placeholder in ["{passing}", "{total}"] {
            if !self.badge_message_template.contains(placeholder) {
                return Err(ConfigError::Validation(format!(
                    "badge_message_template must contain {}",
                    placeholder
                )));
            }
        }

        Ok(())
    }

    /// Timeout as a `Duration`
    pub fn timeout(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.timeout_seconds)
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Config file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("IO error: {0}")]
    Io(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Validation error: {0}")]
    Validation(String),
}
