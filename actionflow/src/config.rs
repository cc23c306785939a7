//! Orchestrator configuration
//!
//! Settings are resolved from three layers, highest precedence first:
//! 1. A YAML file (`trace_timing`, `max_history_size`)
//! 2. Environment variables prefixed with `ACTIONFLOW_`
//! 3. Built-in defaults

use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;

/// Prefix shared by every environment variable read by the library
pub const ENV_PREFIX: &str = "ACTIONFLOW";

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read a configuration file from disk
    #[error("Failed to read configuration file {path}: {source}")]
    FileRead {
        /// Path to the configuration file that could not be read
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse YAML content from a configuration file
    #[error("Invalid YAML syntax in {path}:\n{source}\n\nHint: Check for proper indentation and YAML formatting")]
    YamlParse {
        /// Path to the configuration file with invalid YAML content
        path: PathBuf,
        /// Underlying YAML parsing error
        #[source]
        source: serde_yaml::Error,
    },

    /// Configuration validation failed
    #[error("Configuration validation failed: {message}")]
    Validation {
        /// Descriptive message about the validation failure
        message: String,
    },
}

/// Settings that shape how an [`Orchestrator`](crate::Orchestrator) records
/// and renders its history
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrchestratorConfig {
    /// Annotate rendered traces with elapsed time per step (default: true)
    #[serde(rename = "trace_timing")]
    pub include_timing: bool,
    /// Keep at most this many history records, dropping the oldest.
    /// `None` keeps everything (default).
    pub max_history_size: Option<usize>,
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self {
            include_timing: true,
            max_history_size: None,
        }
    }
}

impl OrchestratorConfig {
    /// Build a configuration from defaults overridden by environment variables
    pub fn from_env() -> Self {
        let mut config = Self::default();
        config.apply_env_vars();
        config
    }

    /// Build a configuration from defaults, environment variables and then
    /// the YAML file at `path`
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let mut config = Self::from_env();
        YamlConfig::load_from_file(path)?.apply_to_config(&mut config);
        config.validate()?;
        Ok(config)
    }

    /// Check the configuration for values the orchestrator cannot honour
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_history_size == Some(0) {
            return Err(ConfigError::Validation {
                message: "max_history_size must be greater than zero".to_string(),
            });
        }
        Ok(())
    }

    fn apply_env_vars(&mut self) {
        self.include_timing = load_env_parsed("TRACE_TIMING", self.include_timing);
        if let Some(size) = load_env_optional::<usize>("MAX_HISTORY_SIZE") {
            self.max_history_size = Some(size);
        }
    }
}

/// The subset of settings that may appear in a YAML configuration file
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct YamlConfig {
    /// See [`OrchestratorConfig::include_timing`]
    pub trace_timing: Option<bool>,
    /// See [`OrchestratorConfig::max_history_size`]
    pub max_history_size: Option<usize>,
}

impl YamlConfig {
    /// Apply YAML values to an existing config; YAML values take precedence
    pub fn apply_to_config(&self, config: &mut OrchestratorConfig) {
        if let Some(include_timing) = self.trace_timing {
            config.include_timing = include_timing;
        }
        if let Some(size) = self.max_history_size {
            config.max_history_size = Some(size);
        }
    }

    /// Load YAML configuration from a file path
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        tracing::debug!("Loading YAML configuration from: {:?}", path);

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;

        // An empty file deserializes to unit, not a mapping
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        serde_yaml::from_str(&content).map_err(|e| ConfigError::YamlParse {
            path: path.to_path_buf(),
            source: e,
        })
    }
}

fn env_key(suffix: &str) -> String {
    format!("{ENV_PREFIX}_{suffix}")
}

fn load_env_parsed<T: FromStr>(suffix: &str, default: T) -> T {
    load_env_optional(suffix).unwrap_or(default)
}

fn load_env_optional<T: FromStr>(suffix: &str) -> Option<T> {
    env::var(env_key(suffix)).ok().and_then(|v| v.parse().ok())
}
