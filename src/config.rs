// Application Configuration
//
// TOML configuration for the dataset location and the assistant endpoint.
// The API key is only ever taken from the environment.

use crate::services::llm::{LlmConfig, DEFAULT_ENDPOINT, DEFAULT_MAX_TOKENS, DEFAULT_MODEL};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// Environment variable holding the Anthropic API key
pub const API_KEY_ENV: &str = "ANTHROPIC_API_KEY";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

/// Main application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub dataset: DatasetConfig,

    #[serde(default)]
    pub assistant: AssistantConfig,
}

/// Where the evaluation records come from
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DatasetConfig {
    /// Path to the JSON dataset (falls back to `data/evaluations.json`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

/// Assistant endpoint settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssistantConfig {
    pub model: String,

    pub max_tokens: usize,

    /// Sampling temperature; omitted from requests when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,

    pub endpoint: String,
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            max_tokens: DEFAULT_MAX_TOKENS,
            temperature: None,
            endpoint: DEFAULT_ENDPOINT.to_string(),
        }
    }
}

impl AppConfig {
    /// Default config location: `<config dir>/tooleval/config.toml`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("tooleval").join("config.toml"))
    }

    /// Load from `path`, or from the default location if it exists, or defaults
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::from_file(path),
            None => match Self::default_path().filter(|p| p.exists()) {
                Some(default) => {
                    debug!("Using config file {}", default.display());
                    Self::from_file(&default)
                }
                None => Ok(Self::default()),
            },
        }
    }

    /// Load configuration from TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let config: AppConfig = toml::from_str(toml_str)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), ConfigError> {
        let assistant = &self.assistant;

        if assistant.model.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "assistant.model must not be empty".to_string(),
            ));
        }

        if assistant.max_tokens == 0 || assistant.max_tokens > 8192 {
            return Err(ConfigError::ValidationError(
                "assistant.max_tokens must be between 1 and 8192".to_string(),
            ));
        }

        if let Some(temperature) = assistant.temperature {
            if !(0.0..=1.0).contains(&temperature) {
                return Err(ConfigError::ValidationError(
                    "assistant.temperature must be between 0.0 and 1.0".to_string(),
                ));
            }
        }

        if !assistant.endpoint.starts_with("http://") && !assistant.endpoint.starts_with("https://")
        {
            return Err(ConfigError::ValidationError(format!(
                "assistant.endpoint must be an http(s) URL, got '{}'",
                assistant.endpoint
            )));
        }

        Ok(())
    }

    /// Save configuration to TOML file
    pub fn to_file(&self, path: &Path) -> Result<(), ConfigError> {
        let toml_str = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::ValidationError(e.to_string()))?;
        std::fs::write(path, toml_str)?;
        Ok(())
    }

    /// Dataset location, with the CLI override taking precedence
    pub fn dataset_path(&self, cli_path: Option<PathBuf>) -> PathBuf {
        cli_path
            .or_else(|| self.dataset.path.clone())
            .unwrap_or_else(|| PathBuf::from("data").join("evaluations.json"))
    }

    /// Client settings, with the API key read from the environment
    pub fn llm_config(&self) -> LlmConfig {
        LlmConfig {
            api_key: env::var(API_KEY_ENV).unwrap_or_default(),
            model: self.assistant.model.clone(),
            max_tokens: self.assistant.max_tokens,
            temperature: self.assistant.temperature,
            endpoint: self.assistant.endpoint.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config_is_valid() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.assistant.model, DEFAULT_MODEL);
        assert_eq!(config.assistant.max_tokens, 1000);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config = AppConfig::from_toml(
            r#"
            [dataset]
            path = "/srv/evals.json"
            "#,
        )
        .unwrap();

        assert_eq!(config.dataset.path, Some(PathBuf::from("/srv/evals.json")));
        assert_eq!(config.assistant, AssistantConfig::default());
    }

    #[test]
    fn test_validate_max_tokens_zero() {
        let mut config = AppConfig::default();
        config.assistant.max_tokens = 0;

        let result = config.validate();
        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("max_tokens must be between"));
    }

    #[test]
    fn test_validate_temperature_out_of_range() {
        let mut config = AppConfig::default();
        config.assistant.temperature = Some(1.5);
        assert!(config.validate().is_err());

        config.assistant.temperature = Some(0.2);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_endpoint_scheme() {
        let mut config = AppConfig::default();
        config.assistant.endpoint = "ftp://example.com".to_string();

        let result = config.validate();
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("endpoint must be an http(s) URL"));
    }

    #[test]
    fn test_invalid_toml_is_parse_error() {
        let result = AppConfig::from_toml("[assistant\nmodel = ");
        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");

        let mut config = AppConfig::default();
        config.assistant.model = "claude-3-5-haiku-20241022".to_string();
        config.assistant.temperature = Some(0.3);
        config.to_file(&path).unwrap();

        let loaded = AppConfig::load(Some(&path)).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let temp_dir = TempDir::new().unwrap();
        let result = AppConfig::from_file(&temp_dir.path().join("absent.toml"));
        assert!(matches!(result, Err(ConfigError::IoError(_))));
    }

    #[test]
    fn test_dataset_path_precedence() {
        let mut config = AppConfig::default();
        assert_eq!(
            config.dataset_path(None),
            PathBuf::from("data").join("evaluations.json")
        );

        config.dataset.path = Some(PathBuf::from("from-file.json"));
        assert_eq!(config.dataset_path(None), PathBuf::from("from-file.json"));
        assert_eq!(
            config.dataset_path(Some(PathBuf::from("from-cli.json"))),
            PathBuf::from("from-cli.json")
        );
    }
}
