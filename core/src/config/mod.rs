//! Configuration management
//!
//! Settings come from an optional `aitutor.toml` (current directory first,
//! then the platform config dir), with the API key taken from the
//! `OPENAI_API_KEY` environment variable. The key is required before any
//! agent run; a missing key is a fatal configuration error reported with
//! remediation instructions rather than a crash.

use crate::debug_log;
use crate::error::{OptionExt, Result, TutorError};
use crate::llm::{LlmConfig, LlmProvider};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Environment variable holding the provider credential
pub const API_KEY_ENV: &str = "OPENAI_API_KEY";

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Provider name ("openai", "ollama", "lmstudio", ...)
    #[serde(default = "default_provider")]
    pub provider: String,

    /// API endpoint base URL
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Model identifier
    #[serde(default = "default_model")]
    pub model: String,

    /// API key. Normally supplied via the environment; a file value is
    /// only used when the environment variable is absent.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Sampling temperature
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Maximum tokens per response
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// Maximum agent loop iterations
    #[serde(default = "default_max_iterations")]
    pub max_iterations: usize,
}

fn default_provider() -> String {
    "openai".to_string()
}

fn default_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_temperature() -> f32 {
    // deterministic results, as the calculator examples expect
    0.0
}

fn default_max_tokens() -> u32 {
    1024
}

fn default_max_iterations() -> usize {
    10
}

impl Default for Config {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            base_url: default_base_url(),
            model: default_model(),
            api_key: None,
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            max_iterations: default_max_iterations(),
        }
    }
}

impl Config {
    /// Load configuration from the standard locations, then apply the
    /// environment on top.
    pub fn load() -> Result<Self> {
        let mut config = match find_config_file() {
            Some(path) => {
                let content = std::fs::read_to_string(&path)?;
                let parsed: Self =
                    toml::from_str(&content).map_err(|e| TutorError::InvalidConfig {
                        message: format!("{}: {}", path.display(), e),
                    })?;
                debug_log!("Loaded configuration from {}", path.display());
                parsed
            }
            None => Self::default(),
        };

        if let Ok(key) = std::env::var(API_KEY_ENV) {
            if !key.trim().is_empty() {
                config.api_key = Some(key);
            }
        }

        Ok(config)
    }

    /// Parse the config from a TOML string (file contents).
    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| TutorError::InvalidConfig {
            message: e.to_string(),
        })
    }

    /// The API key, or a `MissingConfig` error when unset.
    pub fn require_api_key(&self) -> Result<String> {
        self.api_key
            .clone()
            .filter(|k| !k.trim().is_empty())
            .ok_or_missing(API_KEY_ENV)
    }

    /// Build the LLM client configuration.
    pub fn llm_config(&self) -> Result<LlmConfig> {
        let provider: LlmProvider =
            self.provider
                .parse()
                .map_err(|e: String| TutorError::InvalidConfig { message: e })?;

        Ok(LlmConfig::new(
            provider,
            self.base_url.clone(),
            self.model.clone(),
            Some(self.require_api_key()?),
        )
        .with_temperature(self.temperature)
        .with_max_tokens(self.max_tokens))
    }
}

/// Remediation instructions shown when the credential is missing.
pub fn api_key_remediation() -> String {
    format!(
        "Please set it in your environment before running:\n  export {}='your-key-here'\n\
        or add `api_key = \"...\"` to aitutor.toml.",
        API_KEY_ENV
    )
}

/// Find the configuration file in standard locations
pub fn find_config_file() -> Option<PathBuf> {
    if let Ok(cwd) = std::env::current_dir() {
        let path = cwd.join("aitutor.toml");
        if path.exists() {
            return Some(path);
        }
    }

    if let Some(dir) = get_config_dir() {
        let path = dir.join("aitutor.toml");
        if path.exists() {
            return Some(path);
        }
    }

    None
}

/// Get the configuration directory path
pub fn get_config_dir() -> Option<PathBuf> {
    use dirs::config_dir;
    use home::home_dir;

    if let Some(dir) = config_dir() {
        return Some(dir.join("aitutor"));
    }

    if let Some(home) = home_dir() {
        return Some(home.join(".config").join("aitutor"));
    }

    None
}

/// Get the data directory path (log files)
pub fn get_data_dir() -> Option<PathBuf> {
    dirs::data_dir().map(|dir| dir.join("aitutor"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.provider, "openai");
        assert_eq!(config.model, "gpt-4o-mini");
        assert_eq!(config.temperature, 0.0);
        assert_eq!(config.max_iterations, 10);
        assert!(config.api_key.is_none());
    }

    #[test]
    fn test_from_toml_partial() {
        let config = Config::from_toml(
            r#"
            model = "llama3"
            base_url = "http://localhost:11434/v1"
            provider = "ollama"
            "#,
        )
        .unwrap();
        assert_eq!(config.model, "llama3");
        assert_eq!(config.base_url, "http://localhost:11434/v1");
        // untouched fields keep their defaults
        assert_eq!(config.max_tokens, 1024);
    }

    #[test]
    fn test_from_toml_invalid() {
        assert!(matches!(
            Config::from_toml("model = ["),
            Err(TutorError::InvalidConfig { .. })
        ));
    }

    #[test]
    fn test_require_api_key() {
        let mut config = Config::default();
        assert!(matches!(
            config.require_api_key(),
            Err(TutorError::MissingConfig { .. })
        ));

        config.api_key = Some("  ".to_string());
        assert!(config.require_api_key().is_err());

        config.api_key = Some("sk-test".to_string());
        assert_eq!(config.require_api_key().unwrap(), "sk-test");
    }

    #[test]
    fn test_llm_config_requires_key() {
        let mut config = Config::default();
        assert!(config.llm_config().is_err());

        config.api_key = Some("sk-test".to_string());
        let llm = config.llm_config().unwrap();
        assert_eq!(llm.model, "gpt-4o-mini");
        assert_eq!(llm.temperature, Some(0.0));
    }

    #[test]
    fn test_remediation_names_the_variable() {
        assert!(api_key_remediation().contains(API_KEY_ENV));
    }
}
