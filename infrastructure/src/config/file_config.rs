//! Configuration file schema
//!
//! Raw configuration as read from `sous.toml`, with serde defaults for
//! every field so a missing file or section still produces a working
//! config.

use serde::{Deserialize, Serialize};
use sous_application::config::{AssistantParams, DEFAULT_MODEL};
use sous_application::ports::credentials::ApiKeySource;

/// Assistant model settings (`[assistant]` section).
///
/// # Example
///
/// ```toml
/// [assistant]
/// model = "claude-sonnet-4-5-20250929"
/// max_tokens = 4096
/// temperature = 0.7
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileAssistantConfig {
    pub model: String,
    pub max_tokens: u32,
    pub temperature: f64,
}

impl Default for FileAssistantConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            max_tokens: 4096,
            temperature: 0.7,
        }
    }
}

impl FileAssistantConfig {
    pub fn to_params(&self) -> AssistantParams {
        AssistantParams {
            model: self.model.clone(),
            max_tokens: self.max_tokens,
            temperature: self.temperature,
        }
    }
}

/// Anthropic API settings (`[api]` section).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileApiConfig {
    /// Direct API key (not recommended — use the env var instead).
    pub key: Option<String>,
    /// Environment variable name for the API key.
    pub key_env: String,
    /// Full Messages endpoint URL.
    pub base_url: String,
    /// Anthropic API version header.
    pub version: String,
}

impl Default for FileApiConfig {
    fn default() -> Self {
        Self {
            key: None,
            key_env: "ANTHROPIC_API_KEY".to_string(),
            base_url: "https://api.anthropic.com/v1/messages".to_string(),
            version: "2023-06-01".to_string(),
        }
    }
}

impl ApiKeySource for FileApiConfig {
    /// Explicit key wins; otherwise the configured environment variable.
    /// Empty values count as absent.
    fn api_key(&self) -> Option<String> {
        self.key
            .clone()
            .filter(|key| !key.is_empty())
            .or_else(|| std::env::var(&self.key_env).ok())
            .filter(|key| !key.is_empty())
    }
}

/// Conversation log settings (`[logging]` section).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileLoggingConfig {
    /// Path for the JSONL conversation log; unset disables it.
    pub conversation_log: Option<String>,
}

/// Root configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub assistant: FileAssistantConfig,
    pub api: FileApiConfig,
    pub logging: FileLoggingConfig,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = FileConfig::default();
        assert_eq!(config.assistant.max_tokens, 4096);
        assert_eq!(config.api.key_env, "ANTHROPIC_API_KEY");
        assert!(config.api.base_url.ends_with("/v1/messages"));
        assert_eq!(config.api.version, "2023-06-01");
        assert!(config.logging.conversation_log.is_none());
    }

    #[test]
    fn explicit_key_wins_over_env_lookup() {
        let config = FileApiConfig {
            key: Some("sk-direct".to_string()),
            // Deliberately point at a variable that should not exist.
            key_env: "SOUS_TEST_NO_SUCH_VAR".to_string(),
            ..Default::default()
        };
        assert_eq!(config.api_key().as_deref(), Some("sk-direct"));
    }

    #[test]
    fn empty_key_counts_as_absent() {
        let config = FileApiConfig {
            key: Some(String::new()),
            key_env: "SOUS_TEST_NO_SUCH_VAR".to_string(),
            ..Default::default()
        };
        assert_eq!(config.api_key(), None);
    }

    #[test]
    fn partial_toml_fills_in_defaults() {
        let config: FileConfig = toml::from_str(
            r#"
            [assistant]
            temperature = 0.3
            "#,
        )
        .unwrap();
        assert_eq!(config.assistant.temperature, 0.3);
        assert_eq!(config.assistant.max_tokens, 4096);
        assert_eq!(config.api.version, "2023-06-01");
    }
}
