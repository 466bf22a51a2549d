use std::env;
use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::models::ModelSelection;
use crate::orchestrator::CredentialSet;

/// Configuration for the Piee chat client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub chat: ChatConfig,
    pub openai: ProviderConfig,
    pub groq: ProviderConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatConfig {
    /// Model name string; unknown names fall back to the OpenAI default.
    pub default_model: String,
    /// Overrides the built-in persona prompt when set.
    pub system_prompt: Option<String>,
    /// Whole-request timeout in seconds. Unset means no timeout, matching
    /// the original client.
    pub request_timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    #[serde(default)]
    pub api_key: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            chat: ChatConfig {
                default_model: "llama-3.3-70b-versatile".to_string(),
                system_prompt: None,
                request_timeout_seconds: None,
            },
            openai: ProviderConfig {
                api_key: String::new(),
            },
            groq: ProviderConfig {
                api_key: String::new(),
            },
        }
    }
}

impl Config {
    /// Load configuration from file with environment variable overrides.
    /// ALWAYS returns a valid config - never fails.
    pub fn load() -> Self {
        if dotenvy::dotenv().is_ok() {
            tracing::info!("Loaded .env from current directory");
        }

        let config_path =
            env::var("PIEE_CONFIG_PATH").unwrap_or_else(|_| "config.yaml".to_string());

        let mut config = if Path::new(&config_path).exists() {
            match fs::read_to_string(&config_path) {
                Ok(contents) => match serde_yaml::from_str::<Config>(&contents) {
                    Ok(config) => {
                        tracing::info!("Loaded configuration from {}", config_path);
                        config
                    }
                    Err(e) => {
                        tracing::error!(
                            "Failed to parse config file {}: {} - using defaults",
                            config_path,
                            e
                        );
                        Self::default()
                    }
                },
                Err(e) => {
                    tracing::error!(
                        "Failed to read config file {}: {} - using defaults",
                        config_path,
                        e
                    );
                    Self::default()
                }
            }
        } else {
            Self::default()
        };

        config.apply_env_overrides();

        if let Err(e) = config.validate() {
            tracing::warn!("Config validation warnings: {} - continuing anyway", e);
        }

        config
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(api_key) = env::var("OPENAI_API_KEY") {
            self.openai.api_key = api_key;
        }
        if let Ok(api_key) = env::var("GROQ_API_KEY") {
            self.groq.api_key = api_key;
        }
        if let Ok(model) = env::var("PIEE_MODEL") {
            self.chat.default_model = model;
        }
        if let Ok(prompt) = env::var("PIEE_SYSTEM_PROMPT") {
            self.chat.system_prompt = Some(prompt);
        }
        if let Ok(timeout) = env::var("PIEE_REQUEST_TIMEOUT_SECONDS") {
            if let Ok(seconds) = timeout.parse() {
                self.chat.request_timeout_seconds = Some(seconds);
            }
        }
    }

    fn validate(&self) -> Result<(), String> {
        if self.openai.api_key.is_empty() && self.groq.api_key.is_empty() {
            return Err("no API key configured for either provider".to_string());
        }
        Ok(())
    }

    pub fn default_model(&self) -> ModelSelection {
        ModelSelection::from_name(&self.chat.default_model)
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.chat.request_timeout_seconds.map(Duration::from_secs)
    }

    /// Initial credential set for the orchestrator. Empty keys are treated
    /// as absent so they do not mask a later partial update.
    pub fn credentials(&self) -> CredentialSet {
        CredentialSet {
            openai: Some(self.openai.api_key.clone()).filter(|k| !k.is_empty()),
            groq: Some(self.groq.api_key.clone()).filter(|k| !k.is_empty()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Provider;

    #[test]
    fn defaults_select_the_groq_model_with_no_timeout() {
        let config = Config::default();
        assert_eq!(config.default_model(), ModelSelection::Llama33Versatile);
        assert!(config.request_timeout().is_none());
        assert!(config.validate().is_err());
    }

    #[test]
    fn empty_keys_are_absent_from_the_credential_set() {
        let mut config = Config::default();
        config.groq.api_key = "gsk_test".to_string();

        let credentials = config.credentials();
        assert_eq!(credentials.get(Provider::Groq), Some("gsk_test"));
        assert_eq!(credentials.get(Provider::OpenAi), None);
    }

    #[test]
    fn config_parses_from_yaml() {
        let yaml = r#"
chat:
  default_model: gpt-4o-mini
  system_prompt: null
  request_timeout_seconds: 30
openai:
  api_key: sk-test
groq: {}
"#;
        let config: Config = serde_yaml::from_str(yaml).expect("yaml should parse");
        assert_eq!(config.default_model(), ModelSelection::Gpt4oMini);
        assert_eq!(config.request_timeout(), Some(Duration::from_secs(30)));
        assert_eq!(config.openai.api_key, "sk-test");
        assert!(config.groq.api_key.is_empty());
    }
}
