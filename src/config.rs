use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::fmt;
use std::time::Duration;

/// Main assistant configuration structure
#[derive(Debug, Deserialize, Clone)]
pub struct AssistantConfig {
    /// Chat-completion endpoint and generation parameters
    #[serde(default)]
    pub provider: ProviderConfig,
    /// What to do when the chat-completion service fails
    #[serde(default)]
    pub fallback: FallbackConfig,
    /// Recipe prompt options
    #[serde(default)]
    pub prompt: PromptConfig,
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            provider: ProviderConfig::default(),
            fallback: FallbackConfig::default(),
            prompt: PromptConfig::default(),
            timeout: default_timeout(),
        }
    }
}

/// Configuration for the chat-completion service
#[derive(Deserialize, Clone)]
pub struct ProviderConfig {
    /// Full URL of the chat-completion endpoint
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    /// API key for authentication (can also be set via OPENAI_API_KEY)
    pub api_key: Option<String>,
    /// Model identifier (e.g., "gpt-3.5-turbo")
    #[serde(default = "default_model")]
    pub model: String,
    /// Temperature for generation (0.0-2.0)
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    /// Maximum tokens to generate
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    /// System-role preamble; an empty string sends no system message
    #[serde(default = "default_system_prompt")]
    pub system_prompt: Option<String>,
}

// Keeps the credential out of logs and panic messages.
impl fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("endpoint", &self.endpoint)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("model", &self.model)
            .field("temperature", &self.temperature)
            .field("max_tokens", &self.max_tokens)
            .field("system_prompt", &self.system_prompt)
            .finish()
    }
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            api_key: None,
            model: default_model(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            system_prompt: default_system_prompt(),
        }
    }
}

impl ProviderConfig {
    /// The system message to send, if any
    pub fn system_message(&self) -> Option<&str> {
        self.system_prompt
            .as_deref()
            .map(str::trim)
            .filter(|prompt| !prompt.is_empty())
    }
}

/// How generation failures are surfaced
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum FailurePolicy {
    /// Propagate the error to the caller
    #[default]
    Strict,
    /// Substitute the built-in recipe set
    Fallback,
}

/// Configuration for retry and fallback behavior
#[derive(Debug, Deserialize, Clone)]
pub struct FallbackConfig {
    #[serde(default)]
    pub policy: FailurePolicy,
    /// Number of attempts before the policy applies
    #[serde(default = "default_retry_attempts")]
    pub retry_attempts: u32,
    /// Delay between attempts in milliseconds, multiplied by the attempt number
    #[serde(default = "default_retry_delay_ms")]
    pub retry_delay_ms: u64,
}

impl Default for FallbackConfig {
    fn default() -> Self {
        Self {
            policy: FailurePolicy::default(),
            retry_attempts: default_retry_attempts(),
            retry_delay_ms: default_retry_delay_ms(),
        }
    }
}

/// Options for the recipe prompt
#[derive(Debug, Deserialize, Clone)]
pub struct PromptConfig {
    /// How many regular recipes to ask for
    #[serde(default = "default_recipe_count")]
    pub recipe_count: u8,
    /// Region the bonus recipe is themed after
    #[serde(default = "default_bonus_region")]
    pub bonus_region: String,
}

impl Default for PromptConfig {
    fn default() -> Self {
        Self {
            recipe_count: default_recipe_count(),
            bonus_region: default_bonus_region(),
        }
    }
}

// Default value functions
fn default_endpoint() -> String {
    "https://api.openai.com/v1/chat/completions".to_string()
}

fn default_model() -> String {
    "gpt-3.5-turbo".to_string()
}

fn default_temperature() -> f32 {
    0.7
}

fn default_max_tokens() -> u32 {
    1000
}

fn default_system_prompt() -> Option<String> {
    Some(crate::prompt::DEFAULT_SYSTEM_PROMPT.to_string())
}

fn default_retry_attempts() -> u32 {
    1
}

fn default_retry_delay_ms() -> u64 {
    1000
}

fn default_recipe_count() -> u8 {
    3
}

fn default_bonus_region() -> String {
    "Indiana".to_string()
}

fn default_timeout() -> u64 {
    30
}

impl AssistantConfig {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded with the following priority (highest to lowest):
    /// 1. Environment variables with COOKALONG__ prefix
    /// 2. cook-along.toml file in current directory
    /// 3. Default values
    ///
    /// Environment variable format: COOKALONG__PROVIDER__MODEL
    pub fn load() -> Result<Self, ConfigError> {
        load_config()
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }
}

/// Load configuration from file and environment variables
///
/// The API key falls back to OPENAI_API_KEY when neither the file nor a
/// COOKALONG__PROVIDER__API_KEY variable sets it.
pub fn load_config() -> Result<AssistantConfig, ConfigError> {
    let settings = Config::builder()
        // Optional config file (can be missing)
        .add_source(File::with_name("cook-along").required(false))
        // Use double underscore for nested: COOKALONG__PROVIDER__API_KEY
        .add_source(
            Environment::with_prefix("COOKALONG")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    let mut config: AssistantConfig = settings.try_deserialize()?;
    if config.provider.api_key.is_none() {
        config.provider.api_key = std::env::var("OPENAI_API_KEY").ok();
    }
    Ok(config)
}
