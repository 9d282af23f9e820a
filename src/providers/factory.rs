use crate::config::{AssistantConfig, FailurePolicy};
use crate::providers::{ChatProvider, OpenAIProvider, RetryProvider};
use crate::CookAlongError;
use log::warn;

pub struct ProviderFactory;

impl ProviderFactory {
    /// Create the chat provider described by the configuration
    ///
    /// Under the fallback policy a missing API key is not fatal. Every
    /// request then fails and the assistant serves built-in recipes.
    pub fn create(config: &AssistantConfig) -> Result<Box<dyn ChatProvider>, CookAlongError> {
        let inner: Box<dyn ChatProvider> =
            match OpenAIProvider::new(&config.provider) {
                Ok(provider) => Box::new(provider),
                Err(e) if config.fallback.policy == FailurePolicy::Fallback => {
                    warn!("Chat provider unavailable, using built-in recipes: {}", e);
                    Box::new(OfflineProvider)
                }
                Err(e) => return Err(e),
            };

        Ok(Box::new(RetryProvider::new(inner, &config.fallback)))
    }
}

/// Stand-in used when no API key is configured
struct OfflineProvider;

#[async_trait::async_trait]
impl ChatProvider for OfflineProvider {
    fn provider_name(&self) -> &str {
        "offline"
    }

    async fn complete(&self, _prompt: &str) -> Result<String, CookAlongError> {
        Err(CookAlongError::Validation(
            "No API key configured for the chat provider".to_string(),
        ))
    }
}
