mod factory;
mod open_ai;
mod retry;

pub use factory::ProviderFactory;
pub use open_ai::OpenAIProvider;
pub use retry::RetryProvider;

use crate::CookAlongError;
use async_trait::async_trait;

/// A chat-completion backend
#[async_trait]
pub trait ChatProvider: Send + Sync {
    /// Get the provider name (e.g., "openai", "offline")
    fn provider_name(&self) -> &str;

    /// Send one user prompt and return the raw text of the first answer
    async fn complete(&self, prompt: &str) -> Result<String, CookAlongError>;
}
