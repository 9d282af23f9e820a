use std::time::Duration;

use crate::config::{AssistantConfig, FailurePolicy};
use crate::{CookAlongError, RecipeAssistant, RecipeCollection, RecipeRequest};

/// Builder for configuring and running a one-off recipe suggestion
#[derive(Debug, Default)]
pub struct RecipeSuggesterBuilder {
    request: RecipeRequest,
    config: Option<AssistantConfig>,
    policy: Option<FailurePolicy>,
    timeout: Option<Duration>,
    api_key: Option<String>,
    model: Option<String>,
    endpoint: Option<String>,
}

impl RecipeSuggesterBuilder {
    /// Set the ingredients the user has on hand
    ///
    /// # Example
    /// ```
    /// use cook_along::RecipeSuggester;
    ///
    /// let builder = RecipeSuggester::builder()
    ///     .ingredients("eggs, bread, butter");
    /// ```
    pub fn ingredients(mut self, ingredients: impl Into<String>) -> Self {
        self.request.ingredients = ingredients.into();
        self
    }

    /// Set the available kitchen tools
    ///
    /// Left blank, the prompt assumes basic kitchen tools.
    pub fn tools(mut self, tools: impl Into<String>) -> Self {
        self.request.tools = tools.into();
        self
    }

    /// Set a preferred cuisine or cooking style
    pub fn style(mut self, style: impl Into<String>) -> Self {
        self.request.style = style.into();
        self
    }

    /// Use this configuration instead of loading `cook-along.toml` and the
    /// environment
    pub fn config(mut self, config: AssistantConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Choose between surfacing failures and substituting built-in recipes
    ///
    /// # Example
    /// ```
    /// use cook_along::{FailurePolicy, RecipeSuggester};
    ///
    /// let builder = RecipeSuggester::builder()
    ///     .ingredients("rice, beans")
    ///     .policy(FailurePolicy::Fallback);
    /// ```
    pub fn policy(mut self, policy: FailurePolicy) -> Self {
        self.policy = Some(policy);
        self
    }

    /// Set a timeout for the chat-completion request
    pub fn timeout(mut self, duration: Duration) -> Self {
        self.timeout = Some(duration);
        self
    }

    /// Set the API key for the chat-completion service
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Set the model name
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Set the full chat-completion endpoint URL
    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    /// Build and run the request
    ///
    /// # Errors
    /// Returns `CookAlongError` if:
    /// - no ingredients were given
    /// - configuration cannot be loaded
    /// - the service fails and the policy is strict
    ///
    /// # Example
    /// ```no_run
    /// # use cook_along::RecipeSuggester;
    /// # #[tokio::main]
    /// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let recipes = RecipeSuggester::builder()
    ///     .ingredients("eggs, bread, butter")
    ///     .build()
    ///     .await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn build(self) -> Result<RecipeCollection, CookAlongError> {
        self.request.validate()?;

        let mut config = match self.config {
            Some(config) => config,
            None => AssistantConfig::load()?,
        };
        if let Some(policy) = self.policy {
            config.fallback.policy = policy;
        }
        if let Some(timeout) = self.timeout {
            config.timeout = timeout.as_secs().max(1);
        }
        if let Some(api_key) = self.api_key {
            config.provider.api_key = Some(api_key);
        }
        if let Some(model) = self.model {
            config.provider.model = model;
        }
        if let Some(endpoint) = self.endpoint {
            config.provider.endpoint = endpoint;
        }

        let assistant = RecipeAssistant::from_config(&config)?;
        assistant.suggest(&self.request).await
    }
}

/// Main entry point for the builder API
pub struct RecipeSuggester;

impl RecipeSuggester {
    /// Creates a new builder for recipe suggestions
    ///
    /// # Example
    /// ```
    /// use cook_along::RecipeSuggester;
    ///
    /// let builder = RecipeSuggester::builder();
    /// ```
    pub fn builder() -> RecipeSuggesterBuilder {
        RecipeSuggesterBuilder::default()
    }
}
